//! Payload schemas sent by the device firmware, and their selection.
//!
//! Each uplink carries a port number naming the kind of payload. Most ports
//! have a single layout. The counter port has several, told apart by the exact
//! payload length.
//!
//! Selection walks [`RULES`] in order and takes the first rule whose port and
//! length predicate both match.

use tracing::{debug, trace};
use zerocopy::TryFromBytes;

use super::{
    field::Field,
    schema::{Entry, Schema},
};

/// Ports used by the device firmware.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromBytes)]
pub enum Port {
    /// Wi-Fi and BLE device counts, optionally with a GPS fix.
    Counter = 1,
    /// Device status: voltage, uptime, temperature, memory, reset reasons.
    Status = 2,
    /// Device configuration.
    Config = 3,
    /// GPS fix.
    Gps = 4,
    /// Button press.
    Button = 5,
    /// Beacon proximity alarm.
    Beacon = 6,
    /// Environmental sensor readings.
    Sensor = 7,
    /// Battery voltage.
    Battery = 8,
}

impl Port {
    /// Look up a firmware port by number.
    pub fn from_number(number: u8) -> Option<Self> {
        let port: Result<Self, _> = zerocopy::try_transmute!(number);
        port.ok()
    }

    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// A constraint on payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Any length. Short payloads fail to decode; trailing bytes are ignored.
    Any,
    /// Exactly this many bytes.
    Exactly(usize),
}

impl Length {
    pub const fn matches(self, len: usize) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(n) => n == len,
        }
    }
}

/// A row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub port: Port,
    pub length: Length,
    pub schema: Schema<'static>,
}

const fn n(field: Field, name: &'static str) -> Entry {
    Entry::named(field, name)
}

pub const COUNTER_WIFI: Schema<'static> = Schema::new(&[n(Field::Uint16, "wifi")]);

pub const COUNTER_WIFI_BLE: Schema<'static> = Schema::new(&[
    n(Field::Uint16, "wifi"),
    n(Field::Uint16, "ble"),
]);

pub const COUNTER_WIFI_GPS: Schema<'static> = Schema::new(&[
    n(Field::Uint16, "wifi"),
    n(Field::LatLng, "latitude"),
    n(Field::LatLng, "longitude"),
    n(Field::Uint8, "sats"),
    n(Field::Hdop, "hdop"),
    n(Field::Uint16, "altitude"),
]);

pub const COUNTER_WIFI_BLE_GPS: Schema<'static> = Schema::new(&[
    n(Field::Uint16, "wifi"),
    n(Field::Uint16, "ble"),
    n(Field::LatLng, "latitude"),
    n(Field::LatLng, "longitude"),
    n(Field::Uint8, "sats"),
    n(Field::Hdop, "hdop"),
    n(Field::Uint16, "altitude"),
]);

pub const STATUS: Schema<'static> = Schema::new(&[
    n(Field::Uint16, "voltage"),
    n(Field::Uptime, "uptime"),
    n(Field::Uint8, "cputemp"),
    n(Field::Uint32, "memory"),
    n(Field::Uint8, "reset0"),
    n(Field::Uint8, "reset1"),
]);

pub const CONFIG: Schema<'static> = Schema::new(&[
    n(Field::Uint8, "lorasf"),
    n(Field::Uint8, "txpower"),
    n(Field::Uint16, "rssilimit"),
    n(Field::Uint8, "sendcycle"),
    n(Field::Uint8, "wifichancycle"),
    n(Field::Uint8, "blescantime"),
    n(Field::Uint8, "rgblum"),
    n(Field::ConfigFlags, "flags"),
    n(Field::PayloadMask, "payloadmask"),
    n(Field::Version, "version"),
]);

pub const GPS: Schema<'static> = Schema::new(&[
    n(Field::LatLng, "latitude"),
    n(Field::LatLng, "longitude"),
    n(Field::Uint8, "sats"),
    n(Field::Hdop, "hdop"),
    n(Field::Uint16, "altitude"),
]);

pub const BUTTON: Schema<'static> = Schema::new(&[n(Field::Uint8, "button")]);

pub const BEACON: Schema<'static> = Schema::new(&[n(Field::Uint8, "rssi"), n(Field::Uint8, "beacon")]);

// Firmware sends pressure here as a plain integer, so it is not read with
// `Field::Pressure`.
pub const SENSOR: Schema<'static> = Schema::new(&[
    n(Field::Float, "temperature"),
    n(Field::Uint16, "pressure"),
    n(Field::UFloat, "humidity"),
    n(Field::UFloat, "air"),
]);

pub const BATTERY: Schema<'static> = Schema::new(&[n(Field::Uint16, "voltage")]);

/// The dispatch table, in priority order.
pub const RULES: &[Rule] = &[
    rule(Port::Counter, Length::Exactly(2), COUNTER_WIFI),
    rule(Port::Counter, Length::Exactly(4), COUNTER_WIFI_BLE),
    rule(Port::Counter, Length::Exactly(15), COUNTER_WIFI_GPS),
    rule(Port::Counter, Length::Exactly(17), COUNTER_WIFI_BLE_GPS),
    rule(Port::Status, Length::Any, STATUS),
    rule(Port::Config, Length::Any, CONFIG),
    rule(Port::Gps, Length::Any, GPS),
    rule(Port::Button, Length::Any, BUTTON),
    rule(Port::Beacon, Length::Any, BEACON),
    rule(Port::Sensor, Length::Any, SENSOR),
    rule(Port::Battery, Length::Any, BATTERY),
];

const fn rule(port: Port, length: Length, schema: Schema<'static>) -> Rule {
    Rule {
        port,
        length,
        schema,
    }
}

/// Select the schema for a payload of `len` bytes received on `port`.
///
/// Returns `None` for unknown ports, and for counter payloads of an
/// unrecognized length.
pub fn select(port: u8, len: usize) -> Option<Schema<'static>> {
    let selected = Port::from_number(port).and_then(|port| {
        RULES
            .iter()
            .find(|rule| rule.port == port && rule.length.matches(len))
    });

    match selected {
        Some(rule) => {
            trace!(port, len, fields = rule.schema.entries().len(), "selected schema");
            Some(rule.schema)
        }
        None => {
            debug!(port, len, "no schema for uplink");
            None
        }
    }
}
