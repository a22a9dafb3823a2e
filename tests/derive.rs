#![cfg(feature = "derive")]

use paxpack::{
    avec::{
        ConfigFlags, FromRecord, FromUplinks, Key, PayloadMask, Version,
        slice::{decode_into, decode_schema},
    },
    sans::{
        field::Field,
        schema::{Entry, Schema},
    },
};

#[derive(Debug, Default, FromUplinks)]
struct Uplinks {
    #[port(1)]
    counts: Vec<Counts>,
    #[port(2)]
    status: Option<Status>,
    #[port(3)]
    config: Option<Config>,
    #[port(7)]
    sensor: Option<Sensor>,
}

#[derive(Debug, Default, FromRecord)]
struct Counts {
    #[field("wifi")]
    wifi: Option<u16>,
    #[field("ble")]
    ble: Option<u16>,
    #[field("latitude")]
    latitude: Option<f64>,
    #[field("longitude")]
    longitude: Option<f64>,
}

#[derive(Debug, Default, FromRecord)]
struct Status {
    #[field("voltage")]
    voltage: Option<u16>,
    #[field("uptime")]
    uptime: Option<u64>,
    #[field("memory")]
    memory: Option<u32>,
}

#[derive(Debug, Default, FromRecord)]
struct Config {
    #[field("lorasf")]
    spreading_factor: Option<u8>,
    #[field("flags", |v, f: ConfigFlags| *v = f.blescan())]
    ble_scan: bool,
    #[field("payloadmask")]
    payload_mask: Option<PayloadMask>,
    #[field("version", |v, x: Version| *v = x.as_str().map(String::from))]
    version: Option<String>,
}

#[derive(Debug, Default, FromRecord)]
struct Sensor {
    #[field("temperature")]
    temperature: Option<f64>,
    #[field("pressure")]
    pressure: Option<u16>,
}

#[test]
fn decode_into_collects_by_port() {
    let mut uplinks = Uplinks::default();

    decode_into(&[0x05, 0x00], 1, &mut uplinks).unwrap();
    decode_into(&[0x06, 0x00, 0x07, 0x00], 1, &mut uplinks).unwrap();

    let status = [
        0x18, 0x10, // voltage
        0x05, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, // uptime
        0x30, // cputemp
        0x40, 0xE2, 0x01, 0x00, // memory
        0x01, 0x0C, // reset reasons
    ];
    decode_into(&status, 2, &mut uplinks).unwrap();

    let config = [
        0x09, 0x0F, 0x9C, 0xFF, 0x1E, 0x32, 0x14, 0x00, // settings
        0b0000_1000, // flags: blescan
        0b1000_0001, // payload mask: gps, battery
        b'1', b'.', b'8', b'.', b'0', 0, 0, 0, 0, 0, // version
    ];
    decode_into(&config, 3, &mut uplinks).unwrap();

    let sensor = [0xFF, 0x9C, 0xF5, 0x03, 0x00, 0x00, 0x00, 0x00];
    decode_into(&sensor, 7, &mut uplinks).unwrap();

    assert_eq!(uplinks.counts.len(), 2);
    assert_eq!(uplinks.counts[0].wifi, Some(5));
    assert_eq!(uplinks.counts[0].ble, None);
    assert_eq!(uplinks.counts[1].wifi, Some(6));
    assert_eq!(uplinks.counts[1].ble, Some(7));
    assert_eq!(uplinks.counts[1].latitude, None);
    assert_eq!(uplinks.counts[1].longitude, None);

    let status = uplinks.status.unwrap();
    assert_eq!(status.voltage, Some(4120));
    assert_eq!(status.uptime, Some(0x1_0000_0005));
    assert_eq!(status.memory, Some(123_456));

    let config = uplinks.config.unwrap();
    assert_eq!(config.spreading_factor, Some(9));
    assert!(config.ble_scan);
    let mask = config.payload_mask.unwrap();
    assert!(mask.gps() && mask.battery() && !mask.bme());
    assert_eq!(config.version.as_deref(), Some("1.8.0"));

    let sensor = uplinks.sensor.unwrap();
    assert_eq!(sensor.temperature, Some(-1.0));
    assert_eq!(sensor.pressure, Some(1013));
}

#[test]
fn uncollected_ports_are_skipped() {
    let mut uplinks = Uplinks::default();

    decode_into(&[0x01], 5, &mut uplinks).unwrap();
    decode_into(&[0xC8, 0x03], 6, &mut uplinks).unwrap();

    assert!(uplinks.counts.is_empty());
    assert!(uplinks.status.is_none());
}

#[test]
fn failed_uplinks_publish_nothing() {
    let mut uplinks = Uplinks::default();

    assert!(decode_into(&[0x00; 3], 1, &mut uplinks).is_err());
    assert!(decode_into(&[0x00; 16], 2, &mut uplinks).is_err());
    decode_into(&[], 2, &mut uplinks).unwrap();

    assert!(uplinks.counts.is_empty());
    assert!(uplinks.status.is_none());
}

#[derive(Debug, Default, FromRecord)]
struct Positional {
    #[field(0)]
    first: Option<u8>,
    #[field(1, |v, x: u16| v.push(x))]
    rest: Vec<u16>,
    #[field("named")]
    named: Option<u8>,
}

#[test]
fn positional_fields() {
    const ENTRIES: &[Entry] = &[
        Entry::unnamed(Field::Uint8),
        Entry::unnamed(Field::Uint16),
        Entry::named(Field::Uint8, "named"),
    ];

    let record = decode_schema(&[0x01, 0x02, 0x01, 0x03], Schema::new(ENTRIES)).unwrap();

    let mut positional = Positional::default();
    for (key, value) in record.iter() {
        positional.add_value(key, *value);
    }

    assert_eq!(positional.first, Some(1));
    assert_eq!(positional.rest, vec![0x0102]);
    assert_eq!(positional.named, Some(3));
}
