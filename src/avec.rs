//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode uplinks from slices and readers. They
//! return a [`Record`], or publish to the [`FromUplinks`] and [`FromRecord`]
//! traits.
//!
//! In many cases (when payloads of a known port are expected), these traits
//! can be derived. See the [`FromUplinks`](macro@FromUplinks) and
//! [`FromRecord`](macro@FromRecord) macros for details.

#[cfg(feature = "std")]
pub mod reader;
pub mod record;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use record::{MAX_FIELDS, Record};
pub use slice::decode as decode_slice;

pub use crate::sans::{
    flags::{ConfigFlags, PayloadMask},
    schema::Key,
    value::{Value, Version},
};

/// Derive [`FromUplinks`] for a struct collecting uplinks by port.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single uplink, add the `port(N)` attribute to an `Option<T>`
/// struct field, where `N` is the port number and `T` is a type implementing
/// [`FromRecord`] and [`Default`]. Additional uplinks received on the same
/// port will overwrite earlier ones. To collect every uplink on a port, apply
/// the attribute to a `Vec<T>` instead.
///
/// ```
/// #[derive(Debug, Default, FromUplinks)]
/// struct Uplinks {
///     #[port(1)]
///     counts: Vec<Counts>,
///     #[port(2)]
///     status: Option<Status>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use paxpack_derive::FromUplinks;

/// Produce record receivers for uplinks.
///
/// See the [`FromUplinks`](macro@FromUplinks) derive macro for an automatic
/// implementation of this trait.
pub trait FromUplinks {
    /// Retrieve a receiver for an uplink's record, if one exists.
    fn add_uplink(&mut self, port: u8) -> Option<&mut dyn FromRecord>;
}

/// Derive [`FromRecord`] for a struct representing a single record.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a value, add the `field("name")` attribute to an `Option<T>`
/// struct field, where `name` is the field's name in the schema and `T` is the
/// type the field decodes to: `u8`, `u16`, `u32`, `u64`, `f64`, [`Version`],
/// [`ConfigFlags`] or [`PayloadMask`]. Fields of unnamed schema entries are
/// addressed by position instead, as in `field(0)`.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct Status {
///     #[field("voltage")]
///     voltage: Option<u16>,
///     #[field("uptime")]
///     uptime: Option<u64>,
///     #[field("cputemp")]
///     cpu_temperature: Option<u8>,
/// }
/// ```
///
/// To store a value in another shape, supply an accumulator closure. Since
/// the value type cannot be inferred, the second argument must be typed.
///
/// ```
/// #[derive(Debug, Default, FromRecord)]
/// struct Config {
///     #[field("flags", |v, f: ConfigFlags| *v = f.blescan())]
///     ble_scan: bool,
///     #[field("version", |v, x: Version| *v = x.as_str().map(String::from))]
///     version: Option<String>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use paxpack_derive::FromRecord;

/// Receive field values for a record.
///
/// Each field is published once, through the method matching its value type,
/// under its schema key. The default implementation of each typed method
/// ignores received values. The default implementation of
/// [`add_value`](Self::add_value) forwards to the typed methods.
///
/// See the [`FromRecord`](macro@FromRecord) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromRecord {
    /// Add a `u8` for a field to the record.
    fn add_u8(&mut self, key: Key, _: u8) {}
    /// Add a `u16` for a field to the record.
    fn add_u16(&mut self, key: Key, _: u16) {}
    /// Add a `u32` for a field to the record.
    fn add_u32(&mut self, key: Key, _: u32) {}
    /// Add a `u64` for a field to the record.
    ///
    /// Only uptime counters are this wide.
    fn add_u64(&mut self, key: Key, _: u64) {}
    /// Add a `f64` for a field to the record.
    ///
    /// This method receives values for every scaled field: coordinates,
    /// precision, and fixed-point readings.
    fn add_f64(&mut self, key: Key, _: f64) {}
    /// Add a firmware [`Version`] for a field to the record.
    fn add_version(&mut self, key: Key, _: Version) {}
    /// Add [`ConfigFlags`] for a field to the record.
    fn add_config_flags(&mut self, key: Key, _: ConfigFlags) {}
    /// Add a [`PayloadMask`] for a field to the record.
    fn add_payload_mask(&mut self, key: Key, _: PayloadMask) {}

    /// Add a value of any type for a field to the record.
    fn add_value(&mut self, key: Key, value: Value) {
        match value {
            Value::U8(v) => self.add_u8(key, v),
            Value::U16(v) => self.add_u16(key, v),
            Value::U32(v) => self.add_u32(key, v),
            Value::U64(v) => self.add_u64(key, v),
            Value::F64(v) => self.add_f64(key, v),
            Value::Version(v) => self.add_version(key, v),
            Value::ConfigFlags(v) => self.add_config_flags(key, v),
            Value::PayloadMask(v) => self.add_payload_mask(key, v),
        }
    }
}
