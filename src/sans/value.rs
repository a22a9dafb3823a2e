//! Values produced by field decoders.

use core::fmt::{self, Write};

use super::flags::{ConfigFlags, PayloadMask};

/// A decoded field value.
///
/// Unsigned integers keep the width of the field they were read from. Scaled
/// fields (coordinates, precision, fixed-point readings) are published as
/// `f64` degrees or units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F64(f64),
    Version(Version),
    ConfigFlags(ConfigFlags),
    PayloadMask(PayloadMask),
}

/// Filler for unused [`Record`](crate::avec::Record) slots. Never decoded.
#[doc(hidden)]
impl Default for Value {
    fn default() -> Self {
        Self::U8(0)
    }
}

impl Value {
    /// The value as a `u64`, if it is an unsigned integer of any width.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v),
            _ => None,
        }
    }

    /// The value as an `f64`, if it is a scaled field.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_version(&self) -> Option<&Version> {
        match self {
            Self::Version(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_config_flags(&self) -> Option<ConfigFlags> {
        match *self {
            Self::ConfigFlags(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_payload_mask(&self) -> Option<PayloadMask> {
        match *self {
            Self::PayloadMask(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::Version(v) => fmt::Display::fmt(v, f),
            Self::ConfigFlags(v) => fmt::Display::fmt(v, f),
            Self::PayloadMask(v) => fmt::Display::fmt(v, f),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::U8(v) => s.serialize_u8(*v),
            Self::U16(v) => s.serialize_u16(*v),
            Self::U32(v) => s.serialize_u32(*v),
            Self::U64(v) => s.serialize_u64(*v),
            Self::F64(v) => s.serialize_f64(*v),
            Self::Version(v) => serde::Serialize::serialize(v, s),
            Self::ConfigFlags(v) => serde::Serialize::serialize(v, s),
            Self::PayloadMask(v) => serde::Serialize::serialize(v, s),
        }
    }
}

/// A firmware version string, stored in a fixed 10-byte field.
///
/// The field is read as a C string: the version ends at the first NUL byte,
/// or fills the whole field if there is none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Version {
    bytes: [u8; Self::WIDTH],
    len: u8,
}

impl Version {
    /// Width of the version field in bytes.
    pub const WIDTH: usize = 10;

    pub(crate) fn from_field(bytes: [u8; Self::WIDTH]) -> Self {
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(Self::WIDTH);

        Self {
            bytes,
            len: len as u8,
        }
    }

    /// The bytes of the version, up to but excluding the first NUL.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// The version as a string slice, if it is valid UTF-8.
    ///
    /// Firmware writes plain ASCII here. See the [`Display`](fmt::Display)
    /// implementation for a rendering that accepts any byte.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }
}

/// Renders each byte as the character with the same code point.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.as_bytes() {
            f.write_char(char::from(b))?;
        }
        Ok(())
    }
}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}
