//! Primitive field decoders.

use core::fmt;

use thiserror::Error;
use zerocopy::{
    FromBytes,
    byteorder::{big_endian, little_endian},
};

use super::{
    flags::{ConfigFlags, PayloadMask},
    value::{Value, Version},
};

/// A fixed-width field decoder.
///
/// Integers are read little-endian unless noted otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit uptime counter.
    ///
    /// Read with full 64-bit width. Decoders built on a 32-bit accumulator
    /// truncate counters past `u32::MAX`; this one does not.
    Uptime,
    /// Unsigned 32-bit integer of millionths of a degree.
    LatLng,
    /// Unsigned 16-bit horizontal dilution of precision, in hundredths.
    Hdop,
    /// Unsigned 16-bit hundredths, rounded to one decimal place.
    UFloat,
    /// Unsigned 16-bit tenths, rounded to one decimal place.
    Pressure,
    /// Signed 16-bit hundredths, rounded to one decimal place.
    ///
    /// Unlike every other field, this one is big-endian.
    Float,
    /// NUL-terminated string in a 10-byte field.
    Version,
    /// Bitmap of [`ConfigFlags`].
    ConfigFlags,
    /// Bitmap of [`PayloadMask`] flags.
    PayloadMask,
}

/// A field decoder received a slice of the wrong length.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} must have exactly {expected} bytes, got {actual}.")]
pub struct LengthMismatch {
    pub field: Field,
    pub expected: usize,
    pub actual: usize,
}

impl Field {
    /// Number of bytes this field occupies.
    pub const fn width(self) -> usize {
        match self {
            Self::Uint8 | Self::ConfigFlags | Self::PayloadMask => 1,
            Self::Uint16 | Self::Hdop | Self::UFloat | Self::Pressure | Self::Float => 2,
            Self::Uint32 | Self::LatLng => 4,
            Self::Uptime => 8,
            Self::Version => Version::WIDTH,
        }
    }

    /// Decode a field from a slice of exactly [`width`](Self::width) bytes.
    pub fn decode(self, r: &[u8]) -> Result<Value, LengthMismatch> {
        Ok(match self {
            Self::Uint8 => Value::U8(self.read(r)?),
            Self::Uint16 => Value::U16(self.read::<little_endian::U16>(r)?.get()),
            Self::Uint32 => Value::U32(self.read::<little_endian::U32>(r)?.get()),
            Self::Uptime => Value::U64(self.read::<little_endian::U64>(r)?.get()),
            Self::LatLng => {
                let x = self.read::<little_endian::U32>(r)?.get();
                Value::F64(f64::from(x) / 1e6)
            }
            Self::Hdop => {
                let x = self.read::<little_endian::U16>(r)?.get();
                Value::F64(f64::from(x) / 100.0)
            }
            Self::UFloat => {
                let x = self.read::<little_endian::U16>(r)?.get();
                Value::F64(one_decimal(x.into(), 100))
            }
            Self::Pressure => {
                let x = self.read::<little_endian::U16>(r)?.get();
                Value::F64(one_decimal(x.into(), 10))
            }
            Self::Float => {
                let x = self.read::<big_endian::I16>(r)?.get();
                Value::F64(one_decimal(x.into(), 100))
            }
            Self::Version => Value::Version(Version::from_field(self.read(r)?)),
            Self::ConfigFlags => Value::ConfigFlags(ConfigFlags::from_byte(self.read(r)?)),
            Self::PayloadMask => Value::PayloadMask(PayloadMask::from_byte(self.read(r)?)),
        })
    }

    /// The name used for this field in device documentation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uptime => "uptime",
            Self::LatLng => "latLng",
            Self::Hdop => "hdop",
            Self::UFloat => "ufloat",
            Self::Pressure => "pressure",
            Self::Float => "float",
            Self::Version => "version",
            Self::ConfigFlags => "bitmap1",
            Self::PayloadMask => "bitmap2",
        }
    }

    fn read<T: FromBytes>(self, r: &[u8]) -> Result<T, LengthMismatch> {
        if r.len() != self.width() {
            Err(LengthMismatch {
                field: self,
                expected: self.width(),
                actual: r.len(),
            })?;
        }

        T::read_from_bytes(r).map_err(|_| LengthMismatch {
            field: self,
            expected: size_of::<T>(),
            actual: r.len(),
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Divide `raw` by `divisor`, then round the `f64` quotient to one decimal
/// place.
///
/// Rounding works on the exact binary value of the quotient, with exact ties
/// going to the larger magnitude. This is how network-server decoders format
/// these fields, so a quotient such as `0.15` (stored just below it) rounds
/// down to `0.1`.
fn one_decimal(raw: i32, divisor: i32) -> f64 {
    let quotient = f64::from(raw) / f64::from(divisor);

    let magnitude = match tenths(quotient.abs()) {
        0 => return 0.0,
        n => n as f64 / 10.0,
    };

    if quotient < 0.0 { -magnitude } else { magnitude }
}

/// Round a finite, non-negative `f64` to a whole number of tenths, ties up.
fn tenths(x: f64) -> u64 {
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7FF) as i32;
    if exponent == 0 {
        return 0;
    }

    // x == mantissa * 2^shift, exactly.
    let mantissa = u128::from((bits & ((1 << 52) - 1)) | (1 << 52));
    let shift = exponent - 1075;

    if shift >= 0 {
        return (mantissa << shift) as u64 * 10;
    }

    let shift = shift.unsigned_abs();
    if shift > 64 {
        return 0;
    }

    ((mantissa * 10 + (1 << (shift - 1))) >> shift) as u64
}
