//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;
use tracing::debug;

use super::{Record, slice};

extern crate std;

/// Largest application payload a LoRaWAN uplink can carry.
pub const MAX_PAYLOAD: usize = 242;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error decoding the bytes read.
    #[error(transparent)]
    Decode(#[from] slice::Error),
    /// The reader holds more bytes than an uplink can carry.
    #[error("Reader holds more than {max} bytes.", max = MAX_PAYLOAD)]
    TooLong,
}

/// Decode an uplink received on `port` from a reader, reading to its end.
///
/// At most one byte past [`MAX_PAYLOAD`] is read. A reader holding more than
/// [`MAX_PAYLOAD`] bytes is rejected with [`Error::TooLong`], so the lengths
/// seen by the decoder are those of real uplinks.
///
/// This method is also re-exported as `paxpack::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, port: u8) -> Result<Record, Error> {
    let mut buf = Vec::with_capacity(MAX_PAYLOAD + 1);
    r.take(MAX_PAYLOAD as u64 + 1).read_to_end(&mut buf)?;

    if buf.len() > MAX_PAYLOAD {
        debug!(port, max = MAX_PAYLOAD, "reader holds more than an uplink");
        Err(Error::TooLong)?;
    }

    Ok(slice::decode(&buf, port)?)
}
