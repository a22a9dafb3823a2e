//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;
use tracing::{debug, trace};

use crate::sans::{
    field::LengthMismatch,
    port,
    schema::{InsufficientLength, Schema},
};

use super::{FromRecord, FromUplinks, MAX_FIELDS, Record};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A field decoder received a window of the wrong length.
    #[error("Malformed field window: {0}")]
    LengthMismatch(#[from] LengthMismatch),
    /// The payload is shorter than its schema.
    #[error("Payload too short: {0}")]
    InsufficientLength(#[from] InsufficientLength),
    /// No schema exists for the port and payload length.
    #[error("No schema for a {len}-byte payload on port {port}.")]
    NoSchemaMatched { port: u8, len: usize },
    /// The schema has more fields than a [`Record`] can hold.
    #[error("Schema has {fields} fields, but a record holds at most {max}.", max = MAX_FIELDS)]
    Capacity { fields: usize },
}

/// Decode an uplink received on `port` into a record.
///
/// An empty payload decodes to an empty record on any port. Bytes beyond the
/// selected schema's length are ignored.
///
/// This method is also re-exported as `paxpack::avec::decode_slice`.
pub fn decode(r: &[u8], port: u8) -> Result<Record, Error> {
    if r.is_empty() {
        return Ok(Record::default());
    }

    decode_schema(r, select(port, r.len())?)
}

/// Decode a payload against a caller-supplied schema into a record.
///
/// Unnamed schema entries are keyed by their position.
pub fn decode_schema(r: &[u8], schema: Schema) -> Result<Record, Error> {
    let fields = schema.entries().len();
    if fields > MAX_FIELDS {
        Err(Error::Capacity { fields })?;
    }

    let mut record = Record::default();
    publish(r, schema, &mut record)?;

    Ok(record)
}

/// Decode an uplink received on `port`, publishing to a receiver.
///
/// The payload's length is checked against its schema before any field is
/// published. Empty payloads carry no fields and are not published.
pub fn decode_into(r: &[u8], port: u8, o: &mut impl FromUplinks) -> Result<(), Error> {
    if r.is_empty() {
        return Ok(());
    }

    let schema = select(port, r.len())?;

    // Check the length before asking for a receiver, so a short payload
    // leaves the receiver set untouched.
    let required = schema.required_len();
    if r.len() < required {
        debug!(port, required, len = r.len(), "uplink shorter than schema");
        Err(InsufficientLength {
            required,
            actual: r.len(),
        })?;
    }

    if let Some(o) = o.add_uplink(port) {
        publish(r, schema, o)?;
    }

    Ok(())
}

fn select(port: u8, len: usize) -> Result<Schema<'static>, Error> {
    port::select(port, len).ok_or(Error::NoSchemaMatched { port, len })
}

fn publish<O: FromRecord + ?Sized>(r: &[u8], schema: Schema, o: &mut O) -> Result<(), Error> {
    let i = &mut 0; // Offset of the next field window.

    let mut state = match schema.begin(r.len())? {
        Left(state) => state,
        Right(_) => return Ok(()),
    };

    loop {
        let width = state.width();
        let ((key, value), successor) = state.advance(take(r, i, width)?)?;

        trace!(%key, %value, offset = *i - width, "decoded field");
        o.add_value(key, value);

        state = match successor {
            Left(state) => state,
            Right(_) => break,
        };
    }

    Ok(())
}

/// Take a window of `n` bytes from an offset in a slice, advancing the offset.
fn take<'a>(r: &'a [u8], i: &mut usize, n: usize) -> Result<&'a [u8], Error> {
    let s = *i;
    *i += n;

    r.get(s..*i).ok_or_else(|| {
        InsufficientLength {
            required: *i,
            actual: r.len(),
        }
        .into()
    })
}
