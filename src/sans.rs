//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals, or that decode uplinks against their own schemas. See
//! [`crate::avec`] for implementations covering common decoding patterns.
//!
//! # Architecture
//!
//! A [`Schema`](schema::Schema) is an ordered list of fixed-width
//! [`Field`](field::Field) decoders, each optionally named. Calling
//! [`begin`](schema::Schema::begin) with the number of bytes available checks
//! the schema's required length up front, and returns a non-copy state token
//! for the first field. Advance the token with exactly
//! [`width`](schema::FieldState::width) bytes to receive the field's key and
//! value, along with a successor state.
//!
//! Schemas for the payloads sent by the device firmware are listed in the
//! [`port`] module, and are selected from a port number and payload length by
//! [`port::select`].
//!
//! Some areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Slicing consecutive, non-overlapping windows from the payload, starting
//! at offset zero.
//!
//! - Discarding any trailing bytes beyond the schema's required length.
//!
//! Implementers are recommended to begin by studying the decoder in
//! [`crate::avec::slice`].

pub mod field;
pub mod flags;
pub mod port;
pub mod schema;
pub mod value;
