#![no_std]

//! A decoder for the packed LoRaWAN uplink payloads of Paxcounter devices.
//!
//! Each uplink is a fixed-layout concatenation of little-endian fields, with
//! no framing. The port an uplink arrives on, and for counter payloads its
//! length, select the layout. Decoding is a pure function of the payload and
//! port: there is no state, allocation, or I/O.
//!
//! Most users should begin with the functions and derive macros in the
//! [`avec`] module. To decode against custom schemas, or to drive decoding
//! field by field, see the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoder (default).
//! - `serde`: implement `Serialize` for records and values.
//!
//! The JSON output tests need the `serde` feature, which is off by default.
//! Run the full suite with `cargo test --all-features`.

pub mod avec;
pub mod sans;
