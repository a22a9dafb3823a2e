//! States decoding a payload against a schema.

use core::fmt;

use either::Either::{self, Left, Right};
use thiserror::Error;

use super::{
    field::{Field, LengthMismatch},
    value::Value,
};

/// The key of a decoded field: its schema name, or its position in the
/// schema if the entry is unnamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Name(&'static str),
    Index(usize),
}

/// Filler for unused [`Record`](crate::avec::Record) slots. Never decoded.
#[doc(hidden)]
impl Default for Key {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Name(name) => s.serialize_str(name),
            Self::Index(index) => s.serialize_u64(index as u64),
        }
    }
}

/// A field decoder and its name within a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub field: Field,
    pub name: Option<&'static str>,
}

impl Entry {
    pub const fn named(field: Field, name: &'static str) -> Self {
        Self {
            field,
            name: Some(name),
        }
    }

    pub const fn unnamed(field: Field) -> Self {
        Self { field, name: None }
    }
}

/// An ordered list of fields making up a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema<'a>(&'a [Entry]);

/// The input is shorter than the schema being applied to it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Schema requires {required} bytes, input has {actual}.")]
pub struct InsufficientLength {
    pub required: usize,
    pub actual: usize,
}

impl<'a> Schema<'a> {
    pub const fn new(entries: &'a [Entry]) -> Self {
        Self(entries)
    }

    pub const fn entries(&self) -> &'a [Entry] {
        self.0
    }

    /// Sum of the widths of every field in the schema.
    pub const fn required_len(&self) -> usize {
        let mut len = 0;
        let mut i = 0;

        while i < self.0.len() {
            len += self.0[i].field.width();
            i += 1;
        }

        len
    }

    /// Enter the finite-state machine, given the number of bytes available.
    ///
    /// Fails if fewer bytes are available than the schema requires. Bytes
    /// beyond the required length are never requested.
    ///
    /// Returns the first field state, or the end state for an empty schema.
    pub fn begin(self, available: usize) -> Result<Either<FieldState<'a>, End>, InsufficientLength> {
        let required = self.required_len();

        if available < required {
            Err(InsufficientLength {
                required,
                actual: available,
            })?;
        }

        Ok(if self.0.is_empty() {
            Right(End(()))
        } else {
            Left(FieldState {
                entries: self.0,
                index: 0,
            })
        })
    }
}

/// State token to decode the next field of a schema.
#[derive(Debug)]
pub struct FieldState<'a> {
    entries: &'a [Entry],
    index: usize,
}

impl<'a> FieldState<'a> {
    /// The schema entry this state decodes.
    pub fn entry(&self) -> Entry {
        self.entries[self.index]
    }

    /// The number of bytes to advance with.
    pub fn width(&self) -> usize {
        self.entry().field.width()
    }

    /// The key the decoded value is published under.
    pub fn key(&self) -> Key {
        match self.entry().name {
            Some(name) => Key::Name(name),
            None => Key::Index(self.index),
        }
    }

    /// Transition to another state by decoding a field.
    ///
    /// Returns the field's key and value, and a successor state.
    pub fn advance(self, r: &[u8]) -> Result<((Key, Value), Either<Self, End>), LengthMismatch> {
        let key = self.key();
        let value = self.entry().field.decode(r)?;

        let index = self.index + 1;

        let successor = if index < self.entries.len() {
            Left(Self {
                entries: self.entries,
                index,
            })
        } else {
            Right(End(()))
        };

        Ok(((key, value), successor))
    }
}

/// State token marking a fully decoded schema.
#[derive(Debug)]
pub struct End(pub(super) ());
