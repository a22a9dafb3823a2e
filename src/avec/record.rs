//! Named collection of decoded fields.

use tinyvec::ArrayVec;

use super::{FromRecord, Key, Value};

/// Most fields any built-in schema decodes to.
pub const MAX_FIELDS: usize = 10;

/// The fields decoded from a single uplink, in schema order.
///
/// Equality ignores field order.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: ArrayVec<[(Key, Value); MAX_FIELDS]>,
}

impl Record {
    /// Look up a value by field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.iter()
            .find(|(k, _)| matches!(k, Key::Name(n) if *n == name))
            .map(|(_, v)| v)
    }

    /// Look up a value by key.
    pub fn get_key(&self, key: Key) -> Option<&Value> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &Value)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects every value. A value for a key already present replaces the
/// earlier one; values past [`MAX_FIELDS`] distinct keys are dropped.
impl FromRecord for Record {
    fn add_value(&mut self, key: Key, value: Value) {
        if let Some((_, v)) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            *v = value;
        } else {
            let _ = self.fields.try_push((key, value));
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get_key(k) == Some(v))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = s.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key, value)?;
        }
        map.end()
    }
}
