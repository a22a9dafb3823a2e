//! Single-byte bitmaps of named flags.
//!
//! Both bitmaps are packed most significant bit first: the first name in a
//! bitmap's `NAMES` list is bit 7, the last is bit 0.

use core::fmt;

use tartan_bitfield::bitfield;

macro_rules! named_flags {
    (
        $(#[$attr:meta])*
        $t:ident { $([$bit:literal] $name:ident),* $(,)? }
    ) => {
        bitfield! {
            $(#[$attr])*
            pub struct $t(u8) {
                $([$bit] pub $name,)*
            }
        }

        impl $t {
            /// Flag names, most significant bit first.
            pub const NAMES: [&'static str; 8] = [$(stringify!($name)),*];

            pub(crate) fn from_byte(byte: u8) -> Self {
                Self(byte)
            }

            /// Iterate over `(name, is_set)` pairs, most significant bit first.
            pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
                let bits = [$(self.$name()),*];
                Self::NAMES.into_iter().zip(bits)
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("{")?;
                for (i, (name, set)) in self.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {}", u8::from(set))?;
                }
                f.write_str("}")
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $t {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap;

                let mut map = s.serialize_map(Some(Self::NAMES.len()))?;
                for (name, set) in self.iter() {
                    map.serialize_entry(name, &u8::from(set))?;
                }
                map.end()
            }
        }
    };
}

named_flags! {
    /// Device configuration switches, sent on the configuration port.
    ConfigFlags {
        [7] adr,
        [6] screensaver,
        [5] screen,
        [4] countermode,
        [3] blescan,
        [2] antenna,
        [1] filter,
        [0] alarm,
    }
}

named_flags! {
    /// Payload kinds enabled on the device, sent on the configuration port.
    PayloadMask {
        [7] gps,
        [6] alarm,
        [5] bme,
        [4] counter,
        [3] sensor1,
        [2] sensor2,
        [1] sensor3,
        [0] battery,
    }
}
