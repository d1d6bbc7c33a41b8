//! Newtype wrappers for string identifiers, providing compile-time type safety.
//!
//! All newtypes serialize/deserialize as plain strings for backward compatibility.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for String {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Lowercase 64-character hex SHA-256 digest of a canonical dependency tree.
    Checksum
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_display_and_as_ref() {
        let c = Checksum::new("abc123");
        assert_eq!(c.to_string(), "abc123");
        assert_eq!(c.as_str(), "abc123");
        assert_eq!(AsRef::<str>::as_ref(&c), "abc123");
    }

    #[test]
    fn checksum_serde_roundtrip() {
        let c = Checksum::new("deadbeef");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"deadbeef\"");
        let back: Checksum = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn checksum_into_inner() {
        let c = Checksum::new("hash_value".to_owned());
        assert_eq!(c.into_inner(), "hash_value");
    }

    #[test]
    fn checksum_equality_with_str() {
        let c = Checksum::from("same");
        assert!(c == *"same");
        assert!(c != *"diff");
        assert_eq!(c, "same".to_owned());
    }
}
