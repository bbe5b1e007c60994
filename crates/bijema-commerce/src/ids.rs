//! Newtype IDs for type-safe identifiers.
//!
//! Records arrive with string ids from the data store, so every id wraps
//! a `String` and serializes transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(AddressId);
define_id!(UserId);
define_id!(StoreId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod_1");
        assert_eq!(id.as_str(), "prod_1");
    }

    #[test]
    fn test_id_from_str() {
        let id: StoreId = "store_2".into();
        assert_eq!(id.to_string(), "store_2");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = UserId::new("user_9");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user_9\"");
        let back: UserId = serde_json::from_str("\"user_9\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_ordering() {
        assert!(ProductId::new("prod_2") > ProductId::new("prod_10"));
    }
}
