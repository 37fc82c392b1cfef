//! Identifier and status newtypes
//!
//! All four are opaque strings owned by an external store. Keeping them as
//! distinct types stops a list id from being passed where a card id belongs.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw value without checking it
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Parses a raw value, trimming it and rejecting blanks
            pub fn parse(value: &str) -> CoreResult<Self> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the raw value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a record, assigned by the record store
    RecordId,
    "record"
);

string_id!(
    /// Identifier of a board item, assigned by the board store
    ItemId,
    "item"
);

string_id!(
    /// Identifier of a board list
    ListId,
    "list"
);

string_id!(
    /// Status value of a record (e.g. "New", "Contacted")
    Status,
    "status"
);
