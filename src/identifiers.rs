//! Strongly-typed identifier newtypes.
//!
//! All types implement `From<&str>`, `From<String>` and `Into<String>`, and
//! travel on the wire as plain strings.
//!
//! ```ignore
//! use billing_models::{ItemId, PriceId};
//!
//! let item: ItemId = "item_4mM2FdUKkBM9qe3Y".into();
//! let price: PriceId = "price_wJ8dYVmKx3EhV2tT".into();
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{errors::Result, raw::FieldValue};

/// Generates a string wrapper newtype.
///
/// Each generated type:
/// - Trims whitespace from input values
/// - Implements `From<&str>`, `From<String>`, `Into<String>` and `Display`
/// - Serializes/deserializes as a plain string, in serde and in raw model data
macro_rules! string_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, trimming surrounding whitespace.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into().trim().to_string())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// Returns true if the identifier is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FieldValue for $name {
            fn to_json(&self) -> Value {
                Value::String(self.0.clone())
            }

            fn from_json(value: &Value, path: &str) -> Result<Self> {
                String::from_json(value, path).map(Self)
            }
        }
    };
}

string_id_type!(ItemId, "Identifier of the item a price bills for.");

string_id_type!(PriceId, "Identifier of a price stored by the billing API.");

string_id_type!(CustomerId, "Billing-side customer identifier.");
