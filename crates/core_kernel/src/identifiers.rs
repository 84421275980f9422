//! Strongly-typed identifiers for domain entities
//!
//! Storage assigns serial integer keys. Wrapping them in newtypes keeps a
//! reimbursement id from being passed where a user id is expected, and the
//! checked constructors are the only way raw client input becomes an id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Returns true if `value` is a usable identifier
///
/// An identifier must be an integer, strictly greater than zero, and not NaN.
/// Values beyond the range of a Postgres `integer` column are rejected too.
pub fn is_valid_id(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value > 0.0 && value <= f64::from(i32::MAX)
}

/// Parses raw client input (e.g. a path segment) into an identifier value
///
/// The input is read as a number first, so `"7"`, `" 7 "` and `"7.0"` are all
/// accepted while `"0"`, `"-3"`, `"1.5"`, `"NaN"`, `""` and `"abc"` are not.
pub fn parse_raw_id(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| is_valid_id(*value))
        .map(|value| value as i32)
}

macro_rules! define_id {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a storage-assigned key without checking it
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Parses and validates raw client input
            ///
            /// # Errors
            ///
            /// Returns `CoreError::InvalidIdentifier` if the input does not
            /// satisfy the id validity predicate
            pub fn parse(raw: &str) -> Result<Self, CoreError> {
                parse_raw_id(raw)
                    .map(Self)
                    .ok_or_else(|| CoreError::invalid_identifier($kind, raw))
            }

            /// Returns the underlying integer
            pub const fn get(self) -> i32 {
                self.0
            }

            /// Returns true if the wrapped value satisfies the validity predicate
            pub fn is_valid(self) -> bool {
                self.0 > 0
            }

            /// Returns the entity kind used in messages
            pub fn kind() -> &'static str {
                $kind
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = CoreError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                if is_valid_id(value) {
                    Ok(Self(value as i32))
                } else {
                    Err(CoreError::invalid_identifier($kind, value.to_string()))
                }
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

define_id!(ReimbursementId, "reimbursement");
define_id!(UserId, "user");
