//! Strongly-typed identifiers for backend records.
//!
//! The REST backend hands out integer primary keys. `0` marks a record that
//! exists only client-side (e.g. a variant drafted in the admin editor).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog product.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

/// Identifier of a product variant (one color/size combination).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(i64);

macro_rules! impl_backend_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Placeholder id for records not yet persisted by the backend.
            pub const UNSAVED: Self = Self(0);

            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }

            pub const fn is_unsaved(&self) -> bool {
                self.0 == 0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                if raw < 0 {
                    return Err(DomainError::invalid_id(format!("{}: negative id {}", $name, raw)));
                }
                Ok(Self(raw))
            }
        }
    };
}

impl_backend_id!(ProductId, "ProductId");
impl_backend_id!(VariantId, "VariantId");
