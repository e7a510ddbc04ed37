//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `AccountId` where a
//! `CategoryId` is expected.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A string that is not a valid ledger entity ID.
#[derive(Debug, Error)]
#[error("Invalid {entity} id: {source}")]
pub struct IdParseError {
    /// The entity the ID was meant for, e.g. `"account"`.
    pub entity: &'static str,
    #[source]
    source: uuid::Error,
}

macro_rules! typed_id {
    ($name:ident, $entity:literal) => {
        #[doc = concat!("Unique identifier for a ledger ", $entity, ".")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Entity name used in parse errors.
            pub const ENTITY: &'static str = $entity;

            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self).map_err(|source| IdParseError {
                    entity: $entity,
                    source,
                })
            }
        }
    };
}

typed_id!(UserId, "user");
typed_id!(AccountId, "account");
typed_id!(TransactionId, "transaction");
typed_id!(CategoryId, "category");
typed_id!(BudgetId, "budget");
