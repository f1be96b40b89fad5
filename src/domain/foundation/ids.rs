//! Strongly-typed identifier value objects.
//!
//! Every row in the ledger is keyed by one of these. They are all UUID-backed
//! and serialize transparently so they can cross the storage boundary as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generates a UUID-backed identifier newtype with the standard constructors.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", stringify!($name), ".")]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", stringify!($name), " from an existing UUID.")]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Identifier of an isolated organization (one gym, one club).
    TenantId
);

uuid_id!(
    /// Unique identifier for a member.
    MemberId
);

uuid_id!(
    /// Unique identifier for a membership plan in a tenant's catalog.
    PlanId
);

uuid_id!(
    /// Unique identifier for a recorded payment.
    PaymentId
);

uuid_id!(
    /// Unique identifier for an audit trail entry.
    AuditEventId
);
