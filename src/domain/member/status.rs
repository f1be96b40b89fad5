//! Member status.

use serde::{Deserialize, Serialize};

/// Whether a member currently participates in billing.
///
/// A recorded payment always leaves the member `Active`; operators can
/// deactivate and reactivate explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    /// Stable lowercase name, used in storage and audit payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, MemberStatus::Active)
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
