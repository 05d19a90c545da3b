//! Login sessions and credential comparison.

use rankboard_core::StoreId;
use serde::{Deserialize, Serialize};

/// Role attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A logged-in store owner.
    Store,
    /// The back-office administrator.
    Admin,
}

/// The result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The store this session acts for. `None` for an admin session
    /// when no store exists yet to provide admin context.
    pub store_id: Option<StoreId>,

    /// Role of the session.
    pub role: Role,
}

impl Session {
    /// Whether this session may use back-office operations.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Constant-time string comparison to avoid leaking secret prefixes
/// through timing.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
