//! User directory entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use foodbridge_core::types::id::UserId;

use super::role::UserRole;

/// A read-only view of a registered user, as provided by the identity
/// system. Lifecycle operations only consult it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Contact email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Registered role.
    pub role: UserRole,
    /// Whether the account is active.
    pub is_active: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
