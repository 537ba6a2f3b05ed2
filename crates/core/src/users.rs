//! Users

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// Opaque user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing uuid.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Unwrap to the underlying uuid.
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.into_uuid()
    }
}

/// An authenticated identity.
///
/// Users are provisioned once and immutable thereafter; every store mutation
/// records the acting user's display name on the request it touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,

    /// Display name, recorded on every action this user takes.
    pub name: String,

    /// Login key; unique within the directory.
    pub email: String,

    /// Capability role.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn user_id_round_trips_through_uuid() {
        let uuid = Uuid::now_v7();
        let id = UserId::from_uuid(uuid);

        assert_eq!(id.into_uuid(), uuid);
        assert_eq!(Uuid::from(id), uuid);
        assert_eq!(UserId::from(uuid), id);
    }

    #[test]
    fn user_id_display_matches_uuid_display() {
        let uuid = Uuid::now_v7();

        assert_eq!(UserId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn user_serde_round_trip_preserves_identity() -> TestResult {
        let user = User {
            id: UserId::new(),
            name: "Mark Accountant".to_string(),
            email: "accountant@example.com".to_string(),
            role: Role::Accountant,
        };

        let json = serde_json::to_string(&user)?;
        let parsed: User = serde_json::from_str(&json)?;

        assert_eq!(parsed, user);

        Ok(())
    }
}
