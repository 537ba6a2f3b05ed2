//! Session slot.
//!
//! The authenticated identity (never the request data) persists in a single
//! key-value slot keyed `user`, serialized as JSON. A corrupt payload is
//! discarded on read, not fatal.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use bursar::users::User;
use tracing::warn;

use crate::auth::SessionError;

const SESSION_KEY: &str = "user";

/// File-backed session slot.
#[derive(Debug, Clone)]
pub struct SessionSlot {
    path: PathBuf,
}

impl SessionSlot {
    /// A slot stored under the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{SESSION_KEY}.json")),
        }
    }

    /// Read the stored identity, if any.
    ///
    /// A corrupt payload is logged, removed, and reported as `None`.
    #[must_use]
    pub fn load(&self) -> Option<User> {
        let contents = fs::read_to_string(&self.path).ok()?;

        match serde_json::from_str(&contents) {
            Ok(user) => Some(user),
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "discarding corrupt session slot"
                );

                if let Err(error) = fs::remove_file(&self.path) {
                    warn!(%error, "failed to remove corrupt session slot");
                }

                None
            }
        }
    }

    /// Persist the identity.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the slot cannot be serialized or
    /// written.
    pub fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(SessionError::Io)?;
        }

        let json = serde_json::to_string_pretty(user)?;

        fs::write(&self.path, json).map_err(SessionError::Io)
    }

    /// End the session. Clearing an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the slot file cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionError::Io(error)),
        }
    }
}
