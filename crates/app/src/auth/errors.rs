//! Identity and session errors.

use thiserror::Error;

/// Identity provider errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account matches the supplied email and password. The error is
    /// deliberately identical for unknown emails and wrong passwords.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Session slot errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the slot file failed.
    #[error("session storage error")]
    Io(#[source] std::io::Error),

    /// Serializing the identity failed.
    #[error("session serialization error")]
    Serialize(#[from] serde_json::Error),
}
