//! Mutation notices.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Human-readable confirmation emitted by a successful mutation, for the
/// presentation layer to display. Observational only; not part of state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
    /// Wrap a confirmation message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The confirmation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
