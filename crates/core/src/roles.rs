//! Roles and capabilities

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Login roles recognised by the approval pipeline.
///
/// "Staff" is deliberately absent: staff members never authenticate and are
/// only referenced by name on the requests raised for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Raises requests, releases approved funds, closes requests out and
    /// files memos.
    Accountant,

    /// Rules on pending requests.
    Ceo,
}

/// Mutating operations exposed by the request store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Raise a new fund request.
    CreateRequest,

    /// Approve a pending request.
    Approve,

    /// Reject a pending request.
    Reject,

    /// Release the funds of an approved request.
    Release,

    /// Close out a released request.
    MarkDone,

    /// File a memo from a released request.
    ConvertToMemo,
}

impl Role {
    /// Whether this role may invoke the given store operation.
    ///
    /// This is the single authorization function; every mutating entry point
    /// consults it before touching state.
    #[must_use]
    pub const fn can_perform(self, operation: Operation) -> bool {
        matches!(
            (self, operation),
            (
                Self::Accountant,
                Operation::CreateRequest
                    | Operation::Release
                    | Operation::MarkDone
                    | Operation::ConvertToMemo,
            ) | (Self::Ceo, Operation::Approve | Operation::Reject)
        )
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Accountant => f.write_str("accountant"),
            Self::Ceo => f.write_str("ceo"),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::CreateRequest => f.write_str("create request"),
            Self::Approve => f.write_str("approve"),
            Self::Reject => f.write_str("reject"),
            Self::Release => f.write_str("release funds"),
            Self::MarkDone => f.write_str("mark done"),
            Self::ConvertToMemo => f.write_str("convert to memo"),
        }
    }
}
