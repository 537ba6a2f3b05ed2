//! Memos

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    requests::{FundRequest, RequestId},
    users::{User, UserId},
};

/// Monotonically assigned memo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoId(u64);

impl MemoId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for MemoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "M-{}", self.0)
    }
}

impl From<u64> for MemoId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// An immutable internal record derived from a released request, for audit
/// and filing.
///
/// The billing fields are copied from the request at conversion time, not
/// live-linked; several memos may reference the same request.
#[derive(Debug, Clone, PartialEq)]
pub struct Memo {
    /// Store-assigned identifier.
    pub id: MemoId,

    /// The originating request; a back-reference, not an ownership link.
    pub request_id: RequestId,

    /// Memo body.
    pub text: String,

    /// Amount copied from the request.
    pub amount: Decimal,

    /// Purpose copied from the request.
    pub purpose: String,

    /// Staff name copied from the request.
    pub requested_for: String,

    /// Display name of the filing accountant.
    pub created_by: String,

    /// Identifier of the filing accountant.
    pub created_by_id: UserId,

    /// When the memo was filed.
    pub created_at: Timestamp,
}

impl Memo {
    /// Build a memo from a request, copying the billing fields as a
    /// snapshot. When no body is supplied, [`default_text`] is used.
    #[must_use]
    pub fn from_request(
        id: MemoId,
        request: &FundRequest,
        text: Option<String>,
        created_by: &User,
        now: Timestamp,
    ) -> Self {
        let text =
            text.unwrap_or_else(|| default_text(&request.requested_for, &request.purpose));

        Self {
            id,
            request_id: request.id,
            text,
            amount: request.amount,
            purpose: request.purpose.clone(),
            requested_for: request.requested_for.clone(),
            created_by: created_by.name.clone(),
            created_by_id: created_by.id,
            created_at: now,
        }
    }
}

/// The generated memo body used when no text is supplied.
#[must_use]
pub fn default_text(requested_for: &str, purpose: &str) -> String {
    format!("Release of funds to {requested_for} for {purpose}.")
}
