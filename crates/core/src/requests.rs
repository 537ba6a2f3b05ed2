//! Fund requests
//!
//! A [`FundRequest`] moves along the lifecycle
//! `pending → approved → released → done`, with `pending → rejected` as the
//! terminal alternative. The lifecycle stage is a tagged union so each stage
//! carries exactly the fields valid for it: an approval date on a pending
//! request is unrepresentable, not merely invalid.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{roles::Operation, users::UserId};

/// Monotonically assigned request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
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

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// Derived lifecycle status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Awaiting a CEO ruling.
    Pending,

    /// Approved and awaiting fund release.
    Approved,

    /// Rejected by the CEO; terminal.
    Rejected,

    /// Funds released and in use.
    Released,

    /// Closed out; terminal.
    Done,
}

impl Status {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Released,
        Self::Done,
    ];
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Approved => f.write_str("approved"),
            Self::Rejected => f.write_str("rejected"),
            Self::Released => f.write_str("released"),
            Self::Done => f.write_str("done"),
        }
    }
}

/// Error parsing a [`Status`] from its lowercase name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "released" => Ok(Self::Released),
            "done" => Ok(Self::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// The CEO's ruling on a pending request.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// When the ruling was made.
    pub decided_at: Timestamp,

    /// Display name of the ruling CEO.
    pub decided_by: String,

    /// Optional comments attached to the ruling.
    pub comments: Option<String>,
}

/// Fund release details.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    /// When the funds were released.
    pub released_at: Timestamp,

    /// Display name of the releasing accountant.
    pub released_by: String,
}

/// Completion details.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// When the request was closed out.
    pub completed_at: Timestamp,

    /// Display name of the closing accountant.
    pub completed_by: String,
}

/// Lifecycle stage of a request.
///
/// Each variant carries only the history valid at that stage, so the
/// invariants hold by construction: a decision exists exactly once the
/// request leaves `Pending`, release details exist iff the request is
/// released or done, and completion details exist iff it is done.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Awaiting a CEO ruling.
    Pending,

    /// Approved and awaiting fund release.
    Approved(Decision),

    /// Rejected; terminal.
    Rejected(Decision),

    /// Funds released and in use.
    Released {
        /// The approval that allowed the release.
        decision: Decision,

        /// Release details.
        release: Release,
    },

    /// Closed out; terminal.
    Done {
        /// The approval that allowed the release.
        decision: Decision,

        /// Release details.
        release: Release,

        /// Completion details.
        completion: Completion,
    },
}

impl Stage {
    /// The derived status of this stage.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Pending => Status::Pending,
            Self::Approved(_) => Status::Approved,
            Self::Rejected(_) => Status::Rejected,
            Self::Released { .. } => Status::Released,
            Self::Done { .. } => Status::Done,
        }
    }

    /// The CEO ruling, once one exists.
    #[must_use]
    pub const fn decision(&self) -> Option<&Decision> {
        match self {
            Self::Pending => None,
            Self::Approved(decision) | Self::Rejected(decision) => Some(decision),
            Self::Released { decision, .. } | Self::Done { decision, .. } => Some(decision),
        }
    }

    /// The release details, once funds have been released.
    #[must_use]
    pub const fn release(&self) -> Option<&Release> {
        match self {
            Self::Released { release, .. } | Self::Done { release, .. } => Some(release),
            _ => None,
        }
    }

    /// The completion details, once the request is closed out.
    #[must_use]
    pub const fn completion(&self) -> Option<&Completion> {
        match self {
            Self::Done { completion, .. } => Some(completion),
            _ => None,
        }
    }

    /// Whether the stage admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Done { .. })
    }

    /// Move `Pending` to `Approved`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the stage is `Pending`.
    pub fn approve(&self, decision: Decision) -> Result<Self, TransitionError> {
        match self {
            Self::Pending => Ok(Self::Approved(decision)),
            _ => Err(TransitionError {
                operation: Operation::Approve,
                status: self.status(),
            }),
        }
    }

    /// Move `Pending` to `Rejected`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the stage is `Pending`.
    pub fn reject(&self, decision: Decision) -> Result<Self, TransitionError> {
        match self {
            Self::Pending => Ok(Self::Rejected(decision)),
            _ => Err(TransitionError {
                operation: Operation::Reject,
                status: self.status(),
            }),
        }
    }

    /// Move `Approved` to `Released`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the stage is `Approved`.
    pub fn release_funds(&self, release: Release) -> Result<Self, TransitionError> {
        match self {
            Self::Approved(decision) => Ok(Self::Released {
                decision: decision.clone(),
                release,
            }),
            _ => Err(TransitionError {
                operation: Operation::Release,
                status: self.status(),
            }),
        }
    }

    /// Move `Released` to `Done`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the stage is `Released`.
    pub fn complete(&self, completion: Completion) -> Result<Self, TransitionError> {
        match self {
            Self::Released { decision, release } => Ok(Self::Done {
                decision: decision.clone(),
                release: release.clone(),
                completion,
            }),
            _ => Err(TransitionError {
                operation: Operation::MarkDone,
                status: self.status(),
            }),
        }
    }
}

/// The requested operation is valid for the actor's role, but the request's
/// current status does not permit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} not allowed while {status}")]
pub struct TransitionError {
    /// Operation that was attempted.
    pub operation: Operation,

    /// Status the request was in at the time.
    pub status: Status,
}

/// Malformed request input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Requested amount must be strictly positive.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// A required free-text field was left empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Input for a new fund request, prior to validation.
#[derive(Debug, Clone)]
pub struct NewFundRequest {
    /// Requested amount; must be strictly positive.
    pub amount: Decimal,

    /// Short statement of what the funds are for.
    pub purpose: String,

    /// Longer free-form description.
    pub description: String,

    /// Name of the staff member the funds are for.
    pub requested_for: String,

    /// Optional reference to supporting material.
    pub attachment_url: Option<String>,
}

impl NewFundRequest {
    /// Check the input against the request invariants.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositiveAmount`] when `amount <= 0`
    /// - [`ValidationError::EmptyField`] when `purpose` or `requested_for`
    ///   is blank
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }

        if self.purpose.trim().is_empty() {
            return Err(ValidationError::EmptyField("purpose"));
        }

        if self.requested_for.trim().is_empty() {
            return Err(ValidationError::EmptyField("requested for"));
        }

        Ok(())
    }
}

/// A single disbursement ask moving through the approval pipeline.
///
/// Requests are never deleted; the accumulated stage history is the audit
/// trail.
#[derive(Debug, Clone, PartialEq)]
pub struct FundRequest {
    /// Store-assigned identifier.
    pub id: RequestId,

    /// The accountant who raised the request.
    pub created_by: UserId,

    /// Display name of the raising accountant.
    pub created_by_name: String,

    /// Name of the staff member the funds are for.
    pub requested_for: String,

    /// Requested amount.
    pub amount: Decimal,

    /// Short statement of what the funds are for.
    pub purpose: String,

    /// Longer free-form description.
    pub description: String,

    /// Optional reference to supporting material.
    pub attachment_url: Option<String>,

    /// When the request was raised; immutable.
    pub created_at: Timestamp,

    /// Current lifecycle stage.
    pub stage: Stage,
}

impl FundRequest {
    /// The derived lifecycle status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.stage.status()
    }

    /// Record a CEO approval.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the request is pending.
    pub fn approve(
        &mut self,
        decided_by: impl Into<String>,
        comments: Option<String>,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        self.stage = self.stage.approve(Decision {
            decided_at: now,
            decided_by: decided_by.into(),
            comments,
        })?;

        Ok(())
    }

    /// Record a CEO rejection.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the request is pending.
    pub fn reject(
        &mut self,
        decided_by: impl Into<String>,
        comments: Option<String>,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        self.stage = self.stage.reject(Decision {
            decided_at: now,
            decided_by: decided_by.into(),
            comments,
        })?;

        Ok(())
    }

    /// Record a fund release.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the request is approved.
    pub fn release(
        &mut self,
        released_by: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        self.stage = self.stage.release_funds(Release {
            released_at: now,
            released_by: released_by.into(),
        })?;

        Ok(())
    }

    /// Close the request out.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] unless the request is released.
    pub fn complete(
        &mut self,
        completed_by: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        self.stage = self.stage.complete(Completion {
            completed_at: now,
            completed_by: completed_by.into(),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::users::UserId;

    use super::*;

    fn pending_request() -> FundRequest {
        FundRequest {
            id: RequestId::new(1),
            created_by: UserId::new(),
            created_by_name: "Mark Accountant".to_string(),
            requested_for: "John Staff".to_string(),
            amount: Decimal::from(5000),
            purpose: "Equipment purchase".to_string(),
            description: "New security cameras for the north facility".to_string(),
            attachment_url: None,
            created_at: Timestamp::now(),
            stage: Stage::Pending,
        }
    }

    #[test]
    fn full_lifecycle_walks_pending_to_done() -> TestResult {
        let mut request = pending_request();
        let now = Timestamp::now();

        request.approve("Jane CEO", Some("ok".to_string()), now)?;
        assert_eq!(request.status(), Status::Approved);

        request.release("Mark Accountant", now)?;
        assert_eq!(request.status(), Status::Released);

        request.complete("Mark Accountant", now)?;
        assert_eq!(request.status(), Status::Done);
        assert!(request.stage.is_terminal());

        Ok(())
    }

    #[test]
    fn lifecycle_history_accumulates_per_stage() -> TestResult {
        let mut request = pending_request();
        let now = Timestamp::now();

        assert!(request.stage.decision().is_none());

        request.approve("Jane CEO", Some("ok".to_string()), now)?;
        let decision = request.stage.decision().ok_or("missing decision")?;
        assert_eq!(decision.decided_by, "Jane CEO");
        assert_eq!(decision.comments.as_deref(), Some("ok"));
        assert!(request.stage.release().is_none());

        request.release("Mark Accountant", now)?;
        let release = request.stage.release().ok_or("missing release")?;
        assert_eq!(release.released_by, "Mark Accountant");
        assert!(request.stage.completion().is_none());

        request.complete("Mark Accountant", now)?;
        let completion = request.stage.completion().ok_or("missing completion")?;
        assert_eq!(completion.completed_by, "Mark Accountant");

        // The decision survives every later stage.
        assert_eq!(
            request.stage.decision().map(|d| d.decided_by.as_str()),
            Some("Jane CEO")
        );

        Ok(())
    }

    #[test]
    fn approve_fails_once_not_pending() -> TestResult {
        let mut request = pending_request();
        let now = Timestamp::now();

        request.approve("Jane CEO", None, now)?;

        let err = request
            .approve("Jane CEO", None, now)
            .expect_err("second approval must fail");

        assert_eq!(
            err,
            TransitionError {
                operation: Operation::Approve,
                status: Status::Approved,
            }
        );

        Ok(())
    }

    #[test]
    fn rejected_is_terminal() -> TestResult {
        let mut request = pending_request();
        let now = Timestamp::now();

        request.reject("Jane CEO", Some("denied".to_string()), now)?;
        assert_eq!(request.status(), Status::Rejected);
        assert!(request.stage.is_terminal());

        let err = request
            .approve("Jane CEO", None, now)
            .expect_err("approving a rejected request must fail");
        assert_eq!(err.status, Status::Rejected);

        let err = request
            .release("Mark Accountant", now)
            .expect_err("releasing a rejected request must fail");
        assert_eq!(err.operation, Operation::Release);

        Ok(())
    }

    #[test]
    fn release_requires_approved() {
        let mut request = pending_request();
        let now = Timestamp::now();

        let err = request
            .release("Mark Accountant", now)
            .expect_err("releasing a pending request must fail");

        assert_eq!(
            err,
            TransitionError {
                operation: Operation::Release,
                status: Status::Pending,
            }
        );
    }

    #[test]
    fn complete_requires_released() -> TestResult {
        let mut request = pending_request();
        let now = Timestamp::now();

        request.approve("Jane CEO", None, now)?;

        let err = request
            .complete("Mark Accountant", now)
            .expect_err("completing an approved request must fail");

        assert_eq!(
            err,
            TransitionError {
                operation: Operation::MarkDone,
                status: Status::Approved,
            }
        );

        Ok(())
    }

    #[test]
    fn validation_rejects_non_positive_amounts() {
        let mut input = NewFundRequest {
            amount: Decimal::ZERO,
            purpose: "Equipment".to_string(),
            description: String::new(),
            requested_for: "John Staff".to_string(),
            attachment_url: None,
        };

        assert_eq!(
            input.validate(),
            Err(ValidationError::NonPositiveAmount(Decimal::ZERO))
        );

        input.amount = Decimal::from(-10);
        assert!(matches!(
            input.validate(),
            Err(ValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn validation_rejects_blank_required_fields() {
        let input = NewFundRequest {
            amount: Decimal::from(100),
            purpose: "  ".to_string(),
            description: String::new(),
            requested_for: "John Staff".to_string(),
            attachment_url: None,
        };

        assert_eq!(input.validate(), Err(ValidationError::EmptyField("purpose")));

        let input = NewFundRequest {
            purpose: "Equipment".to_string(),
            requested_for: String::new(),
            ..input
        };

        assert_eq!(
            input.validate(),
            Err(ValidationError::EmptyField("requested for"))
        );
    }

    #[test]
    fn validation_accepts_well_formed_input() -> TestResult {
        let input = NewFundRequest {
            amount: Decimal::from(100),
            purpose: "Equipment".to_string(),
            description: "Cameras".to_string(),
            requested_for: "John Staff".to_string(),
            attachment_url: Some("files/quote.pdf".to_string()),
        };

        input.validate()?;

        Ok(())
    }

    #[test]
    fn status_parses_from_lowercase_name() -> TestResult {
        for status in Status::ALL {
            assert_eq!(status.to_string().parse::<Status>()?, status);
        }

        assert!("shipped".parse::<Status>().is_err());

        Ok(())
    }

    #[test]
    fn request_id_displays_with_hash_prefix() {
        assert_eq!(RequestId::new(42).to_string(), "#42");
    }
}
