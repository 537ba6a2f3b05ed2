//! On-disk records.
//!
//! The stored shape is flat: one status field plus optional date/actor
//! fields, the shape presentation layers historically persisted. Decoding
//! therefore checks the stage/field combinations that the in-memory tagged
//! union rules out by construction.

use bursar::{
    memos::{Memo, MemoId},
    requests::{Completion, Decision, FundRequest, Release, RequestId, Stage, Status},
    users::UserId,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A stored request violates a lifecycle invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record's optional fields do not match its status.
    #[error("request {id} has fields inconsistent with status {status}")]
    InconsistentStage {
        /// Raw id of the offending record.
        id: u64,

        /// Status the record claims.
        status: Status,
    },
}

/// The complete stored document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    /// All stored requests.
    pub requests: Vec<RequestRecord>,

    /// All stored memos.
    pub memos: Vec<MemoRecord>,
}

/// Flat stored form of a fund request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Raw request id.
    pub id: u64,

    /// Raising accountant's id.
    pub created_by: Uuid,

    /// Raising accountant's display name.
    pub created_by_name: String,

    /// Staff name the funds are for.
    pub requested_for: String,

    /// Requested amount.
    pub amount: Decimal,

    /// Short purpose line.
    pub purpose: String,

    /// Long description.
    pub description: String,

    /// Optional supporting-material reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,

    /// Claimed lifecycle status; validated against the fields below.
    pub status: Status,

    /// Creation timestamp.
    pub date_created: Timestamp,

    /// Ruling timestamp; present once status leaves `pending`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_approved: Option<Timestamp>,

    /// Ruling CEO; present once status leaves `pending`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,

    /// Ruling comments, when any were given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceo_comments: Option<String>,

    /// Release timestamp; present iff status is `released` or `done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_released: Option<Timestamp>,

    /// Releasing accountant; present iff status is `released` or `done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_by: Option<String>,

    /// Completion timestamp; present iff status is `done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_done: Option<Timestamp>,

    /// Closing accountant; present iff status is `done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_by: Option<String>,
}

impl From<&FundRequest> for RequestRecord {
    fn from(request: &FundRequest) -> Self {
        let decision = request.stage.decision();
        let release = request.stage.release();
        let completion = request.stage.completion();

        Self {
            id: request.id.value(),
            created_by: request.created_by.into_uuid(),
            created_by_name: request.created_by_name.clone(),
            requested_for: request.requested_for.clone(),
            amount: request.amount,
            purpose: request.purpose.clone(),
            description: request.description.clone(),
            attachment_url: request.attachment_url.clone(),
            status: request.status(),
            date_created: request.created_at,
            date_approved: decision.map(|d| d.decided_at),
            approved_by: decision.map(|d| d.decided_by.clone()),
            ceo_comments: decision.and_then(|d| d.comments.clone()),
            date_released: release.map(|r| r.released_at),
            released_by: release.map(|r| r.released_by.clone()),
            date_done: completion.map(|c| c.completed_at),
            done_by: completion.map(|c| c.completed_by.clone()),
        }
    }
}

impl TryFrom<RequestRecord> for FundRequest {
    type Error = RecordError;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        let stage = decode_stage(&record)?;

        Ok(Self {
            id: RequestId::new(record.id),
            created_by: UserId::from_uuid(record.created_by),
            created_by_name: record.created_by_name,
            requested_for: record.requested_for,
            amount: record.amount,
            purpose: record.purpose,
            description: record.description,
            attachment_url: record.attachment_url,
            created_at: record.date_created,
            stage,
        })
    }
}

fn decode_stage(record: &RequestRecord) -> Result<Stage, RecordError> {
    let inconsistent = || RecordError::InconsistentStage {
        id: record.id,
        status: record.status,
    };

    let decision = || -> Result<Decision, RecordError> {
        Ok(Decision {
            decided_at: record.date_approved.ok_or_else(inconsistent)?,
            decided_by: record.approved_by.clone().ok_or_else(inconsistent)?,
            comments: record.ceo_comments.clone(),
        })
    };

    let release = || -> Result<Release, RecordError> {
        Ok(Release {
            released_at: record.date_released.ok_or_else(inconsistent)?,
            released_by: record.released_by.clone().ok_or_else(inconsistent)?,
        })
    };

    let completion = || -> Result<Completion, RecordError> {
        Ok(Completion {
            completed_at: record.date_done.ok_or_else(inconsistent)?,
            completed_by: record.done_by.clone().ok_or_else(inconsistent)?,
        })
    };

    let has_decision_fields = record.date_approved.is_some() || record.approved_by.is_some();
    let has_release_fields = record.date_released.is_some() || record.released_by.is_some();
    let has_completion_fields = record.date_done.is_some() || record.done_by.is_some();

    match record.status {
        Status::Pending => {
            if has_decision_fields || has_release_fields || has_completion_fields {
                return Err(inconsistent());
            }

            Ok(Stage::Pending)
        }
        Status::Approved | Status::Rejected => {
            if has_release_fields || has_completion_fields {
                return Err(inconsistent());
            }

            let decision = decision()?;

            Ok(if record.status == Status::Approved {
                Stage::Approved(decision)
            } else {
                Stage::Rejected(decision)
            })
        }
        Status::Released => {
            if has_completion_fields {
                return Err(inconsistent());
            }

            Ok(Stage::Released {
                decision: decision()?,
                release: release()?,
            })
        }
        Status::Done => Ok(Stage::Done {
            decision: decision()?,
            release: release()?,
            completion: completion()?,
        }),
    }
}

/// Stored form of a memo; memos are flat already.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoRecord {
    /// Raw memo id.
    pub id: u64,

    /// Raw id of the originating request.
    pub request_id: u64,

    /// Memo body.
    pub text: String,

    /// Amount copied from the request.
    pub amount: Decimal,

    /// Purpose copied from the request.
    pub purpose: String,

    /// Staff name copied from the request.
    pub requested_for: String,

    /// Filing accountant's display name.
    pub created_by: String,

    /// Filing accountant's id.
    pub created_by_id: Uuid,

    /// Filing timestamp.
    pub created_at: Timestamp,
}

impl From<&Memo> for MemoRecord {
    fn from(memo: &Memo) -> Self {
        Self {
            id: memo.id.value(),
            request_id: memo.request_id.value(),
            text: memo.text.clone(),
            amount: memo.amount,
            purpose: memo.purpose.clone(),
            requested_for: memo.requested_for.clone(),
            created_by: memo.created_by.clone(),
            created_by_id: memo.created_by_id.into_uuid(),
            created_at: memo.created_at,
        }
    }
}

impl From<MemoRecord> for Memo {
    fn from(record: MemoRecord) -> Self {
        Self {
            id: MemoId::new(record.id),
            request_id: RequestId::new(record.request_id),
            text: record.text,
            amount: record.amount,
            purpose: record.purpose,
            requested_for: record.requested_for,
            created_by: record.created_by,
            created_by_id: UserId::from_uuid(record.created_by_id),
            created_at: record.created_at,
        }
    }
}
