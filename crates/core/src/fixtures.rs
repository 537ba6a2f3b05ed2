//! Fixtures
//!
//! Demo identities and a small seed ledger for the CLI demo mode and tests.

use jiff::{Span, Timestamp};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    requests::{Completion, Decision, FundRequest, Release, RequestId, Stage},
    roles::Role,
    users::{User, UserId},
};

/// The demo login directory.
#[derive(Debug, Clone)]
pub struct DemoDirectory {
    /// The ruling CEO.
    pub ceo: User,

    /// The accountant operating the pipeline.
    pub accountant: User,
}

/// Builds the demo directory: one CEO and one accountant.
///
/// Staff members never log in, so the directory holds no staff entry; staff
/// appear only as `requested_for` names on the seed requests. Ids are fixed
/// so separate process runs agree on who is who.
#[must_use]
pub fn demo_users() -> DemoDirectory {
    DemoDirectory {
        ceo: User {
            id: UserId::from_uuid(Uuid::from_u128(2)),
            name: "Jane CEO".to_string(),
            email: "ceo@example.com".to_string(),
            role: Role::Ceo,
        },
        accountant: User {
            id: UserId::from_uuid(Uuid::from_u128(3)),
            name: "Mark Accountant".to_string(),
            email: "accountant@example.com".to_string(),
            role: Role::Accountant,
        },
    }
}

/// Builds the seed ledger: four requests covering the lifecycle, raised by
/// the given accountant for "John Staff", newest last.
#[must_use]
pub fn demo_requests(accountant: &User, now: Timestamp) -> Vec<FundRequest> {
    let decision = |days: i64, comments: Option<&str>| Decision {
        decided_at: days_ago(now, days),
        decided_by: "Jane CEO".to_string(),
        comments: comments.map(str::to_string),
    };

    let base = |id: u64, days: i64, amount: i64, purpose: &str, description: &str| FundRequest {
        id: RequestId::new(id),
        created_by: accountant.id,
        created_by_name: accountant.name.clone(),
        requested_for: "John Staff".to_string(),
        amount: Decimal::from(amount),
        purpose: purpose.to_string(),
        description: description.to_string(),
        attachment_url: None,
        created_at: days_ago(now, days),
        stage: Stage::Pending,
    };

    let pending = base(
        1,
        2,
        5000,
        "Equipment purchase",
        "New security cameras for the north facility",
    );

    let approved = FundRequest {
        stage: Stage::Approved(decision(5, Some("Approved as requested"))),
        ..base(
            2,
            7,
            2500,
            "Vehicle maintenance",
            "Routine maintenance for patrol vehicles",
        )
    };

    let released = FundRequest {
        stage: Stage::Released {
            decision: decision(18, None),
            release: Release {
                released_at: days_ago(now, 15),
                released_by: accountant.name.clone(),
            },
        },
        ..base(
            3,
            20,
            10_000,
            "Training program",
            "Annual staff security training",
        )
    };

    let rejected = FundRequest {
        stage: Stage::Rejected(decision(9, Some("Please use video conference instead"))),
        ..base(
            4,
            11,
            3000,
            "Travel expenses",
            "Client site visit in Los Angeles",
        )
    };

    vec![pending, approved, released, rejected]
}

/// Builds a single closed-out request, handy for tests needing a terminal
/// `done` entry.
#[must_use]
pub fn demo_done_request(id: u64, accountant: &User, now: Timestamp) -> FundRequest {
    FundRequest {
        id: RequestId::new(id),
        created_by: accountant.id,
        created_by_name: accountant.name.clone(),
        requested_for: "John Staff".to_string(),
        amount: Decimal::from(1200),
        purpose: "Uniform replacement".to_string(),
        description: "Replacement uniforms for gate staff".to_string(),
        attachment_url: None,
        created_at: days_ago(now, 30),
        stage: Stage::Done {
            decision: Decision {
                decided_at: days_ago(now, 28),
                decided_by: "Jane CEO".to_string(),
                comments: None,
            },
            release: Release {
                released_at: days_ago(now, 27),
                released_by: accountant.name.clone(),
            },
            completion: Completion {
                completed_at: days_ago(now, 25),
                completed_by: accountant.name.clone(),
            },
        },
    }
}

fn days_ago(now: Timestamp, days: i64) -> Timestamp {
    now.checked_sub(Span::new().hours(days * 24)).unwrap_or(now)
}
