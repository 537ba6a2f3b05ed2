//! Projections
//!
//! Pure, stateless queries over the canonical request collection. Results
//! are recomputed on every call; the data volumes involved make caching
//! pointless and consistency is the priority.

use std::cmp::Reverse;

use rust_decimal::Decimal;

use crate::requests::{FundRequest, Status};

/// Requests in the given status, newest first.
#[must_use]
pub fn by_status<'a>(requests: &'a [FundRequest], status: Status) -> Vec<&'a FundRequest> {
    let mut matches: Vec<&FundRequest> = requests
        .iter()
        .filter(|request| request.status() == status)
        .collect();

    sort_newest_first(&mut matches);

    matches
}

/// Requests raised for the named staff member (exact match), newest first.
#[must_use]
pub fn for_staff_member<'a>(requests: &'a [FundRequest], name: &str) -> Vec<&'a FundRequest> {
    let mut matches: Vec<&FundRequest> = requests
        .iter()
        .filter(|request| request.requested_for == name)
        .collect();

    sort_newest_first(&mut matches);

    matches
}

fn sort_newest_first(requests: &mut [&FundRequest]) {
    // Creation timestamps can collide within a batch; ids are strictly
    // monotonic and break the tie.
    requests.sort_by_key(|request| Reverse((request.created_at, request.id)));
}

/// Request counts per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Requests awaiting a CEO ruling.
    pub pending: usize,

    /// Requests approved and awaiting release.
    pub approved: usize,

    /// Requests rejected by the CEO.
    pub rejected: usize,

    /// Requests with funds released.
    pub released: usize,

    /// Requests closed out.
    pub done: usize,
}

impl StatusCounts {
    /// The count for a single status.
    #[must_use]
    pub const fn get(self, status: Status) -> usize {
        match status {
            Status::Pending => self.pending,
            Status::Approved => self.approved,
            Status::Rejected => self.rejected,
            Status::Released => self.released,
            Status::Done => self.done,
        }
    }

    /// Total number of requests counted.
    #[must_use]
    pub const fn total(self) -> usize {
        self.pending + self.approved + self.rejected + self.released + self.done
    }
}

/// Aggregate view over a request collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Counts per lifecycle status.
    pub counts: StatusCounts,

    /// Sum of all request amounts.
    pub total_amount: Decimal,

    /// Sum of amounts whose funds have left the account (released or done).
    pub released_amount: Decimal,
}

impl Statistics {
    /// Funds not yet released: total minus released.
    #[must_use]
    pub fn pending_amount(&self) -> Decimal {
        self.total_amount - self.released_amount
    }
}

/// Computes [`Statistics`] over a request collection.
///
/// Empty input yields zero counts and zero amounts.
#[must_use]
pub fn statistics(requests: &[FundRequest]) -> Statistics {
    let mut counts = StatusCounts::default();
    let mut total_amount = Decimal::ZERO;
    let mut released_amount = Decimal::ZERO;

    for request in requests {
        match request.status() {
            Status::Pending => counts.pending += 1,
            Status::Approved => counts.approved += 1,
            Status::Rejected => counts.rejected += 1,
            Status::Released => counts.released += 1,
            Status::Done => counts.done += 1,
        }

        total_amount += request.amount;

        if matches!(request.status(), Status::Released | Status::Done) {
            released_amount += request.amount;
        }
    }

    Statistics {
        counts,
        total_amount,
        released_amount,
    }
}
