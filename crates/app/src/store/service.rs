//! Request store service.
//!
//! The store is the sole authority for the request lifecycle: it owns the
//! canonical collections, gates every mutation on the acting user's role,
//! and applies each state transition atomically. Reads go through the pure
//! projections in [`bursar::projections`].

use bursar::{
    memos::{Memo, MemoId},
    projections::{self, Statistics},
    requests::{FundRequest, NewFundRequest, RequestId, Stage, Status, TransitionError},
    roles::Operation,
    users::User,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tracing::{info, warn};

use crate::store::{Notice, StoreError};

/// The canonical in-memory request and memo collection.
///
/// Single-actor and synchronous by design: one identity acts at a time and
/// every mutation applies immediately with no suspension point. Callers that
/// expose the store over a shared service can wrap it in a lock; the store
/// itself does not.
#[derive(Debug)]
pub struct RequestStore {
    currency: &'static Currency,
    requests: Vec<FundRequest>,
    memos: Vec<Memo>,
    index: FxHashMap<RequestId, usize>,
    next_request_id: u64,
    next_memo_id: u64,
}

impl RequestStore {
    /// An empty store denominating amounts in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_seed(currency, Vec::new(), Vec::new())
    }

    /// A store seeded with existing requests and memos, for example from the
    /// persistence collaborator. Id assignment continues above the highest
    /// seeded id.
    #[must_use]
    pub fn with_seed(
        currency: &'static Currency,
        requests: Vec<FundRequest>,
        memos: Vec<Memo>,
    ) -> Self {
        let index = requests
            .iter()
            .enumerate()
            .map(|(position, request)| (request.id, position))
            .collect();

        let next_request_id = requests
            .iter()
            .map(|request| request.id.value())
            .max()
            .unwrap_or(0)
            + 1;

        let next_memo_id = memos.iter().map(|memo| memo.id.value()).max().unwrap_or(0) + 1;

        Self {
            currency,
            requests,
            memos,
            index,
            next_request_id,
            next_memo_id,
        }
    }

    /// The currency all amounts are denominated in.
    #[must_use]
    pub const fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Raise a new fund request on behalf of a staff member.
    ///
    /// # Errors
    ///
    /// - [`StoreError::PermissionDenied`] unless the actor is an accountant
    /// - [`StoreError::Validation`] when the input is malformed
    pub fn create_request(
        &mut self,
        actor: &User,
        input: NewFundRequest,
    ) -> Result<(FundRequest, Notice), StoreError> {
        self.ensure(actor, Operation::CreateRequest)?;

        input.validate()?;

        let id = RequestId::new(self.next_request_id);
        self.next_request_id += 1;

        let request = FundRequest {
            id,
            created_by: actor.id,
            created_by_name: actor.name.clone(),
            requested_for: input.requested_for,
            amount: input.amount,
            purpose: input.purpose,
            description: input.description,
            attachment_url: input.attachment_url,
            created_at: Timestamp::now(),
            stage: Stage::Pending,
        };

        let notice = Notice::new(format!(
            "Request {id} for {} submitted",
            self.format_amount(request.amount)
        ));

        info!(request = %id, actor = %actor.id, "fund request created");

        self.index.insert(id, self.requests.len());
        self.requests.push(request.clone());

        Ok((request, notice))
    }

    /// Approve a pending request.
    ///
    /// # Errors
    ///
    /// - [`StoreError::PermissionDenied`] unless the actor is the CEO
    /// - [`StoreError::NotFound`] when the id is unknown
    /// - [`StoreError::Transition`] unless the request is pending
    pub fn approve(
        &mut self,
        actor: &User,
        id: RequestId,
        comments: Option<String>,
    ) -> Result<(FundRequest, Notice), StoreError> {
        self.ensure(actor, Operation::Approve)?;

        let request = self.get_mut(id)?;
        request.approve(actor.name.clone(), comments, Timestamp::now())?;

        let snapshot = request.clone();

        info!(request = %id, actor = %actor.id, "fund request approved");

        Ok((snapshot, Notice::new(format!("Request {id} approved"))))
    }

    /// Reject a pending request.
    ///
    /// # Errors
    ///
    /// - [`StoreError::PermissionDenied`] unless the actor is the CEO
    /// - [`StoreError::NotFound`] when the id is unknown
    /// - [`StoreError::Transition`] unless the request is pending
    pub fn reject(
        &mut self,
        actor: &User,
        id: RequestId,
        comments: Option<String>,
    ) -> Result<(FundRequest, Notice), StoreError> {
        self.ensure(actor, Operation::Reject)?;

        let request = self.get_mut(id)?;
        request.reject(actor.name.clone(), comments, Timestamp::now())?;

        let snapshot = request.clone();

        info!(request = %id, actor = %actor.id, "fund request rejected");

        Ok((snapshot, Notice::new(format!("Request {id} rejected"))))
    }

    /// Release the funds of an approved request.
    ///
    /// # Errors
    ///
    /// - [`StoreError::PermissionDenied`] unless the actor is an accountant
    /// - [`StoreError::NotFound`] when the id is unknown
    /// - [`StoreError::Transition`] unless the request is approved
    pub fn release(
        &mut self,
        actor: &User,
        id: RequestId,
    ) -> Result<(FundRequest, Notice), StoreError> {
        self.ensure(actor, Operation::Release)?;

        let request = self.get_mut(id)?;
        request.release(actor.name.clone(), Timestamp::now())?;

        let snapshot = request.clone();
        let notice = Notice::new(format!(
            "Funds of {} released for request {id}",
            self.format_amount(snapshot.amount)
        ));

        info!(request = %id, actor = %actor.id, "funds released");

        Ok((snapshot, notice))
    }

    /// Close out a released request.
    ///
    /// # Errors
    ///
    /// - [`StoreError::PermissionDenied`] unless the actor is an accountant
    /// - [`StoreError::NotFound`] when the id is unknown
    /// - [`StoreError::Transition`] unless the request is released
    pub fn mark_done(
        &mut self,
        actor: &User,
        id: RequestId,
    ) -> Result<(FundRequest, Notice), StoreError> {
        self.ensure(actor, Operation::MarkDone)?;

        let request = self.get_mut(id)?;
        request.complete(actor.name.clone(), Timestamp::now())?;

        let snapshot = request.clone();

        info!(request = %id, actor = %actor.id, "fund request completed");

        Ok((snapshot, Notice::new(format!("Request {id} marked done"))))
    }

    /// File a memo from a released request. The source request is read, not
    /// mutated; several memos may reference the same request.
    ///
    /// # Errors
    ///
    /// - [`StoreError::PermissionDenied`] unless the actor is an accountant
    /// - [`StoreError::NotFound`] when the id is unknown
    /// - [`StoreError::Transition`] unless the request is released
    pub fn convert_to_memo(
        &mut self,
        actor: &User,
        id: RequestId,
        text: Option<String>,
    ) -> Result<(Memo, Notice), StoreError> {
        self.ensure(actor, Operation::ConvertToMemo)?;

        let request = self
            .request(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        if request.status() != Status::Released {
            return Err(TransitionError {
                operation: Operation::ConvertToMemo,
                status: request.status(),
            }
            .into());
        }

        let memo_id = MemoId::new(self.next_memo_id);
        self.next_memo_id += 1;

        let memo = Memo::from_request(memo_id, &request, text, actor, Timestamp::now());

        info!(memo = %memo_id, request = %id, actor = %actor.id, "memo filed");

        self.memos.push(memo.clone());

        Ok((memo, Notice::new(format!("Memo {memo_id} filed from request {id}"))))
    }

    /// Read-only snapshot of every request, in insertion order.
    #[must_use]
    pub fn requests(&self) -> &[FundRequest] {
        &self.requests
    }

    /// Read-only snapshot of every memo, in filing order.
    #[must_use]
    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    /// Look up a single request.
    #[must_use]
    pub fn request(&self, id: RequestId) -> Option<&FundRequest> {
        self.index
            .get(&id)
            .and_then(|position| self.requests.get(*position))
    }

    /// Requests in the given status, newest first.
    #[must_use]
    pub fn by_status(&self, status: Status) -> Vec<&FundRequest> {
        projections::by_status(&self.requests, status)
    }

    /// Requests raised for the named staff member, newest first.
    #[must_use]
    pub fn for_staff_member(&self, name: &str) -> Vec<&FundRequest> {
        projections::for_staff_member(&self.requests, name)
    }

    /// Aggregate statistics over the whole ledger.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        projections::statistics(&self.requests)
    }

    fn ensure(&self, actor: &User, operation: Operation) -> Result<(), StoreError> {
        if actor.role.can_perform(operation) {
            return Ok(());
        }

        warn!(actor = %actor.id, role = %actor.role, %operation, "permission denied");

        Err(StoreError::PermissionDenied {
            role: actor.role,
            operation,
        })
    }

    fn get_mut(&mut self, id: RequestId) -> Result<&mut FundRequest, StoreError> {
        let position = *self.index.get(&id).ok_or(StoreError::NotFound(id))?;

        self.requests
            .get_mut(position)
            .ok_or(StoreError::NotFound(id))
    }

    fn format_amount(&self, amount: Decimal) -> String {
        Money::from_decimal(amount, self.currency).to_string()
    }
}
