//! Bursar
//!
//! Bursar is a role-based fund-request approval engine: accountants raise
//! disbursement requests on behalf of staff, the CEO rules on them, and
//! accountants release the approved funds, close requests out, and file
//! memos for the records.

pub mod export;
pub mod fixtures;
pub mod memos;
pub mod projections;
pub mod requests;
pub mod roles;
pub mod users;
