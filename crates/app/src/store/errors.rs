//! Request store errors.

use bursar::{
    requests::{RequestId, TransitionError, ValidationError},
    roles::{Operation, Role},
};
use thiserror::Error;

/// Typed denials returned by the request store.
///
/// Every mutation either fully applies or returns one of these; there are no
/// partial updates and no silent no-ops. None is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The actor's role does not grant the requested operation.
    #[error("permission denied: {role} may not {operation}")]
    PermissionDenied {
        /// Role of the acting user.
        role: Role,

        /// Operation the actor attempted.
        operation: Operation,
    },

    /// The referenced request is absent from the store.
    #[error("request {0} not found")]
    NotFound(RequestId),

    /// The operation is valid for the actor but the request's current status
    /// does not permit it.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The supplied input is malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
