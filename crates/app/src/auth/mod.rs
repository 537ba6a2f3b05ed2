//! Identity and session

mod errors;
mod models;
mod service;
mod session;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use session::*;
