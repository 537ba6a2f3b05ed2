//! Request store

mod errors;
mod notices;
mod service;

pub use errors::*;
pub use notices::*;
pub use service::*;
