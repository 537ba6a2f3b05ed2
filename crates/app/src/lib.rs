//! Bursar application services: the request store, identity provider,
//! session slot, persistence collaborator, and the CLI that presents them.

pub mod auth;
pub mod cli;
pub mod context;
pub mod persistence;
pub mod store;
