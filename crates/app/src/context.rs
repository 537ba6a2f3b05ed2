//! App Context

use std::path::PathBuf;
use std::sync::Arc;

use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{
    auth::{DirectoryIdentityService, IdentityService, SessionSlot},
    persistence::{JsonFilePersistence, Persistence, PersistenceError},
    store::RequestStore,
};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the session slot and the store document.
    pub data_dir: PathBuf,

    /// Currency all amounts are denominated in.
    pub currency: &'static Currency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".bursar"),
            currency: iso::NGN,
        }
    }
}

/// Errors raised while wiring the application.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The stored ledger exists but could not be loaded.
    #[error("failed to load the stored ledger")]
    Persistence(#[from] PersistenceError),
}

/// Wired application services.
pub struct AppContext {
    /// The canonical request store.
    pub store: RequestStore,

    /// Identity provider.
    pub identity: Arc<dyn IdentityService>,

    /// Session slot for the authenticated identity.
    pub session: SessionSlot,

    /// Persistence collaborator behind its narrow interface.
    pub persistence: Arc<dyn Persistence>,
}

impl AppContext {
    /// Build the context from configuration, loading any stored ledger.
    ///
    /// # Errors
    ///
    /// Returns an [`AppInitError`] when the stored ledger exists but cannot
    /// be loaded.
    pub fn initialise(config: &Config) -> Result<Self, AppInitError> {
        let persistence = JsonFilePersistence::new(&config.data_dir);
        let snapshot = persistence.load_all()?;

        Ok(Self {
            store: RequestStore::with_seed(config.currency, snapshot.requests, snapshot.memos),
            identity: Arc::new(DirectoryIdentityService::demo()),
            session: SessionSlot::new(&config.data_dir),
            persistence: Arc::new(persistence),
        })
    }

    /// Flush the store to the persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the snapshot cannot be written.
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.persistence
            .save_all(self.store.requests(), self.store.memos())
    }
}
