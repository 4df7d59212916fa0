//! Service façade: owns the store, config, clock, and password seam.
//!
//! Request handlers and the sweep scheduler talk to WalletService; the
//! store stays an internal detail. Operations are implemented across
//! registration.rs, referral.rs, funds.rs, and bonus.rs.

use crate::{
    clock::{Clock, SystemClock},
    config::WalletConfig,
    error::WalletResult,
    password::{PasswordVerifier, PlaintextVerifier},
    store::WalletStore,
};
use std::sync::Arc;

pub struct WalletService {
    pub(crate) store:    WalletStore,
    pub(crate) config:   WalletConfig,
    pub(crate) clock:    Arc<dyn Clock>,
    pub(crate) verifier: Box<dyn PasswordVerifier>,
}

impl WalletService {
    pub fn new(store: WalletStore, config: WalletConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
            verifier: Box::new(PlaintextVerifier),
        }
    }

    /// Open a file-backed service on the system clock, migrated and ready.
    pub fn open(path: &str, config: WalletConfig) -> WalletResult<Self> {
        let store = WalletStore::open(path)?;
        store.migrate()?;
        Ok(Self::new(store, config, Arc::new(SystemClock)))
    }

    /// In-memory service (used in tests, with an injected clock).
    pub fn in_memory(config: WalletConfig, clock: Arc<dyn Clock>) -> WalletResult<Self> {
        let store = WalletStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(store, config, clock))
    }

    pub fn store(&self) -> &WalletStore {
        &self.store
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }
}
