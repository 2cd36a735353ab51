//! Shared handler state.

use std::sync::Arc;

use plateshop_auth::AuthGate;
use plateshop_store::RecordStore;

use crate::{Result, ServerConfig};

/// Store and auth gate shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Product records.
    pub store: Arc<RecordStore>,
    /// Admin login and token checks.
    pub gate: Arc<AuthGate>,
}

impl AppState {
    /// Wrap an opened store and a configured gate.
    pub fn new(store: RecordStore, gate: AuthGate) -> Self {
        Self {
            store: Arc::new(store),
            gate: Arc::new(gate),
        }
    }

    /// Open the data file (seeding it if absent) and build the auth gate.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let store = RecordStore::open(&config.data_file)?;
        let gate = AuthGate::from_config(&config.auth)?;
        Ok(Self::new(store, gate))
    }
}
