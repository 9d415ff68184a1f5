//! Application state for the HRMS API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::config::ConfigLoader;
use crate::store::HrmsStore;

/// Shared application state.
///
/// Holds the loaded configuration, the in-memory store behind a read/write
/// lock, and the clock handlers use for "now".
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// Every HRMS record.
    store: Arc<RwLock<HrmsStore>>,
    /// Source of the current instant.
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates the state from a configuration loader, seeding the store and
    /// using the system clock.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates the state with a specific clock.
    pub fn with_clock(config: ConfigLoader, clock: impl Clock + 'static) -> Self {
        let store = HrmsStore::from_config(&config);
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            clock: Arc::new(clock),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared store.
    pub fn store(&self) -> &RwLock<HrmsStore> {
        &self.store
    }

    /// Returns the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let config = ConfigLoader::load("./config/hrms").expect("Failed to load config");
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        let state = AppState::with_clock(config, FixedClock(instant));
        let clone = state.clone();

        assert_eq!(clone.clock().now(), instant);
        assert!(Arc::ptr_eq(&state.store, &clone.store));
        assert_eq!(state.config().seed().employees.len(), 8);
    }
}
