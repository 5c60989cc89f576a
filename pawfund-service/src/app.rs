/// Application assembly
///
/// Wires the configuration, the local store and the three services into
/// one state object the presentation layer holds on to. The services
/// share a single store handle and a single session context.

use std::sync::Arc;
use tracing::info;

use crate::account::AccountService;
use crate::config::Config;
use crate::listing::ListingService;
use crate::profile::ProfileService;
use pawfund_shared::store::{LocalStore, StoreError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// The local store backing every service
    pub store: Arc<LocalStore>,

    /// Registration, login and session resolution
    pub accounts: AccountService,

    /// Pet profile capture and the photo album
    pub profiles: ProfileService,

    /// Public browsing and seeker matching
    pub listings: ListingService,
}

impl AppState {
    /// Builds the application state from a configuration
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store directory cannot be created.
    pub fn new(config: Config) -> Result<Self, StoreError> {
        let store = Arc::new(LocalStore::open(&config.store.data_dir)?);
        info!(data_dir = %config.store.data_dir.display(), "Opened local store");

        let accounts = AccountService::new(store.clone(), &config.account);
        let profiles = ProfileService::new(store.clone(), &config.ingest);
        let listings = ListingService::new(store.clone());

        Ok(Self {
            config: Arc::new(config),
            store,
            accounts,
            profiles,
            listings,
        })
    }

    /// Builds the application state from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the environment is malformed or the store
    /// directory cannot be created.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::new(config)?)
    }
}
