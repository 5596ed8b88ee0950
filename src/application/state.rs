// src/application/state.rs

use std::sync::Arc;

use crate::config::{ApiConfig, StalenessPolicy, SyncConfig};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::tmdb::{RemoteClient, ReqwestTransport, Transport};
use crate::services::{
    CatalogSynchronizer, EventBusNavigator, MovieService, Navigator, SearchDebouncer,
};
use crate::store::AppStore;

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing across tasks.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub store: Arc<AppStore>,
    pub movie_service: Arc<MovieService>,
    pub synchronizer: Arc<CatalogSynchronizer>,
    pub search_debouncer: Arc<SearchDebouncer>,
    pub image_base_url: String,
    pub sync_config: SyncConfig,
}

impl AppState {
    /// Wire everything against the real API
    pub fn build(config: &ApiConfig) -> AppResult<Self> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config)?);
        Ok(Self::with_transport(
            transport,
            &config.image_base_url,
            StalenessPolicy::default(),
            SyncConfig::default(),
        ))
    }

    /// Wire everything over an arbitrary transport
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        image_base_url: &str,
        staleness: StalenessPolicy,
        sync_config: SyncConfig,
    ) -> Self {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let client = Arc::new(RemoteClient::new(transport, Arc::clone(&event_bus)));

        // 2. STORE
        let store = Arc::new(AppStore::new(Arc::clone(&event_bus)));

        // 3. SERVICES
        let movie_service = Arc::new(MovieService::new(client, staleness));
        let navigator: Arc<dyn Navigator> = Arc::new(EventBusNavigator::new(Arc::clone(&event_bus)));
        let synchronizer = Arc::new(CatalogSynchronizer::new(
            Arc::clone(&movie_service),
            Arc::clone(&store),
            navigator,
            Arc::clone(&event_bus),
        ));
        let search_debouncer = Arc::new(SearchDebouncer::new(
            Arc::clone(&synchronizer),
            sync_config.search_debounce,
        ));

        Self {
            event_bus,
            store,
            movie_service,
            synchronizer,
            search_debouncer,
            image_base_url: image_base_url.to_string(),
            sync_config,
        }
    }
}
