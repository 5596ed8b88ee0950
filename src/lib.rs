// src/lib.rs
// MovieHub - movie catalog data synchronization core
//
// Architecture:
// - Domain-centric: entities and filter rules live in `domain`
// - Cache-first: every read goes through the keyed query cache
// - Event-driven: store changes, toasts, busy state and navigation are
//   published on the event bus
// - Explicit: the store is constructed and injected, never global
// - Application Layer: UI boundary (DTOs + commands)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod services;
pub mod store;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    // Filter
    BaseListType,
    CanonicalRequest,
    FilterEvent,
    // Genres
    Genre,
    GenreCatalog,
    GenreId,
    // Movies
    ListKind,
    MovieDetail,
    MovieId,
    // Media
    MovieImageSet,
    MovieListPage,
    MovieSummary,
    MovieVideoSet,
    UiFilterState,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{ApiConfig, StalenessPolicy, SyncConfig};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    NavigationRequested,
    NetworkActivityChanged,
    RequestSuperseded,
    StoreChanged,
    ToastLevel,
    ToastRaised,
};

// ============================================================================
// PUBLIC API - Cache & Store
// ============================================================================

pub use cache::{CacheEntry, CacheStatus, KeyPrefix, ParamValue, QueryCache, RequestKey};
pub use store::{AppStore, EntityCategory, StoreSnapshot};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CatalogSynchronizer,
    DetailOutcome,
    EventBusNavigator,
    MovieService,
    Navigator,
    Payload,
    SearchDebouncer,
    SyncOutcome,
};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{RemoteClient, ReqwestTransport, Transport};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;
