// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod movie_service;
pub mod navigation;
pub mod search_debouncer;
pub mod sync_service;


// Re-export all services and their types
pub use movie_service::{MovieService, Payload};

pub use navigation::{EventBusNavigator, Navigator};

pub use search_debouncer::SearchDebouncer;

pub use sync_service::{CatalogSynchronizer, DetailOutcome, SyncOutcome};
