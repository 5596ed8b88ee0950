// src/cache/mod.rs
//
// Request/response cache keyed by query parameters

pub mod key;
pub mod query_cache;

pub use key::{KeyPrefix, ParamValue, RequestKey};
pub use query_cache::{CacheEntry, CacheStatus, QueryCache};
