// src/store/mod.rs
//
// Application Store - Public API

pub mod app_store;

pub use app_store::{AppStore, EntityCategory, Slot, StoreSnapshot};
