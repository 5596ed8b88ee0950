// src/store/app_store.rs
//
// Application Store - the "currently displayed" copy of every entity
//
// ARCHITECTURE:
// - One slot per entity category, each with its own data/loading/error
// - Categories are independent: a detail failure never touches the list
// - Written only by the synchronization layer; readers use the selectors
// - Every change is announced as `StoreChanged { category }`
//
// CRITICAL RULES:
// - Events are emitted AFTER the state lock is released
// - Keyed commits only land when their key is still the slot's request key

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cache::RequestKey;
use crate::domain::{GenreCatalog, MovieDetail, MovieImageSet, MovieListPage, MovieVideoSet};
use crate::error::AppError;
use crate::events::{EventBus, StoreChanged};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    List,
    Detail,
    Images,
    Videos,
    Genres,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        EntityCategory::List,
        EntityCategory::Detail,
        EntityCategory::Images,
        EntityCategory::Videos,
        EntityCategory::Genres,
    ];
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityCategory::List => "list",
            EntityCategory::Detail => "detail",
            EntityCategory::Images => "images",
            EntityCategory::Videos => "videos",
            EntityCategory::Genres => "genres",
        };
        write!(f, "{}", name)
    }
}

/// Data plus its independent loading/error pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<AppError>,
    /// Key of the request whose result this slot currently wants
    #[serde(skip)]
    request: Option<RequestKey>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            request: None,
        }
    }
}

impl<T> Slot<T> {
    fn replace(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
        self.request = None;
    }

    fn commit(&mut self, key: &RequestKey, data: T) -> bool {
        if self.request.as_ref() != Some(key) {
            return false;
        }
        self.data = Some(data);
        self.loading = false;
        self.error = None;
        true
    }
}

/// Category-agnostic slot bookkeeping
trait SlotControl {
    fn begin(&mut self, key: RequestKey, retain_data: bool);
    fn fail(&mut self, key: &RequestKey, error: AppError) -> bool;
    fn set_error(&mut self, error: AppError);
    fn clear(&mut self);
    fn loading(&self) -> bool;
    fn error(&self) -> Option<AppError>;
    fn request(&self) -> Option<RequestKey>;
}

impl<T> SlotControl for Slot<T> {
    fn begin(&mut self, key: RequestKey, retain_data: bool) {
        if !retain_data {
            self.data = None;
        }
        self.loading = true;
        self.error = None;
        self.request = Some(key);
    }

    fn fail(&mut self, key: &RequestKey, error: AppError) -> bool {
        if self.request.as_ref() != Some(key) {
            return false;
        }
        // Previous data stays visible
        self.loading = false;
        self.error = Some(error);
        true
    }

    fn set_error(&mut self, error: AppError) {
        self.loading = false;
        self.error = Some(error);
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn loading(&self) -> bool {
        self.loading
    }

    fn error(&self) -> Option<AppError> {
        self.error.clone()
    }

    fn request(&self) -> Option<RequestKey> {
        self.request.clone()
    }
}

/// Full store contents, as handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub list: Slot<MovieListPage>,
    pub detail: Slot<MovieDetail>,
    pub images: Slot<MovieImageSet>,
    pub videos: Slot<MovieVideoSet>,
    pub genres: Slot<GenreCatalog>,
}

impl StoreSnapshot {
    fn control(&self, category: EntityCategory) -> &dyn SlotControl {
        match category {
            EntityCategory::List => &self.list,
            EntityCategory::Detail => &self.detail,
            EntityCategory::Images => &self.images,
            EntityCategory::Videos => &self.videos,
            EntityCategory::Genres => &self.genres,
        }
    }

    fn control_mut(&mut self, category: EntityCategory) -> &mut dyn SlotControl {
        match category {
            EntityCategory::List => &mut self.list,
            EntityCategory::Detail => &mut self.detail,
            EntityCategory::Images => &mut self.images,
            EntityCategory::Videos => &mut self.videos,
            EntityCategory::Genres => &mut self.genres,
        }
    }
}

pub struct AppStore {
    state: RwLock<StoreSnapshot>,
    event_bus: Arc<EventBus>,
}

impl AppStore {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            state: RwLock::new(StoreSnapshot::default()),
            event_bus,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreSnapshot> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreSnapshot> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Announce a change to `category`
    pub fn notify(&self, category: EntityCategory) {
        self.event_bus.emit(StoreChanged::new(category));
    }

    /// Run `handler` after every store change
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(EntityCategory) + Send + Sync + 'static,
    {
        self.event_bus
            .subscribe::<StoreChanged, _>(move |event| handler(event.category));
    }

    // ========================================================================
    // SETTERS (wholesale replacement)
    // ========================================================================

    pub fn set_list(&self, page: MovieListPage) {
        self.write().list.replace(page);
        self.notify(EntityCategory::List);
    }

    pub fn set_detail(&self, detail: MovieDetail) {
        self.write().detail.replace(detail);
        self.notify(EntityCategory::Detail);
    }

    pub fn set_images(&self, images: MovieImageSet) {
        self.write().images.replace(images);
        self.notify(EntityCategory::Images);
    }

    pub fn set_videos(&self, videos: MovieVideoSet) {
        self.write().videos.replace(videos);
        self.notify(EntityCategory::Videos);
    }

    pub fn set_genres(&self, genres: GenreCatalog) {
        self.write().genres.replace(genres);
        self.notify(EntityCategory::Genres);
    }

    /// Record a failure that never reached the network (e.g. validation)
    pub fn set_error(&self, category: EntityCategory, error: AppError) {
        self.write().control_mut(category).set_error(error);
        self.notify(category);
    }

    pub fn clear(&self, category: EntityCategory) {
        self.write().control_mut(category).clear();
        self.notify(category);
    }

    // ========================================================================
    // KEYED UPDATES (used by the synchronization layer)
    // ========================================================================

    /// Mark `category` as waiting for `key`. Does not notify: the caller
    /// calls [`AppStore::notify`] once it has released its own locks.
    pub fn begin_request(&self, category: EntityCategory, key: RequestKey, retain_data: bool) {
        debug!("store {} now wants {}", category, key);
        self.write().control_mut(category).begin(key, retain_data);
    }

    pub fn commit_list(&self, key: &RequestKey, page: MovieListPage) -> bool {
        let committed = self.write().list.commit(key, page);
        self.after_commit(EntityCategory::List, key, committed)
    }

    pub fn commit_detail(&self, key: &RequestKey, detail: MovieDetail) -> bool {
        let committed = self.write().detail.commit(key, detail);
        self.after_commit(EntityCategory::Detail, key, committed)
    }

    pub fn commit_images(&self, key: &RequestKey, images: MovieImageSet) -> bool {
        let committed = self.write().images.commit(key, images);
        self.after_commit(EntityCategory::Images, key, committed)
    }

    pub fn commit_videos(&self, key: &RequestKey, videos: MovieVideoSet) -> bool {
        let committed = self.write().videos.commit(key, videos);
        self.after_commit(EntityCategory::Videos, key, committed)
    }

    pub fn commit_genres(&self, key: &RequestKey, genres: GenreCatalog) -> bool {
        let committed = self.write().genres.commit(key, genres);
        self.after_commit(EntityCategory::Genres, key, committed)
    }

    /// Record a failed fetch for `key`; previous data is kept
    pub fn fail(&self, category: EntityCategory, key: &RequestKey, error: AppError) -> bool {
        let failed = self.write().control_mut(category).fail(key, error);
        self.after_commit(category, key, failed)
    }

    fn after_commit(&self, category: EntityCategory, key: &RequestKey, landed: bool) -> bool {
        if landed {
            self.notify(category);
        } else {
            debug!("store {} ignored completion of {}", category, key);
        }
        landed
    }

    // ========================================================================
    // SELECTORS
    // ========================================================================

    pub fn current_list(&self) -> Option<MovieListPage> {
        self.read().list.data.clone()
    }

    pub fn current_detail(&self) -> Option<MovieDetail> {
        self.read().detail.data.clone()
    }

    pub fn current_images(&self) -> Option<MovieImageSet> {
        self.read().images.data.clone()
    }

    pub fn current_videos(&self) -> Option<MovieVideoSet> {
        self.read().videos.data.clone()
    }

    pub fn genres(&self) -> Option<GenreCatalog> {
        self.read().genres.data.clone()
    }

    pub fn is_loading(&self, category: EntityCategory) -> bool {
        self.read().control(category).loading()
    }

    pub fn error(&self, category: EntityCategory) -> Option<AppError> {
        self.read().control(category).error()
    }

    /// Key of the request `category` is currently waiting on or showing
    pub fn requested_key(&self, category: EntityCategory) -> Option<RequestKey> {
        self.read().control(category).request()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.read().clone()
    }
}
