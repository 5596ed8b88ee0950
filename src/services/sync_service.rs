// src/services/sync_service.rs
//
// Catalog Synchronizer - keeps the application store in step with the UI
//
// ARCHITECTURE:
// - Owns the list filter state (search / tab / genre / page)
// - Every event recomputes the single canonical list request and issues it
// - Fetches run as spawned tasks; the store only accepts a completion whose
//   key is still the one it is waiting for (supersession, not cancellation)
// - Detail activation navigates first, then loads detail, images and videos
//   concurrently
//
// CRITICAL RULES:
// - The filter lock is never held while events are emitted
// - A failed fetch records an error and keeps the previous data

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::cache::RequestKey;
use crate::domain::{BaseListType, CanonicalRequest, FilterEvent, GenreId, MovieId, UiFilterState};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RequestSuperseded, ToastRaised};
use crate::services::movie_service::MovieService;
use crate::services::navigation::Navigator;
use crate::store::{AppStore, EntityCategory};

/// How one fetch ended, from the store's point of view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "snake_case")]
pub enum SyncOutcome {
    Committed,
    /// The UI moved on before the fetch completed; nothing was written
    Superseded,
    Failed(AppError),
}

impl SyncOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SyncOutcome::Committed)
    }
}

/// Outcomes of the three fetches behind one detail activation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailOutcome {
    pub movie_id: MovieId,
    pub detail: SyncOutcome,
    pub images: SyncOutcome,
    pub videos: SyncOutcome,
}

pub struct CatalogSynchronizer {
    movies: Arc<MovieService>,
    store: Arc<AppStore>,
    navigator: Arc<dyn Navigator>,
    event_bus: Arc<EventBus>,
    filter: Mutex<UiFilterState>,
    detail_target: Mutex<Option<MovieId>>,
}

impl CatalogSynchronizer {
    pub fn new(
        movies: Arc<MovieService>,
        store: Arc<AppStore>,
        navigator: Arc<dyn Navigator>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            movies,
            store,
            navigator,
            event_bus,
            filter: Mutex::new(UiFilterState::default()),
            detail_target: Mutex::new(None),
        }
    }

    fn filter(&self) -> MutexGuard<'_, UiFilterState> {
        self.filter.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn detail_target(&self) -> MutexGuard<'_, Option<MovieId>> {
        self.detail_target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ========================================================================
    // LIST EVENTS
    // ========================================================================

    /// An empty keyword falls back to the current base tab
    pub fn on_search(&self, keyword: &str) -> AppResult<JoinHandle<SyncOutcome>> {
        self.dispatch(FilterEvent::Search(keyword.to_string()))
    }

    pub fn on_tab_change(&self, list_type: BaseListType) -> AppResult<JoinHandle<SyncOutcome>> {
        self.dispatch(FilterEvent::TabChange(list_type))
    }

    pub fn on_genre_click(&self, genre_id: GenreId) -> AppResult<JoinHandle<SyncOutcome>> {
        self.dispatch(FilterEvent::GenreClick(genre_id))
    }

    /// Page 0 is rejected without touching state or the network
    pub fn on_page_change(&self, page: u32) -> AppResult<JoinHandle<SyncOutcome>> {
        self.dispatch(FilterEvent::PageChange(page))
    }

    /// Mark cached lists stale and re-issue the current canonical request
    pub fn refresh(&self) -> JoinHandle<SyncOutcome> {
        let count = self.movies.invalidate_lists();
        debug!("refresh invalidated {} list entries", count);

        let (request, key) = {
            let filter = self.filter();
            let request = filter.canonical_request();
            let key = MovieService::list_key(&request);
            self.store
                .begin_request(EntityCategory::List, key.clone(), true);
            (request, key)
        };
        self.store.notify(EntityCategory::List);
        self.spawn_list(request, key)
    }

    fn dispatch(&self, event: FilterEvent) -> AppResult<JoinHandle<SyncOutcome>> {
        debug!("filter event: {:?}", event);

        let applied = {
            let mut filter = self.filter();
            filter.apply(event).map(|()| {
                let request = filter.canonical_request();
                let key = MovieService::list_key(&request);
                // Registered under the filter lock so the store always waits
                // on the key of the latest state
                self.store
                    .begin_request(EntityCategory::List, key.clone(), true);
                (request, key)
            })
        };

        let (request, key) = match applied {
            Ok(issued) => issued,
            Err(violation) => {
                let err = AppError::from(violation);
                warn!("filter event rejected: {}", err);
                self.toast(&err);
                return Err(err);
            }
        };

        info!("canonical list request: {}", key);
        self.store.notify(EntityCategory::List);
        Ok(self.spawn_list(request, key))
    }

    fn spawn_list(&self, request: CanonicalRequest, key: RequestKey) -> JoinHandle<SyncOutcome> {
        let movies = Arc::clone(&self.movies);
        let store = Arc::clone(&self.store);
        let event_bus = Arc::clone(&self.event_bus);

        tokio::spawn(async move {
            let result = movies.fetch_list(&request).await;
            settle(&store, &event_bus, EntityCategory::List, &key, result, |store, key, page| {
                store.commit_list(key, page)
            })
        })
    }

    // ========================================================================
    // DETAIL ACTIVATION
    // ========================================================================

    /// A movie card was activated: open its route right away, then load
    /// detail, images and videos concurrently.
    ///
    /// Switching to a different id empties the detail slots first so the
    /// previous movie is never shown under the new route.
    pub fn on_movie_activated(&self, raw_id: &str) -> AppResult<JoinHandle<DetailOutcome>> {
        let movie_id = match MovieId::parse(raw_id) {
            Ok(id) => id,
            Err(violation) => {
                let err = AppError::from(violation);
                warn!("movie activation rejected: {}", err);
                self.store.set_error(EntityCategory::Detail, err.clone());
                self.toast(&err);
                return Err(err);
            }
        };

        self.navigator.navigate_to_movie(&movie_id);

        let detail_key = MovieService::detail_key(&movie_id);
        let images_key = MovieService::images_key(&movie_id);
        let videos_key = MovieService::videos_key(&movie_id);

        {
            let mut target = self.detail_target();
            let same_movie = target.as_ref() == Some(&movie_id);
            self.store
                .begin_request(EntityCategory::Detail, detail_key.clone(), same_movie);
            self.store
                .begin_request(EntityCategory::Images, images_key.clone(), same_movie);
            self.store
                .begin_request(EntityCategory::Videos, videos_key.clone(), same_movie);
            *target = Some(movie_id.clone());
        }
        for category in [EntityCategory::Detail, EntityCategory::Images, EntityCategory::Videos] {
            self.store.notify(category);
        }

        info!("loading movie {}", movie_id);

        let movies = Arc::clone(&self.movies);
        let store = Arc::clone(&self.store);
        let event_bus = Arc::clone(&self.event_bus);

        // Each category lands in the store as soon as its own response does.
        Ok(tokio::spawn(async move {
            let (detail, images, videos) = tokio::join!(
                async {
                    let result = movies.fetch_detail(&movie_id).await;
                    settle(&store, &event_bus, EntityCategory::Detail, &detail_key, result, |s, k, v| {
                        s.commit_detail(k, v)
                    })
                },
                async {
                    let result = movies.fetch_images(&movie_id).await;
                    settle(&store, &event_bus, EntityCategory::Images, &images_key, result, |s, k, v| {
                        s.commit_images(k, v)
                    })
                },
                async {
                    let result = movies.fetch_videos(&movie_id).await;
                    settle(&store, &event_bus, EntityCategory::Videos, &videos_key, result, |s, k, v| {
                        s.commit_videos(k, v)
                    })
                },
            );

            DetailOutcome {
                movie_id,
                detail,
                images,
                videos,
            }
        }))
    }

    // ========================================================================
    // GENRES
    // ========================================================================

    pub fn load_genres(&self) -> JoinHandle<SyncOutcome> {
        let key = MovieService::genres_key();
        self.store
            .begin_request(EntityCategory::Genres, key.clone(), true);
        self.store.notify(EntityCategory::Genres);

        let movies = Arc::clone(&self.movies);
        let store = Arc::clone(&self.store);
        let event_bus = Arc::clone(&self.event_bus);

        tokio::spawn(async move {
            let result = movies.fetch_genres().await;
            settle(&store, &event_bus, EntityCategory::Genres, &key, result, |s, k, v| {
                s.commit_genres(k, v)
            })
        })
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn filter_state(&self) -> UiFilterState {
        self.filter().clone()
    }

    pub fn canonical_request(&self) -> CanonicalRequest {
        self.filter().canonical_request()
    }

    pub fn canonical_key(&self) -> RequestKey {
        MovieService::list_key(&self.canonical_request())
    }

    /// Movie the detail slots currently belong to
    pub fn active_movie(&self) -> Option<MovieId> {
        self.detail_target().clone()
    }

    fn toast(&self, err: &AppError) {
        self.event_bus.emit(ToastRaised::error(err.user_message()));
    }
}

/// Write one completion into the store, unless it has been superseded
fn settle<T, F>(
    store: &AppStore,
    event_bus: &EventBus,
    category: EntityCategory,
    key: &RequestKey,
    result: AppResult<T>,
    commit: F,
) -> SyncOutcome
where
    F: FnOnce(&AppStore, &RequestKey, T) -> bool,
{
    let landed = match result {
        Ok(data) => commit(store, key, data).then_some(SyncOutcome::Committed),
        Err(err) => store
            .fail(category, key, err.clone())
            .then_some(SyncOutcome::Failed(err)),
    };

    landed.unwrap_or_else(|| {
        debug!("superseded completion for {}: {}", category, key);
        event_bus.emit(RequestSuperseded::new(key.to_string()));
        SyncOutcome::Superseded
    })
}
