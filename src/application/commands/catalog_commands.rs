// src/application/commands/catalog_commands.rs
//
// Catalog Command Handlers
//
// RULES:
// - Accept plain inputs
// - Call the synchronizer
// - Return DTOs
// - Never contain business logic

use std::str::FromStr;

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::domain::{BaseListType, MovieId};
use crate::error::AppError;
use crate::store::EntityCategory;

/// Current list as rendered by the list screen
pub fn list_view(state: &AppState) -> ListViewDto {
    let snapshot = state.store.snapshot();
    ListViewDto::from_slot(
        &snapshot.list,
        &state.image_base_url,
        snapshot.genres.data.as_ref(),
    )
}

pub fn filter_state(state: &AppState) -> FilterStateDto {
    FilterStateDto::from(&state.synchronizer.filter_state())
}

/// Switch tab ("now_playing", "top_rated", "upcoming")
pub async fn change_tab(list_type: String, state: &AppState) -> Result<ListViewDto, String> {
    let list_type = BaseListType::from_str(&list_type)
        .map_err(AppError::from)
        .to_error_response()?;

    let fetch = state.synchronizer.on_tab_change(list_type).to_error_response()?;
    fetch.await.map_err(AppError::from).to_error_response()?;
    Ok(list_view(state))
}

pub async fn search_movies(keyword: String, state: &AppState) -> Result<ListViewDto, String> {
    let fetch = state.synchronizer.on_search(&keyword).to_error_response()?;
    fetch.await.map_err(AppError::from).to_error_response()?;
    Ok(list_view(state))
}

/// Debounced variant used while the user is typing. Resolves to `None` when
/// a newer keystroke replaced this one.
pub async fn type_search(keyword: String, state: &AppState) -> Option<ListViewDto> {
    match state.search_debouncer.keystroke(&keyword).await {
        Ok(Some(_)) => Some(list_view(state)),
        _ => None,
    }
}

pub async fn select_genre(genre_id: u64, state: &AppState) -> Result<ListViewDto, String> {
    let fetch = state.synchronizer.on_genre_click(genre_id).to_error_response()?;
    fetch.await.map_err(AppError::from).to_error_response()?;
    Ok(list_view(state))
}

pub async fn change_page(page: u32, state: &AppState) -> Result<ListViewDto, String> {
    let fetch = state.synchronizer.on_page_change(page).to_error_response()?;
    fetch.await.map_err(AppError::from).to_error_response()?;
    Ok(list_view(state))
}

pub async fn refresh_list(state: &AppState) -> Result<ListViewDto, String> {
    state
        .synchronizer
        .refresh()
        .await
        .map_err(AppError::from)
        .to_error_response()?;
    Ok(list_view(state))
}

pub async fn list_genres(state: &AppState) -> Result<Vec<GenreDto>, String> {
    state
        .synchronizer
        .load_genres()
        .await
        .map_err(AppError::from)
        .to_error_response()?;

    match (state.store.genres(), state.store.error(EntityCategory::Genres)) {
        (Some(catalog), _) => Ok(catalog.iter().map(GenreDto::from).collect()),
        (None, Some(error)) => Err(ErrorResponse::from(&error).to_json()),
        (None, None) => Ok(Vec::new()),
    }
}

/// Detail route for the movie currently open, as it stands right now
pub fn detail_view(state: &AppState) -> DetailView {
    match state.synchronizer.active_movie() {
        Some(movie_id) => DetailView::project(
            &state.store.snapshot(),
            &movie_id,
            &state.image_base_url,
            state.sync_config.backdrop_limit,
        ),
        None => match state.store.error(EntityCategory::Detail) {
            Some(error) => DetailView::Failed(ErrorResponse::from(&error)),
            None => DetailView::Loading,
        },
    }
}

/// Activate a movie card and wait until detail, images and videos settle
pub async fn open_movie(movie_id: String, state: &AppState) -> Result<DetailView, String> {
    let load = state
        .synchronizer
        .on_movie_activated(&movie_id)
        .to_error_response()?;
    let outcome = load.await.map_err(AppError::from).to_error_response()?;

    let movie_id: MovieId = outcome.movie_id;
    Ok(DetailView::project(
        &state.store.snapshot(),
        &movie_id,
        &state.image_base_url,
        state.sync_config.backdrop_limit,
    ))
}
