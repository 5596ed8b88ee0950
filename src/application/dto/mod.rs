// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM store/domain state only (never TO)

use serde::Serialize;

use crate::application::error_handling::ErrorResponse;
use crate::domain::{
    image_url, CanonicalRequest, Genre, GenreCatalog, MovieDetail, MovieId, MovieImageSet,
    MovieListPage, MovieStatistics, MovieSummary, MovieVideoSet, UiFilterState,
};
use crate::store::{Slot, StoreSnapshot};

// ============================================================================
// LIST DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCardDto {
    pub id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub rating: String,
    pub overview: String,
    pub genres: Vec<String>,
}

impl MovieCardDto {
    pub fn from_summary(
        movie: &MovieSummary,
        image_base_url: &str,
        genres: Option<&GenreCatalog>,
    ) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| image_url(image_base_url, path)),
            rating: format!("{:.1}", movie.vote_average),
            overview: movie.overview.clone(),
            genres: genres
                .map(|catalog| catalog.names_for(&movie.genre_ids))
                .unwrap_or_default(),
        }
    }
}

/// Everything the list screen renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListViewDto {
    pub title: Option<String>,
    pub list_kind: Option<String>,
    pub page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub movies: Vec<MovieCardDto>,
    pub loading: bool,
    pub error: Option<ErrorResponse>,
}

impl ListViewDto {
    pub fn from_slot(
        slot: &Slot<MovieListPage>,
        image_base_url: &str,
        genres: Option<&GenreCatalog>,
    ) -> Self {
        let page = slot.data.as_ref();
        Self {
            title: page.map(|p| p.list_kind.title().to_string()),
            list_kind: page.map(|p| p.list_kind.to_string()),
            page: page.map_or(1, |p| p.page),
            total_pages: page.map_or(1, |p| p.total_pages),
            has_next_page: page.is_some_and(MovieListPage::has_next_page),
            movies: page
                .map(|p| {
                    p.results
                        .iter()
                        .map(|movie| MovieCardDto::from_summary(movie, image_base_url, genres))
                        .collect()
                })
                .unwrap_or_default(),
            loading: slot.loading,
            error: slot.error.as_ref().map(ErrorResponse::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreDto {
    pub id: u64,
    pub name: String,
}

impl From<&Genre> for GenreDto {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterStateDto {
    pub list_type: String,
    pub search_query: String,
    pub current_page: u32,
    pub selected_genre_id: Option<u64>,
    pub canonical: CanonicalRequest,
}

impl From<&UiFilterState> for FilterStateDto {
    fn from(state: &UiFilterState) -> Self {
        Self {
            list_type: state.list_type().to_string(),
            search_query: state.search_query().to_string(),
            current_page: state.current_page(),
            selected_genre_id: state.selected_genre_id(),
            canonical: state.canonical_request(),
        }
    }
}

// ============================================================================
// DETAIL DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailViewDto {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub statistics: MovieStatistics,
    pub genres: Vec<String>,
    pub overview: String,
    pub poster_url: Option<String>,
    pub backdrop_urls: Vec<String>,
    pub trailer_url: Option<String>,
    pub images_loading: bool,
    pub videos_loading: bool,
}

impl DetailViewDto {
    pub fn new(
        detail: &MovieDetail,
        images: Option<&MovieImageSet>,
        videos: Option<&MovieVideoSet>,
        image_base_url: &str,
        backdrop_limit: usize,
    ) -> Self {
        Self {
            id: detail.id,
            title: detail.title.clone(),
            release_date: detail.release_date.clone(),
            runtime_minutes: detail.runtime,
            statistics: detail.statistics(),
            genres: detail.genre_names().into_iter().map(str::to_string).collect(),
            overview: detail.overview.clone(),
            poster_url: detail
                .poster_path
                .as_deref()
                .map(|path| image_url(image_base_url, path)),
            backdrop_urls: images
                .map(|set| set.backdrop_urls(image_base_url, backdrop_limit))
                .unwrap_or_default(),
            trailer_url: videos
                .and_then(MovieVideoSet::trailer)
                .and_then(|video| video.youtube_url()),
            images_loading: false,
            videos_loading: false,
        }
    }
}

/// What the detail route shows for the movie it was opened with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "view", rename_all = "snake_case")]
pub enum DetailView {
    /// No data for this id yet: render a placeholder
    Loading,
    Ready(DetailViewDto),
    Failed(ErrorResponse),
}

impl DetailView {
    /// Project the store for the route `/movie_id`. Data belonging to any
    /// other movie is never shown.
    pub fn project(
        snapshot: &StoreSnapshot,
        movie_id: &MovieId,
        image_base_url: &str,
        backdrop_limit: usize,
    ) -> Self {
        let detail = snapshot
            .detail
            .data
            .as_ref()
            .filter(|detail| detail.movie_id() == *movie_id);

        match detail {
            Some(detail) => {
                let images = snapshot.images.data.as_ref().filter(|i| i.id == detail.id);
                let videos = snapshot.videos.data.as_ref().filter(|v| v.id == detail.id);
                let mut dto =
                    DetailViewDto::new(detail, images, videos, image_base_url, backdrop_limit);
                dto.images_loading = snapshot.images.loading;
                dto.videos_loading = snapshot.videos.loading;
                DetailView::Ready(dto)
            }
            None => match &snapshot.detail.error {
                Some(error) if !snapshot.detail.loading => {
                    DetailView::Failed(ErrorResponse::from(error))
                }
                _ => DetailView::Loading,
            },
        }
    }
}
