use serde::{Deserialize, Serialize};

use crate::domain::genre::{Genre, GenreId};

/// Remote identifier of a movie.
///
/// Only constructible through `MovieId::parse` or from a numeric id, so a
/// value of this type is always safe to substitute into a path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub(crate) String);

impl MovieId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId(id.to_string())
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which list a `MovieListPage` was produced by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListKind {
    NowPlaying,
    TopRated,
    Upcoming,
    Search,
    GenreFilter,
}

impl ListKind {
    /// Heading shown above the list
    pub fn title(&self) -> &'static str {
        match self {
            ListKind::NowPlaying => "Now Playing",
            ListKind::TopRated => "Top Rated",
            ListKind::Upcoming => "Upcoming",
            ListKind::Search => "Search Results",
            ListKind::GenreFilter => "Genre",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListKind::NowPlaying => write!(f, "NOW_PLAYING"),
            ListKind::TopRated => write!(f, "TOP_RATED"),
            ListKind::Upcoming => write!(f, "UPCOMING"),
            ListKind::Search => write!(f, "SEARCH"),
            ListKind::GenreFilter => write!(f, "GENRE_FILTER"),
        }
    }
}

/// One card in a movie list. Sourced verbatim from the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub overview: String,

    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

/// Wire shape of every list/search/discover response
#[derive(Debug, Clone, Deserialize)]
pub struct MovieListResponse {
    #[serde(default = "first_page")]
    pub page: u32,

    #[serde(default)]
    pub results: Vec<MovieSummary>,

    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// A single page of movies, tagged with the list that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieListPage {
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
    pub list_kind: ListKind,
}

impl MovieListPage {
    /// Build a page from the wire response. `page` and `total_pages` are
    /// clamped to at least 1 (empty searches report `total_pages: 0`).
    pub fn from_response(response: MovieListResponse, list_kind: ListKind) -> Self {
        Self {
            page: response.page.max(1),
            results: response.results,
            total_pages: response.total_pages.max(1),
            list_kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Full record behind the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub backdrop_path: Option<String>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub overview: String,
}

/// Values rendered on the statistics board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieStatistics {
    pub rating: String,
    pub popularity: String,
}

impl MovieDetail {
    pub fn movie_id(&self) -> MovieId {
        MovieId::from(self.id)
    }

    pub fn statistics(&self) -> MovieStatistics {
        MovieStatistics {
            rating: format!("{:.2}", self.vote_average),
            popularity: format!("{:.0}", self.popularity),
        }
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}
