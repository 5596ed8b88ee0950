// src/integrations/tmdb/endpoints.rs
//
// Endpoint Registry
//
// Maps logical operations to remote resource paths. Pure lookup, no state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cache::{ParamValue, RequestKey};
use crate::error::{AppError, AppResult};

/// Every remote read the catalog performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    NowPlaying,
    TopRated,
    Upcoming,
    Search,
    Discover,
    Detail,
    Images,
    Videos,
    Genres,
}

/// Coarse grouping used for prefix invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationFamily {
    /// Anything that produces a `MovieListPage`
    List,
    /// Anything scoped to a single movie id
    Movie,
    Genres,
}

/// Path parameter substituted into `{movie_id}` templates
pub const MOVIE_ID_PARAM: &str = "movie_id";

impl Operation {
    pub fn family(&self) -> OperationFamily {
        match self {
            Operation::NowPlaying
            | Operation::TopRated
            | Operation::Upcoming
            | Operation::Search
            | Operation::Discover => OperationFamily::List,
            Operation::Detail | Operation::Images | Operation::Videos => OperationFamily::Movie,
            Operation::Genres => OperationFamily::Genres,
        }
    }

    pub fn path_template(&self) -> &'static str {
        match self {
            Operation::NowPlaying => "/3/movie/now_playing",
            Operation::TopRated => "/3/movie/top_rated",
            Operation::Upcoming => "/3/movie/upcoming",
            Operation::Search => "/3/search/movie",
            Operation::Discover => "/3/discover/movie",
            Operation::Detail => "/3/movie/{movie_id}",
            Operation::Images => "/3/movie/{movie_id}/images",
            Operation::Videos => "/3/movie/{movie_id}/videos",
            Operation::Genres => "/3/genre/movie/list",
        }
    }

    /// Parameters that must be present for the request to make sense
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Operation::Search => &["query"],
            Operation::Discover => &["with_genres"],
            Operation::Detail | Operation::Images | Operation::Videos => &[MOVIE_ID_PARAM],
            _ => &[],
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::NowPlaying => "now_playing",
            Operation::TopRated => "top_rated",
            Operation::Upcoming => "upcoming",
            Operation::Search => "search",
            Operation::Discover => "discover",
            Operation::Detail => "detail",
            Operation::Images => "images",
            Operation::Videos => "videos",
            Operation::Genres => "genres",
        };
        write!(f, "{}", name)
    }
}

/// Concrete path and query string for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// Resolve an operation and its parameters into a path and query.
///
/// `movie_id` is consumed by the path template; every other parameter is sent
/// as a query parameter in key order.
pub fn resolve(
    operation: Operation,
    params: &BTreeMap<String, ParamValue>,
) -> AppResult<ResolvedEndpoint> {
    for required in operation.required_params() {
        if !params.contains_key(*required) {
            return Err(AppError::Validation(format!(
                "Operation {} requires parameter {}",
                operation, required
            )));
        }
    }

    let template = operation.path_template();
    let path = match params.get(MOVIE_ID_PARAM) {
        Some(id) if template.contains("{movie_id}") => {
            template.replace("{movie_id}", &id.to_string())
        }
        _ => template.to_string(),
    };

    let query = params
        .iter()
        .filter(|(name, _)| name.as_str() != MOVIE_ID_PARAM)
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect();

    Ok(ResolvedEndpoint { path, query })
}

/// Convenience wrapper over `resolve` for a cache key
pub fn resolve_key(key: &RequestKey) -> AppResult<ResolvedEndpoint> {
    resolve(key.operation(), key.params())
}
