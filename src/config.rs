// src/config.rs
//
// Runtime configuration
//
// Everything comes from the environment; a `.env` file next to the binary is
// honoured when present.

use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the movie metadata API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
    pub image_base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Read `TMDB_API_BASE_URL`, `TMDB_API_TOKEN`, `TMDB_IMAGE_BASE_URL` and
    /// `TMDB_TIMEOUT_SECS`
    pub fn from_env() -> AppResult<Self> {
        // Missing .env is not an error
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> AppResult<String> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{} is not set", name)))
        };

        let base_url = required("TMDB_API_BASE_URL")?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "TMDB_API_BASE_URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        let token = required("TMDB_API_TOKEN")?;

        let image_base_url = lookup("TMDB_IMAGE_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

        let timeout_secs = match lookup("TMDB_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("TMDB_TIMEOUT_SECS must be a number, got {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            token,
            image_base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// How long each entity category stays fresh in the query cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    pub list: Duration,
    pub detail: Duration,
    pub images: Duration,
    pub videos: Duration,
    pub genres: Duration,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            list: Duration::from_secs(5 * 60),
            detail: Duration::from_secs(5 * 60),
            images: Duration::from_secs(10 * 60),
            videos: Duration::from_secs(10 * 60),
            genres: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Tuning for the synchronization layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Quiet period before a typed keyword turns into a search
    pub search_debounce: Duration,
    /// Backdrops shown in the detail gallery
    pub backdrop_limit: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(400),
            backdrop_limit: 20,
        }
    }
}
