// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod filter;
pub mod genre;
pub mod media;
pub mod movie;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{
    validate_list_page, ListKind, MovieDetail, MovieId, MovieListPage, MovieListResponse,
    MovieStatistics, MovieSummary,
};

// Media Domain
pub use media::{image_url, ImageDescriptor, MovieImageSet, MovieVideoSet, VideoDescriptor};

// Genre Catalog
pub use genre::{Genre, GenreCatalog, GenreId, GenresResponse};

// List Filter
pub use filter::{BaseListType, CanonicalRequest, FilterEvent, UiFilterState};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of invariants, caught before any network call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvariantViolation(String),
}

impl From<DomainError> for crate::error::AppError {
    fn from(err: DomainError) -> Self {
        crate::error::AppError::Validation(err.to_string())
    }
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
