use super::entity::{MovieId, MovieListPage};
use crate::domain::{DomainError, DomainResult};

impl MovieId {
    /// Parse a movie id coming from the presentation layer (route segment,
    /// card click). Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> DomainResult<MovieId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvariantViolation(
                "Movie id is required".to_string(),
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvariantViolation(format!(
                "Movie id must be numeric, got {:?}",
                trimmed
            )));
        }
        trimmed
            .parse::<u64>()
            .map(MovieId::from)
            .map_err(|_| {
                DomainError::InvariantViolation(format!("Movie id {} is out of range", trimmed))
            })
    }
}

/// Validates MovieListPage invariants
pub fn validate_list_page(page: &MovieListPage) -> DomainResult<()> {
    if page.page == 0 {
        return Err(DomainError::InvariantViolation(
            "Page numbers start at 1".to_string(),
        ));
    }
    if page.total_pages == 0 {
        return Err(DomainError::InvariantViolation(
            "A list has at least one page".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the movie domain:
///
/// 1. Movie ids are canonical decimal u64 values (no leading zeros)
/// 2. page >= 1 and total_pages >= 1
/// 3. A list page is replaced wholesale, never merged
