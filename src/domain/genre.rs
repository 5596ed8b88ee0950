// src/domain/genre.rs
//
// Genre catalog
//
// Fetched once per session and treated as near-immutable.

use serde::{Deserialize, Serialize};

pub type GenreId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,

    #[serde(default)]
    pub name: String,
}

/// Wire shape of the genre list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenresResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Set of genres keyed by id, in the order the server listed them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreCatalog {
    genres: Vec<Genre>,
}

impl GenreCatalog {
    /// Build a catalog; later duplicates of an id are dropped
    pub fn new(genres: Vec<Genre>) -> Self {
        let mut unique: Vec<Genre> = Vec::with_capacity(genres.len());
        for genre in genres {
            if !unique.iter().any(|g| g.id == genre.id) {
                unique.push(genre);
            }
        }
        Self { genres: unique }
    }

    pub fn get(&self, id: GenreId) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }

    pub fn contains(&self, id: GenreId) -> bool {
        self.get(id).is_some()
    }

    /// Names for a movie card's `genre_ids`; unknown ids are skipped
    pub fn names_for(&self, ids: &[GenreId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(|g| g.name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Genre> {
        self.genres.iter()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

impl From<GenresResponse> for GenreCatalog {
    fn from(response: GenresResponse) -> Self {
        GenreCatalog::new(response.genres)
    }
}
