pub mod entity;
pub mod invariants;

pub use entity::{
    ListKind, MovieDetail, MovieId, MovieListPage, MovieListResponse, MovieStatistics,
    MovieSummary,
};
pub use invariants::validate_list_page;
