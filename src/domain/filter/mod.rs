//! List filter state.
//!
//! Invariants:
//!
//! 1. Selecting a genre clears the search query and resets to page 1
//! 2. Searching clears the genre and resets to page 1
//! 3. Changing tab clears both and resets to page 1
//! 4. Exactly one canonical request is derived from any state

pub mod state;

pub use state::{BaseListType, CanonicalRequest, FilterEvent, UiFilterState};
