use serde::{Deserialize, Serialize};

use crate::domain::genre::GenreId;
use crate::domain::movie::ListKind;
use crate::domain::{DomainError, DomainResult};

/// The tabs a user can pick. Search and genre filtering are layered on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseListType {
    #[default]
    NowPlaying,
    TopRated,
    Upcoming,
}

impl From<BaseListType> for ListKind {
    fn from(base: BaseListType) -> Self {
        match base {
            BaseListType::NowPlaying => ListKind::NowPlaying,
            BaseListType::TopRated => ListKind::TopRated,
            BaseListType::Upcoming => ListKind::Upcoming,
        }
    }
}

impl std::str::FromStr for BaseListType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NOW_PLAYING" => Ok(BaseListType::NowPlaying),
            "TOP_RATED" => Ok(BaseListType::TopRated),
            "UPCOMING" => Ok(BaseListType::Upcoming),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown list type: {}",
                other
            ))),
        }
    }
}

/// User interactions that change what the list shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Search(String),
    TabChange(BaseListType),
    GenreClick(GenreId),
    PageChange(u32),
}

/// The single list request the filter state currently prescribes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum CanonicalRequest {
    ListByType { list_type: BaseListType, page: u32 },
    Search { query: String, page: u32 },
    DiscoverByGenre { genre_id: GenreId, page: u32 },
}

impl CanonicalRequest {
    pub fn page(&self) -> u32 {
        match self {
            CanonicalRequest::ListByType { page, .. }
            | CanonicalRequest::Search { page, .. }
            | CanonicalRequest::DiscoverByGenre { page, .. } => *page,
        }
    }

    /// Kind the resulting `MovieListPage` is tagged with
    pub fn list_kind(&self) -> ListKind {
        match self {
            CanonicalRequest::ListByType { list_type, .. } => (*list_type).into(),
            CanonicalRequest::Search { .. } => ListKind::Search,
            CanonicalRequest::DiscoverByGenre { .. } => ListKind::GenreFilter,
        }
    }
}

/// Filter state owned by the list view.
///
/// At most one of {non-empty search query, selected genre} holds at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFilterState {
    base_type: BaseListType,
    search_query: String,
    current_page: u32,
    selected_genre_id: Option<GenreId>,
}

impl Default for UiFilterState {
    fn default() -> Self {
        Self {
            base_type: BaseListType::NowPlaying,
            search_query: String::new(),
            current_page: 1,
            selected_genre_id: None,
        }
    }
}

impl UiFilterState {
    pub fn base_type(&self) -> BaseListType {
        self.base_type
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn selected_genre_id(&self) -> Option<GenreId> {
        self.selected_genre_id
    }

    /// SEARCH while a keyword is active, GENRE_FILTER while a genre is
    /// selected, otherwise the base tab
    pub fn list_type(&self) -> ListKind {
        if self.selected_genre_id.is_some() {
            ListKind::GenreFilter
        } else if !self.search_query.is_empty() {
            ListKind::Search
        } else {
            self.base_type.into()
        }
    }

    /// Apply one event. On error the state is left untouched.
    pub fn apply(&mut self, event: FilterEvent) -> DomainResult<()> {
        match event {
            FilterEvent::Search(keyword) => {
                self.search_query = keyword.trim().to_string();
                self.selected_genre_id = None;
                self.current_page = 1;
            }
            FilterEvent::TabChange(list_type) => {
                self.base_type = list_type;
                self.search_query.clear();
                self.selected_genre_id = None;
                self.current_page = 1;
            }
            FilterEvent::GenreClick(genre_id) => {
                self.selected_genre_id = Some(genre_id);
                self.search_query.clear();
                self.current_page = 1;
            }
            FilterEvent::PageChange(page) => {
                if page == 0 {
                    return Err(DomainError::InvariantViolation(
                        "Page numbers start at 1".to_string(),
                    ));
                }
                self.current_page = page;
            }
        }
        Ok(())
    }

    /// Genre beats search, search beats the base tab
    pub fn canonical_request(&self) -> CanonicalRequest {
        let page = self.current_page;
        if let Some(genre_id) = self.selected_genre_id {
            CanonicalRequest::DiscoverByGenre { genre_id, page }
        } else if !self.search_query.is_empty() {
            CanonicalRequest::Search {
                query: self.search_query.clone(),
                page,
            }
        } else {
            CanonicalRequest::ListByType {
                list_type: self.base_type,
                page,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclusive(state: &UiFilterState) -> bool {
        !(state.selected_genre_id().is_some() && !state.search_query().is_empty())
    }

    #[test]
    fn test_default_is_now_playing_first_page() {
        let state = UiFilterState::default();
        assert_eq!(
            state.canonical_request(),
            CanonicalRequest::ListByType {
                list_type: BaseListType::NowPlaying,
                page: 1
            }
        );
    }

    #[test]
    fn test_genre_click_clears_search() {
        let mut state = UiFilterState::default();
        state.apply(FilterEvent::Search("dune".into())).unwrap();
        state.apply(FilterEvent::PageChange(3)).unwrap();
        state.apply(FilterEvent::GenreClick(28)).unwrap();

        assert_eq!(state.search_query(), "");
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.list_type(), ListKind::GenreFilter);
    }

    #[test]
    fn test_search_clears_genre() {
        let mut state = UiFilterState::default();
        state.apply(FilterEvent::GenreClick(28)).unwrap();
        state.apply(FilterEvent::Search("matrix".into())).unwrap();

        assert_eq!(state.selected_genre_id(), None);
        assert_eq!(
            state.canonical_request(),
            CanonicalRequest::Search {
                query: "matrix".into(),
                page: 1
            }
        );
    }

    #[test]
    fn test_empty_search_returns_to_previous_base_tab() {
        let mut state = UiFilterState::default();
        state
            .apply(FilterEvent::TabChange(BaseListType::Upcoming))
            .unwrap();
        state.apply(FilterEvent::Search("dune".into())).unwrap();
        assert_eq!(state.list_type(), ListKind::Search);

        state.apply(FilterEvent::Search("   ".into())).unwrap();
        assert_eq!(state.list_type(), ListKind::Upcoming);
        assert_eq!(
            state.canonical_request(),
            CanonicalRequest::ListByType {
                list_type: BaseListType::Upcoming,
                page: 1
            }
        );
    }

    #[test]
    fn test_page_change_keeps_other_fields() {
        let mut state = UiFilterState::default();
        state.apply(FilterEvent::GenreClick(35)).unwrap();
        state.apply(FilterEvent::PageChange(4)).unwrap();

        assert_eq!(
            state.canonical_request(),
            CanonicalRequest::DiscoverByGenre {
                genre_id: 35,
                page: 4
            }
        );
    }

    #[test]
    fn test_page_zero_rejected_without_change() {
        let mut state = UiFilterState::default();
        state.apply(FilterEvent::PageChange(2)).unwrap();
        assert!(state.apply(FilterEvent::PageChange(0)).is_err());
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_canonical_request_is_idempotent() {
        let mut state = UiFilterState::default();
        state.apply(FilterEvent::Search("alien".into())).unwrap();
        assert_eq!(state.canonical_request(), state.canonical_request());
    }

    #[test]
    fn test_mutual_exclusivity_over_event_sequences() {
        let events = [
            FilterEvent::Search("a".into()),
            FilterEvent::GenreClick(28),
            FilterEvent::PageChange(2),
            FilterEvent::TabChange(BaseListType::TopRated),
            FilterEvent::Search(String::new()),
        ];

        // Every sequence of length 4 over the alphabet above
        let n = events.len();
        for a in 0..n {
            for b in 0..n {
                for c in 0..n {
                    for d in 0..n {
                        let mut state = UiFilterState::default();
                        for idx in [a, b, c, d] {
                            state.apply(events[idx].clone()).unwrap();
                            assert!(exclusive(&state), "violated after {:?}", events[idx]);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_parse_base_list_type() {
        assert_eq!(
            "top_rated".parse::<BaseListType>().unwrap(),
            BaseListType::TopRated
        );
        assert!("search".parse::<BaseListType>().is_err());
    }
}
