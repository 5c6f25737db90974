use crate::api::SearchResults;
use crate::ui::mvi::UiState;
use crate::ui::search::location::SearchLocation;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub location: SearchLocation,
    /// `None` until a search succeeds, and after any failure.
    pub results: Option<SearchResults>,
    pub loading: bool,
}

impl UiState for SearchState {}

impl SearchState {
    /// "Previous" is hidden on the first page of users.
    pub fn has_previous_users(&self) -> bool {
        self.location.user_page > 1
    }

    pub fn has_previous_posts(&self) -> bool {
        self.location.post_page > 1
    }

    /// "Next" is always offered; there is no total count to check against.
    pub fn has_next_users(&self) -> bool {
        true
    }

    pub fn has_next_posts(&self) -> bool {
        true
    }
}
