use crate::api::SearchResults;
use crate::ui::mvi::Intent;
use crate::ui::search::location::SearchLocation;

#[derive(Debug, Clone)]
pub enum SearchIntent {
    /// Location read from a URL (open, reload, back/forward).
    Navigate(SearchLocation),
    /// New query text; both page counters go back to 1.
    QueryChanged(String),
    NextUsers,
    PreviousUsers,
    NextPosts,
    PreviousPosts,
    FetchStarted,
    ResultsLoaded(SearchResults),
    FetchFailed,
    /// Empty query: nothing to show, nothing to fetch.
    Cleared,
}

impl Intent for SearchIntent {}
