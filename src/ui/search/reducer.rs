use crate::ui::mvi::Reducer;
use crate::ui::search::intent::SearchIntent;
use crate::ui::search::location::SearchLocation;
use crate::ui::search::state::SearchState;

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::Navigate(location) => SearchState { location, ..state },
            SearchIntent::QueryChanged(query) => SearchState {
                location: SearchLocation::new(query),
                ..state
            },
            SearchIntent::NextUsers => {
                let mut location = state.location;
                location.user_page += 1;
                SearchState { location, ..state }
            }
            SearchIntent::PreviousUsers => {
                let mut location = state.location;
                location.user_page = location.user_page.saturating_sub(1).max(1);
                SearchState { location, ..state }
            }
            SearchIntent::NextPosts => {
                let mut location = state.location;
                location.post_page += 1;
                SearchState { location, ..state }
            }
            SearchIntent::PreviousPosts => {
                let mut location = state.location;
                location.post_page = location.post_page.saturating_sub(1).max(1);
                SearchState { location, ..state }
            }
            SearchIntent::FetchStarted => SearchState {
                loading: true,
                ..state
            },
            SearchIntent::ResultsLoaded(results) => SearchState {
                results: Some(results),
                loading: false,
                ..state
            },
            SearchIntent::FetchFailed | SearchIntent::Cleared => SearchState {
                results: None,
                loading: false,
                ..state
            },
        }
    }
}
