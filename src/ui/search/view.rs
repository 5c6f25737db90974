use reqwest::Url;

use crate::api::{ForumClient, SearchQuery};
use crate::ui::history::History;
use crate::ui::mvi::dispatch_mvi;
use crate::ui::search::intent::SearchIntent;
use crate::ui::search::location::SearchLocation;
use crate::ui::search::reducer::SearchReducer;
use crate::ui::search::state::SearchState;

/// Search screen: users and posts matching a query, each paged on its own.
///
/// Every page change is pushed onto the screen's URL history, so the page
/// counters survive reload and back/forward.
pub struct SearchView {
    client: ForumClient,
    limit: u32,
    history: History,
    state: SearchState,
}

impl SearchView {
    pub fn new(client: ForumClient, limit: u32, location: SearchLocation) -> Self {
        let history = match location.to_url() {
            Some(url) => History::new(url),
            None => History::default(),
        };
        Self::with_history(client, limit, location, history)
    }

    /// Open the screen at the location stored in `url` (a reload).
    ///
    /// Other parameters in `url` are kept on every URL pushed afterwards.
    pub fn from_url(client: ForumClient, limit: u32, url: &Url) -> Self {
        let location = SearchLocation::from_url(url);
        Self::with_history(client, limit, location, History::new(url.clone()))
    }

    fn with_history(
        client: ForumClient,
        limit: u32,
        location: SearchLocation,
        history: History,
    ) -> Self {
        Self {
            client,
            limit,
            history,
            state: SearchState {
                location,
                ..SearchState::default()
            },
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn current_url(&self) -> Option<&Url> {
        self.history.current()
    }

    /// Fetch results for the current location.
    pub async fn refresh(&mut self) {
        let location = self.state.location.clone();
        if location.query.trim().is_empty() {
            dispatch_mvi!(self, state, SearchReducer, SearchIntent::Cleared);
            return;
        }

        dispatch_mvi!(self, state, SearchReducer, SearchIntent::FetchStarted);
        let query = SearchQuery {
            query: location.query,
            post_page: location.post_page,
            user_page: location.user_page,
            limit: self.limit,
        };

        match self.client.search(&query).await {
            Ok(results) => {
                tracing::debug!(
                    users = results.users.len(),
                    posts = results.posts.len(),
                    "Search results loaded"
                );
                dispatch_mvi!(self, state, SearchReducer, SearchIntent::ResultsLoaded(results));
            }
            Err(err) => {
                tracing::warn!("Search fetch failed: {}", err);
                dispatch_mvi!(self, state, SearchReducer, SearchIntent::FetchFailed);
            }
        }
    }

    /// Search for `query` (already debounced by the caller).
    pub async fn set_query(&mut self, query: &str) {
        dispatch_mvi!(
            self,
            state,
            SearchReducer,
            SearchIntent::QueryChanged(query.to_string())
        );
        self.visit();
        self.refresh().await;
    }

    pub async fn next_users(&mut self) {
        self.change_page(SearchIntent::NextUsers).await;
    }

    pub async fn previous_users(&mut self) {
        self.change_page(SearchIntent::PreviousUsers).await;
    }

    pub async fn next_posts(&mut self) {
        self.change_page(SearchIntent::NextPosts).await;
    }

    pub async fn previous_posts(&mut self) {
        self.change_page(SearchIntent::PreviousPosts).await;
    }

    /// Go back one URL. Returns false when there is nothing to go back to.
    pub async fn back(&mut self) -> bool {
        let Some(url) = self.history.back() else {
            return false;
        };
        let location = SearchLocation::from_url(url);
        dispatch_mvi!(self, state, SearchReducer, SearchIntent::Navigate(location));
        self.refresh().await;
        true
    }

    pub async fn forward(&mut self) -> bool {
        let Some(url) = self.history.forward() else {
            return false;
        };
        let location = SearchLocation::from_url(url);
        dispatch_mvi!(self, state, SearchReducer, SearchIntent::Navigate(location));
        self.refresh().await;
        true
    }

    /// Push the current location, derived from the URL being shown.
    fn visit(&mut self) {
        let url = match self.history.current() {
            Some(current) => {
                let mut url = current.clone();
                self.state.location.write_to(&mut url);
                Some(url)
            }
            None => self.state.location.to_url(),
        };
        if let Some(url) = url {
            self.history.push(url);
        }
    }

    async fn change_page(&mut self, intent: SearchIntent) {
        let before = self.state.location.clone();
        dispatch_mvi!(self, state, SearchReducer, intent);
        if self.state.location == before {
            return;
        }
        self.visit();
        self.refresh().await;
    }
}
