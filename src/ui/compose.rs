//! New post form (`/create-post`).

use crate::api::{ApiError, ForumClient, NewPost};
use crate::session::SessionHandle;
use crate::ui::mvi::{dispatch_mvi, Intent, Reducer, UiState};
use crate::ui::notice::Notice;
use crate::ui::route::Route;
use crate::ui::Outcome;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeState {
    pub title: String,
    pub content: String,
    pub submitting: bool,
    pub notice: Option<Notice>,
}

impl UiState for ComposeState {}

#[derive(Debug, Clone)]
pub enum ComposeIntent {
    TitleChanged(String),
    ContentChanged(String),
    SubmitStarted,
    Created,
    Failed(Notice),
    Notify(Notice),
}

impl Intent for ComposeIntent {}

pub struct ComposeReducer;

impl Reducer for ComposeReducer {
    type State = ComposeState;
    type Intent = ComposeIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ComposeIntent::TitleChanged(title) => ComposeState { title, ..state },
            ComposeIntent::ContentChanged(content) => ComposeState { content, ..state },
            ComposeIntent::SubmitStarted => ComposeState {
                submitting: true,
                notice: None,
                ..state
            },
            ComposeIntent::Created => ComposeState {
                notice: Some(Notice::success("Post created successfully!")),
                ..ComposeState::default()
            },
            ComposeIntent::Failed(notice) => ComposeState {
                submitting: false,
                notice: Some(notice),
                ..state
            },
            ComposeIntent::Notify(notice) => ComposeState {
                notice: Some(notice),
                ..state
            },
        }
    }
}

pub struct ComposeView {
    client: ForumClient,
    session: SessionHandle,
    state: ComposeState,
}

impl ComposeView {
    pub fn new(client: ForumClient, session: SessionHandle) -> Self {
        Self {
            client,
            session,
            state: ComposeState::default(),
        }
    }

    pub fn state(&self) -> &ComposeState {
        &self.state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.state.notice.take()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        dispatch_mvi!(
            self,
            state,
            ComposeReducer,
            ComposeIntent::TitleChanged(title.into())
        );
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        dispatch_mvi!(
            self,
            state,
            ComposeReducer,
            ComposeIntent::ContentChanged(content.into())
        );
    }

    /// Create the post. On success the form is cleared and the caller is
    /// sent home.
    pub async fn submit(&mut self) -> Outcome {
        if !self.session.is_signed_in() {
            self.notify(Notice::error("You must be logged in to create a post."));
            return Outcome::Rejected;
        }
        let post = NewPost {
            title: self.state.title.trim().to_string(),
            content: self.state.content.trim().to_string(),
        };
        if post.title.is_empty() || post.content.is_empty() {
            self.notify(Notice::warning("Title and content are required"));
            return Outcome::Rejected;
        }

        dispatch_mvi!(self, state, ComposeReducer, ComposeIntent::SubmitStarted);
        match self.client.create_post(&post).await {
            Ok(()) => {
                tracing::info!(title = %post.title, "Post created");
                dispatch_mvi!(self, state, ComposeReducer, ComposeIntent::Created);
                Outcome::Navigate(Route::Home)
            }
            Err(ApiError::LoginRequired) => Outcome::Navigate(Route::LogIn),
            Err(err) => {
                tracing::warn!("Failed to create post: {}", err);
                dispatch_mvi!(
                    self,
                    state,
                    ComposeReducer,
                    ComposeIntent::Failed(Notice::error(format!("Error: {}", err)))
                );
                Outcome::Rejected
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        dispatch_mvi!(self, state, ComposeReducer, ComposeIntent::Notify(notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_clears_the_form() {
        let state = ComposeState {
            title: "t".into(),
            content: "c".into(),
            submitting: true,
            notice: None,
        };
        let state = ComposeReducer::reduce(state, ComposeIntent::Created);
        assert!(state.title.is_empty());
        assert!(state.content.is_empty());
        assert!(!state.submitting);
        assert_eq!(
            state.notice,
            Some(Notice::success("Post created successfully!"))
        );
    }

    #[test]
    fn failure_keeps_the_form() {
        let state = ComposeState {
            title: "t".into(),
            content: "c".into(),
            submitting: true,
            notice: None,
        };
        let state = ComposeReducer::reduce(state, ComposeIntent::Failed(Notice::error("Error: x")));
        assert_eq!(state.title, "t");
        assert!(!state.submitting);
    }
}
