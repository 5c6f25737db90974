use crate::api::{ApiError, ForumClient};
use crate::session::SessionHandle;
use crate::ui::mvi::dispatch_mvi;
use crate::ui::notice::Notice;
use crate::ui::post_detail::intent::{CommentsIntent, PostPageIntent};
use crate::ui::post_detail::reducer::{CommentsReducer, PostPageReducer};
use crate::ui::post_detail::state::{CommentsState, PostPageState};
use crate::ui::route::Route;
use crate::ui::Outcome;

/// `/post/{id}`: one post, no comments.
pub struct PostPage {
    client: ForumClient,
    state: PostPageState,
}

impl PostPage {
    pub fn new(client: ForumClient, post_id: impl Into<String>) -> Self {
        Self {
            client,
            state: PostPageState {
                post_id: post_id.into(),
                ..PostPageState::default()
            },
        }
    }

    pub fn state(&self) -> &PostPageState {
        &self.state
    }

    pub async fn load(&mut self) {
        if self.state.post_id.trim().is_empty() {
            dispatch_mvi!(self, state, PostPageReducer, PostPageIntent::MissingId);
            return;
        }
        dispatch_mvi!(self, state, PostPageReducer, PostPageIntent::FetchStarted);

        match self.client.get_post(&self.state.post_id).await {
            Ok(post) => {
                dispatch_mvi!(self, state, PostPageReducer, PostPageIntent::Loaded(post));
            }
            Err(err) => {
                tracing::warn!(post_id = %self.state.post_id, "Failed to fetch post: {}", err);
                dispatch_mvi!(self, state, PostPageReducer, PostPageIntent::FetchFailed);
            }
        }
    }
}

/// `/posts/{id}/comments`: a post, its ordinal, and its comment thread.
pub struct CommentsView {
    client: ForumClient,
    session: SessionHandle,
    state: CommentsState,
}

impl CommentsView {
    pub fn new(client: ForumClient, session: SessionHandle, post_id: impl Into<String>) -> Self {
        Self {
            client,
            session,
            state: CommentsState::new(post_id),
        }
    }

    pub fn state(&self) -> &CommentsState {
        &self.state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.state.notice.take()
    }

    /// Fetch sibling posts, the post, and its comments concurrently.
    pub async fn open(&mut self) {
        if self.state.post_id.trim().is_empty() {
            self.notify(Notice::error("No post ID provided."));
            return;
        }
        dispatch_mvi!(self, state, CommentsReducer, CommentsIntent::FetchStarted);

        let client = &self.client;
        let post_id = self.state.post_id.as_str();
        let result = tokio::try_join!(
            client.all_posts(),
            client.get_post(post_id),
            client.comments_on(post_id),
        );

        match result {
            Ok((siblings, post, comments)) => {
                tracing::debug!(
                    post_id = %post.id,
                    comments = comments.len(),
                    "Comment thread loaded"
                );
                dispatch_mvi!(
                    self,
                    state,
                    CommentsReducer,
                    CommentsIntent::Loaded {
                        siblings,
                        post,
                        comments
                    }
                );
            }
            Err(err) => {
                tracing::warn!("Failed to fetch comment thread: {}", err);
                dispatch_mvi!(self, state, CommentsReducer, CommentsIntent::FetchFailed);
            }
        }
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        dispatch_mvi!(
            self,
            state,
            CommentsReducer,
            CommentsIntent::DraftChanged(draft.into())
        );
    }

    /// Post the draft, then fetch the thread again.
    pub async fn submit_comment(&mut self) -> Outcome {
        let content = self.state.draft.trim().to_string();
        if content.is_empty() {
            self.notify(Notice::warning("Please write a comment first!"));
            return Outcome::Rejected;
        }
        if !self.session.is_signed_in() {
            return Outcome::Navigate(Route::LogIn);
        }

        let post_id = self.state.post_id.clone();
        match self.client.add_comment(&post_id, &content).await {
            Ok(()) => {
                dispatch_mvi!(self, state, CommentsReducer, CommentsIntent::CommentStored);
            }
            Err(ApiError::LoginRequired) => return Outcome::Navigate(Route::LogIn),
            Err(err) => {
                tracing::warn!(post_id = %post_id, "Failed to post comment: {}", err);
                self.notify(Notice::error("Failed to post comment."));
                return Outcome::Rejected;
            }
        }

        // Stored: the draft stays cleared whatever the refresh does.
        match self.client.comments_on(&post_id).await {
            Ok(comments) => {
                dispatch_mvi!(
                    self,
                    state,
                    CommentsReducer,
                    CommentsIntent::CommentsRefreshed { comments }
                );
            }
            Err(err) => {
                tracing::warn!(post_id = %post_id, "Failed to refresh comments: {}", err);
                self.notify(Notice::error("Failed to fetch data."));
            }
        }
        Outcome::Completed
    }

    pub async fn delete_comment(&mut self, comment_id: &str) -> Outcome {
        let Some(comment) = self.state.find_comment(comment_id) else {
            self.notify(Notice::error(format!(
                "Error deleting comment: Comment {} not found",
                comment_id
            )));
            return Outcome::Rejected;
        };

        let result = match self.session.require_author(&comment.user, "comments") {
            Ok(_) => self.client.delete_comment(comment_id).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                dispatch_mvi!(
                    self,
                    state,
                    CommentsReducer,
                    CommentsIntent::CommentRemoved {
                        comment_id: comment_id.to_string()
                    }
                );
                Outcome::Completed
            }
            Err(ApiError::LoginRequired) => Outcome::Navigate(Route::LogIn),
            Err(err) => {
                tracing::warn!(comment_id, "Failed to delete comment: {}", err);
                self.notify(Notice::error(format!("Error deleting comment: {}", err)));
                Outcome::Rejected
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        dispatch_mvi!(self, state, CommentsReducer, CommentsIntent::Notify(notice));
    }
}
