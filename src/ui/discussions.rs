//! Posts that have comments, with their threads (`/comments`).

use tokio::task::JoinSet;

use crate::api::{ApiError, Comment, ForumClient, Post};
use crate::session::SessionHandle;
use crate::ui::mvi::{dispatch_mvi, Intent, Reducer, UiState};
use crate::ui::notice::Notice;
use crate::ui::route::Route;
use crate::ui::Outcome;

#[derive(Debug, Clone, PartialEq)]
pub struct Discussion {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionsState {
    pub page: u32,
    pub page_size: u32,
    pub discussions: Vec<Discussion>,
    pub loading: bool,
    pub has_next_page: bool,
    pub notice: Option<Notice>,
}

impl Default for DiscussionsState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            discussions: Vec::new(),
            loading: false,
            has_next_page: true,
            notice: None,
        }
    }
}

impl UiState for DiscussionsState {}

impl DiscussionsState {
    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    fn find_comment(&self, comment_id: &str) -> Option<&Comment> {
        self.discussions
            .iter()
            .flat_map(|d| d.comments.iter())
            .find(|c| c.id == comment_id)
    }
}

#[derive(Debug, Clone)]
pub enum DiscussionsIntent {
    FetchStarted,
    /// Raw page length plus every post of the page with its comments, in page order.
    Loaded {
        raw_len: usize,
        threads: Vec<(Post, Vec<Comment>)>,
    },
    FetchFailed { reason: String },
    NextPage,
    PreviousPage,
    CommentRemoved { comment_id: String },
    Notify(Notice),
}

impl Intent for DiscussionsIntent {}

pub struct DiscussionsReducer;

impl Reducer for DiscussionsReducer {
    type State = DiscussionsState;
    type Intent = DiscussionsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DiscussionsIntent::FetchStarted => DiscussionsState {
                loading: true,
                ..state
            },
            DiscussionsIntent::Loaded { raw_len, threads } => {
                let offset = (state.page.max(1) as usize - 1) * state.page_size as usize;
                let discussions = threads
                    .into_iter()
                    .filter(|(_, comments)| !comments.is_empty())
                    .enumerate()
                    .map(|(index, (post, comments))| Discussion {
                        post,
                        comments,
                        number: offset + index + 1,
                    })
                    .collect();
                DiscussionsState {
                    discussions,
                    has_next_page: raw_len == state.page_size as usize,
                    loading: false,
                    ..state
                }
            }
            DiscussionsIntent::FetchFailed { reason } => DiscussionsState {
                loading: false,
                has_next_page: false,
                notice: Some(Notice::error(format!("Error loading posts: {}", reason))),
                ..state
            },
            DiscussionsIntent::NextPage => {
                if !state.has_next_page {
                    return DiscussionsState {
                        notice: Some(Notice::warning("You are already on the last page.")),
                        ..state
                    };
                }
                DiscussionsState {
                    page: state.page + 1,
                    ..state
                }
            }
            DiscussionsIntent::PreviousPage => DiscussionsState {
                page: state.page.saturating_sub(1).max(1),
                ..state
            },
            DiscussionsIntent::CommentRemoved { comment_id } => {
                let mut state = state;
                let found = state.discussions.iter_mut().find_map(|d| {
                    let index = d.comments.iter().position(|c| c.id == comment_id)?;
                    Some((d, index))
                });
                if let Some((discussion, index)) = found {
                    discussion.comments.remove(index);
                }
                // Numbers stay as loaded; only the emptied thread disappears.
                state.discussions.retain(|d| !d.comments.is_empty());
                state
            }
            DiscussionsIntent::Notify(notice) => DiscussionsState {
                notice: Some(notice),
                ..state
            },
        }
    }
}

pub struct DiscussionsView {
    client: ForumClient,
    session: SessionHandle,
    state: DiscussionsState,
}

impl DiscussionsView {
    pub fn new(client: ForumClient, session: SessionHandle, page_size: u32) -> Self {
        Self {
            client,
            session,
            state: DiscussionsState {
                page_size,
                ..DiscussionsState::default()
            },
        }
    }

    pub fn at_page(mut self, page: u32) -> Self {
        self.state.page = page.max(1);
        self
    }

    pub fn state(&self) -> &DiscussionsState {
        &self.state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.state.notice.take()
    }

    pub async fn load(&mut self) {
        dispatch_mvi!(self, state, DiscussionsReducer, DiscussionsIntent::FetchStarted);
        let page = self.state.page;

        match self.fetch_threads().await {
            Ok((raw_len, threads)) => {
                tracing::debug!(page, raw_len, "Discussions loaded");
                dispatch_mvi!(
                    self,
                    state,
                    DiscussionsReducer,
                    DiscussionsIntent::Loaded { raw_len, threads }
                );
            }
            Err(reason) => {
                tracing::warn!(page, "Failed to load discussions: {}", reason);
                dispatch_mvi!(
                    self,
                    state,
                    DiscussionsReducer,
                    DiscussionsIntent::FetchFailed { reason }
                );
            }
        }
    }

    pub async fn next_page(&mut self) {
        let before = self.state.page;
        dispatch_mvi!(self, state, DiscussionsReducer, DiscussionsIntent::NextPage);
        if self.state.page != before {
            self.load().await;
        }
    }

    pub async fn previous_page(&mut self) {
        let before = self.state.page;
        dispatch_mvi!(self, state, DiscussionsReducer, DiscussionsIntent::PreviousPage);
        if self.state.page != before {
            self.load().await;
        }
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
                    DiscussionsReducer,
                    DiscussionsIntent::CommentRemoved {
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

    /// One page of posts, then every post's comments concurrently.
    async fn fetch_threads(&self) -> Result<(usize, Vec<(Post, Vec<Comment>)>), String> {
        let posts = self
            .client
            .list_posts(self.state.page, self.state.page_size)
            .await
            .map_err(|e| e.to_string())?;
        let raw_len = posts.len();

        let mut tasks = JoinSet::new();
        for (index, post) in posts.into_iter().enumerate() {
            let client = self.client.clone();
            tasks.spawn(async move {
                let comments = client.comments_on(&post.id).await;
                (index, post, comments)
            });
        }

        let mut threads = Vec::with_capacity(raw_len);
        while let Some(joined) = tasks.join_next().await {
            let (index, post, comments) = joined.map_err(|e| e.to_string())?;
            let comments = match comments {
                Ok(comments) => comments,
                Err(err) if err.is_status() => {
                    tracing::debug!(post_id = %post.id, "Skipping comments: {}", err);
                    Vec::new()
                }
                Err(err) => return Err(err.to_string()),
            };
            threads.push((index, post, comments));
        }
        threads.sort_by_key(|(index, _, _)| *index);

        Ok((
            raw_len,
            threads
                .into_iter()
                .map(|(_, post, comments)| (post, comments))
                .collect(),
        ))
    }

    fn notify(&mut self, notice: Notice) {
        dispatch_mvi!(self, state, DiscussionsReducer, DiscussionsIntent::Notify(notice));
    }
}
