use std::collections::HashSet;

use chrono::Local;

use crate::api::{ApiError, ForumClient, Like, Post};
use crate::session::SessionHandle;
use crate::ui::like;
use crate::ui::mvi::dispatch_mvi;
use crate::ui::notice::Notice;
use crate::ui::post_list::intent::PostListIntent;
use crate::ui::post_list::reducer::PostListReducer;
use crate::ui::post_list::state::{PostFilter, PostListState};
use crate::ui::route::Route;
use crate::ui::Outcome;

/// Paged post list (home, today, past).
pub struct PostListView {
    client: ForumClient,
    session: SessionHandle,
    state: PostListState,
}

impl PostListView {
    pub fn new(
        client: ForumClient,
        session: SessionHandle,
        page_size: u32,
        filter: PostFilter,
    ) -> Self {
        Self {
            client,
            session,
            state: PostListState::new(page_size, filter),
        }
    }

    /// Start at `page` instead of page 1.
    pub fn at_page(mut self, page: u32) -> Self {
        self.state.page = page.max(1);
        self
    }

    pub fn state(&self) -> &PostListState {
        &self.state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.state.notice.take()
    }

    /// Fetch the current page and, when signed in, the user's likes.
    pub async fn load(&mut self) {
        dispatch_mvi!(self, state, PostListReducer, PostListIntent::FetchStarted);
        let page = self.state.page;
        let limit = self.state.page_size;
        let signed_in = self.session.is_signed_in();
        let client = &self.client;

        let (posts, liked) = tokio::join!(client.list_posts(page, limit), async {
            if signed_in {
                Some(client.my_likes().await)
            } else {
                None
            }
        });

        match combine(posts, liked) {
            Ok((posts, liked)) => {
                tracing::debug!(page, count = posts.len(), "Post page loaded");
                dispatch_mvi!(
                    self,
                    state,
                    PostListReducer,
                    PostListIntent::PageLoaded {
                        posts,
                        liked,
                        today: Local::now().date_naive(),
                    }
                );
            }
            Err(err) => {
                tracing::warn!(page, "Failed to load posts: {}", err);
                dispatch_mvi!(
                    self,
                    state,
                    PostListReducer,
                    PostListIntent::FetchFailed {
                        reason: err.to_string()
                    }
                );
            }
        }
    }

    pub async fn next_page(&mut self) {
        let before = self.state.page;
        dispatch_mvi!(self, state, PostListReducer, PostListIntent::NextPage);
        if self.state.page != before {
            self.load().await;
        }
    }

    pub async fn previous_page(&mut self) {
        let before = self.state.page;
        dispatch_mvi!(self, state, PostListReducer, PostListIntent::PreviousPage);
        if self.state.page != before {
            self.load().await;
        }
    }

    /// Like or unlike `post_id`, depending on its current flag.
    pub async fn toggle_like(&mut self, post_id: &str) -> Outcome {
        if !self.session.is_signed_in() {
            return Outcome::Navigate(Route::LogIn);
        }
        let Some(view) = self.state.find(post_id) else {
            self.notify(Notice::error(format!("Error: Unknown post {}", post_id)));
            return Outcome::Rejected;
        };

        match like::send_like(&self.client, &self.session, post_id, view.liked_by_user).await {
            Ok(liked) => {
                dispatch_mvi!(
                    self,
                    state,
                    PostListReducer,
                    PostListIntent::LikeConfirmed {
                        post_id: post_id.to_string(),
                        liked
                    }
                );
                Outcome::Completed
            }
            Err(ApiError::LoginRequired) => Outcome::Navigate(Route::LogIn),
            Err(err) => {
                tracing::warn!(post_id, "Like toggle failed: {}", err);
                self.notify(Notice::error(format!("Error: {}", err)));
                Outcome::Rejected
            }
        }
    }

    /// Delete one of the signed-in user's own posts.
    pub async fn delete_post(&mut self, post_id: &str) -> Outcome {
        // An unlisted post has no author, so it is never ours.
        let author = self
            .state
            .find(post_id)
            .map(|view| view.post.author.clone())
            .unwrap_or_default();
        let result = match self.session.require_author(&author, "posts") {
            Ok(_) => self.client.delete_post(post_id).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                dispatch_mvi!(
                    self,
                    state,
                    PostListReducer,
                    PostListIntent::PostRemoved {
                        post_id: post_id.to_string()
                    }
                );
                Outcome::Completed
            }
            Err(ApiError::LoginRequired) => Outcome::Navigate(Route::LogIn),
            Err(err) => {
                tracing::warn!(post_id, "Delete post failed: {}", err);
                self.notify(Notice::error(format!("Error deleting post: {}", err)));
                Outcome::Rejected
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        dispatch_mvi!(self, state, PostListReducer, PostListIntent::Notify(notice));
    }
}

/// A rejected like request reads as "likes nothing"; only transport or
/// decode failures fail the whole load.
fn combine(
    posts: Result<Vec<Post>, ApiError>,
    likes: Option<Result<Vec<Like>, ApiError>>,
) -> Result<(Vec<Post>, HashSet<String>), ApiError> {
    let posts = posts?;
    let likes = match likes {
        None => Vec::new(),
        Some(Ok(likes)) => likes,
        Some(Err(err)) if err.is_status() => {
            tracing::debug!("Likes unavailable: {}", err);
            Vec::new()
        }
        Some(Err(err)) => return Err(err),
    };
    let liked = likes
        .iter()
        .filter_map(|like| like.target_post_id().map(str::to_string))
        .collect();
    Ok((posts, liked))
}
