use crate::api::{Comment, Post};
use crate::ui::mvi::UiState;
use crate::ui::notice::Notice;

/// Single post page (`/post/{id}`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPageState {
    pub post_id: String,
    pub post: Option<Post>,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl UiState for PostPageState {}

/// Post with its comment thread (`/posts/{id}/comments`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentsState {
    pub post_id: String,
    pub post: Option<Post>,
    /// 1-based position of the post among all posts, when it is listed.
    pub ordinal: Option<usize>,
    pub comments: Vec<Comment>,
    pub draft: String,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl UiState for CommentsState {}

impl CommentsState {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            ..Self::default()
        }
    }

    pub fn find_comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

/// Position of `post_id` among `siblings`, counting from 1.
pub fn ordinal_of(siblings: &[Post], post_id: &str) -> Option<usize> {
    siblings
        .iter()
        .position(|p| p.id == post_id)
        .map(|index| index + 1)
}
