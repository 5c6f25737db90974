use crate::api::{Comment, Post};
use crate::ui::mvi::Intent;
use crate::ui::notice::Notice;

#[derive(Debug, Clone)]
pub enum PostPageIntent {
    FetchStarted,
    Loaded(Post),
    FetchFailed,
    MissingId,
}

impl Intent for PostPageIntent {}

#[derive(Debug, Clone)]
pub enum CommentsIntent {
    FetchStarted,
    /// Result of the three concurrent fetches.
    Loaded {
        siblings: Vec<Post>,
        post: Post,
        comments: Vec<Comment>,
    },
    FetchFailed,
    DraftChanged(String),
    /// The backend stored the comment.
    CommentStored,
    /// Fresh comment list after a change.
    CommentsRefreshed { comments: Vec<Comment> },
    CommentRemoved { comment_id: String },
    Notify(Notice),
}

impl Intent for CommentsIntent {}
