use std::collections::HashSet;

use chrono::NaiveDate;

use crate::api::Post;
use crate::ui::mvi::Intent;
use crate::ui::notice::Notice;

#[derive(Debug, Clone)]
pub enum PostListIntent {
    FetchStarted,
    /// One raw page plus the ids of posts the user likes.
    PageLoaded {
        posts: Vec<Post>,
        liked: HashSet<String>,
        today: NaiveDate,
    },
    FetchFailed { reason: String },
    NextPage,
    PreviousPage,
    /// The backend accepted a like or unlike.
    LikeConfirmed { post_id: String, liked: bool },
    PostRemoved { post_id: String },
    Notify(Notice),
    DismissNotice,
}

impl Intent for PostListIntent {}
