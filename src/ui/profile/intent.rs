use crate::api::{Comment, Like, Post, UserProfile};
use crate::ui::mvi::Intent;
use crate::ui::notice::Notice;

#[derive(Debug, Clone)]
pub enum MeIntent {
    FetchStarted,
    Loaded(UserProfile),
    FetchFailed { reason: String },
    BeginEdit,
    CancelEdit,
    DraftChanged(String),
    /// The backend stored the new about text.
    AboutSaved(String),
    Notify(Notice),
}

impl Intent for MeIntent {}

#[derive(Debug, Clone)]
pub enum SectionIntent {
    FetchStarted,
    Loaded {
        profile: UserProfile,
        posts: Vec<Post>,
    },
    FetchFailed,
}

impl Intent for SectionIntent {}

#[derive(Debug, Clone)]
pub enum UserPageIntent {
    FetchStarted,
    Loaded {
        posts: Vec<Post>,
        comments: Vec<Comment>,
        likes: Vec<Like>,
    },
    FetchFailed { reason: String },
}

impl Intent for UserPageIntent {}
