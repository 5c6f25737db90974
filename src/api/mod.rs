//! HTTP access to the forum backend.

mod client;
mod error;
pub mod types;

pub use client::ForumClient;
pub use error::ApiError;
pub use types::{
    Author, Comment, Like, NewPost, Post, PostRef, PostSummary, SearchQuery, SearchResults,
    Session, SessionUser, UserProfile, UserSummary,
};
