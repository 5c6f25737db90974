//! Wire records exchanged with the forum backend.
//!
//! The backend speaks camelCase JSON and is not strict about which
//! optional fields it includes, so list fields default to empty and
//! author/user blocks tolerate either `name` or `username`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name of whoever wrote a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Author {
    pub fn named(name: &str) -> Self {
        Self {
            username: None,
            name: Some(name.to_string()),
        }
    }

    /// Name used for display and ownership checks.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.username.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// `/posts` names this block `user`, `/posts/{id}` names it `author`.
    #[serde(default, alias = "user")]
    pub author: Author,
    #[serde(default)]
    pub like_count: i64,
}

/// Post fields carried inside profiles and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Minimal post reference embedded in comments and likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRef {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "author")]
    pub user: Author,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub post: Option<PostRef>,
}

impl Comment {
    /// Id of the post this comment belongs to, whichever shape the backend used.
    pub fn target_post_id(&self) -> Option<&str> {
        self.post_id
            .as_deref()
            .or_else(|| self.post.as_ref().map(|p| p.id.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub post: Option<PostRef>,
}

impl Like {
    pub fn target_post_id(&self) -> Option<&str> {
        self.post_id
            .as_deref()
            .or_else(|| self.post.as_ref().map(|p| p.id.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub about: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub posts: Vec<PostSummary>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub likes: Vec<Like>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub posts: Vec<PostSummary>,
    #[serde(default)]
    pub users: Vec<UserSummary>,
}

/// Parameters of `GET /posts/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub post_page: u32,
    pub user_page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

// -- Envelopes ----------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct PostsEnvelope {
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostEnvelope {
    pub post: Post,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsEnvelope {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LikesEnvelope {
    #[serde(default)]
    pub likes: Vec<Like>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// -- Authentication -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A signed-in user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: SessionUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionToken {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetSessionResponse {
    pub session: SessionToken,
    pub user: SessionUser,
}
