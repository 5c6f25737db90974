use std::time::Duration;

use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{
    Comment, CommentsEnvelope, ErrorBody, GetSessionResponse, Like, LikesEnvelope, NewPost, Post,
    PostEnvelope, PostsEnvelope, SearchQuery, SearchResults, Session, SignInResponse,
    UserEnvelope, UserProfile,
};
use crate::config::Config;

/// Typed HTTP client for the forum backend.
///
/// Cloning is cheap and clones share one connection pool and one cookie
/// jar, so a session established through any clone is visible to all.
#[derive(Clone)]
pub struct ForumClient {
    http: Client,
    base_url: Url,
    auth_segments: Vec<String>,
}

impl ForumClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.server.base_url).map_err(|e| {
            ApiError::Validation(format!(
                "Invalid server URL '{}': {}",
                config.server.base_url, e
            ))
        })?;

        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.defaults.timeout_seconds as u64))
            .connect_timeout(Duration::from_secs(
                config.defaults.connect_timeout_seconds as u64,
            ))
            .build()
            .map_err(ApiError::Network)?;

        let auth_segments = config
            .server
            .auth_base_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            http,
            base_url,
            auth_segments,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // -- Posts ----------------------------------------------------------------

    /// `GET /posts?page&limit`
    pub async fn list_posts(&self, page: u32, limit: u32) -> Result<Vec<Post>, ApiError> {
        let mut url = self.endpoint(&["posts"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        let envelope: PostsEnvelope = self.get_json(url).await?;
        Ok(envelope.posts)
    }

    /// `GET /posts` without paging, as the backend's default listing.
    pub async fn all_posts(&self) -> Result<Vec<Post>, ApiError> {
        let envelope: PostsEnvelope = self.get_json(self.endpoint(&["posts"])).await?;
        Ok(envelope.posts)
    }

    /// `GET /posts/{id}`
    pub async fn get_post(&self, post_id: &str) -> Result<Post, ApiError> {
        let envelope: PostEnvelope = self.get_json(self.endpoint(&["posts", post_id])).await?;
        Ok(envelope.post)
    }

    /// `POST /posts`
    pub async fn create_post(&self, post: &NewPost) -> Result<(), ApiError> {
        let body = json!({ "title": post.title, "content": post.content });
        self.send(Method::POST, self.endpoint(&["posts"]), Some(&body))
            .await?;
        Ok(())
    }

    /// `DELETE /posts/{id}`
    pub async fn delete_post(&self, post_id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.endpoint(&["posts", post_id]), None)
            .await?;
        Ok(())
    }

    /// `GET /posts/by/{user}`
    pub async fn posts_by(&self, user: &str) -> Result<Vec<Post>, ApiError> {
        let envelope: PostsEnvelope = self.get_json(self.endpoint(&["posts", "by", user])).await?;
        Ok(envelope.posts)
    }

    /// `GET /posts/search?query&postPage&userPage&limit`
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ApiError> {
        let mut url = self.endpoint(&["posts", "search"]);
        url.query_pairs_mut()
            .append_pair("query", &query.query)
            .append_pair("postPage", &query.post_page.to_string())
            .append_pair("userPage", &query.user_page.to_string())
            .append_pair("limit", &query.limit.to_string());
        self.get_json(url).await
    }

    // -- Comments -------------------------------------------------------------

    /// `GET /comments/on/{postId}`
    pub async fn comments_on(&self, post_id: &str) -> Result<Vec<Comment>, ApiError> {
        let envelope: CommentsEnvelope = self
            .get_json(self.endpoint(&["comments", "on", post_id]))
            .await?;
        Ok(envelope.comments)
    }

    /// `POST /comments/on/{postId}`
    pub async fn add_comment(&self, post_id: &str, content: &str) -> Result<(), ApiError> {
        let body = json!({ "content": content });
        self.send(
            Method::POST,
            self.endpoint(&["comments", "on", post_id]),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    /// `DELETE /comments/{id}`
    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.endpoint(&["comments", comment_id]), None)
            .await?;
        Ok(())
    }

    /// `GET /comments/by/{user}`
    pub async fn comments_by(&self, user: &str) -> Result<Vec<Comment>, ApiError> {
        let envelope: CommentsEnvelope = self
            .get_json(self.endpoint(&["comments", "by", user]))
            .await?;
        Ok(envelope.comments)
    }

    // -- Likes ----------------------------------------------------------------

    /// `GET /likes/me`
    pub async fn my_likes(&self) -> Result<Vec<Like>, ApiError> {
        let envelope: LikesEnvelope = self.get_json(self.endpoint(&["likes", "me"])).await?;
        Ok(envelope.likes)
    }

    /// `GET /likes/on/{postId}`
    pub async fn likes_on(&self, post_id: &str) -> Result<Vec<Like>, ApiError> {
        let envelope: LikesEnvelope = self
            .get_json(self.endpoint(&["likes", "on", post_id]))
            .await?;
        Ok(envelope.likes)
    }

    /// `POST /likes/on/{postId}`
    pub async fn like(&self, post_id: &str) -> Result<(), ApiError> {
        self.send(Method::POST, self.endpoint(&["likes", "on", post_id]), None)
            .await?;
        Ok(())
    }

    /// `DELETE /likes/on/{postId}`
    pub async fn unlike(&self, post_id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.endpoint(&["likes", "on", post_id]), None)
            .await?;
        Ok(())
    }

    /// `GET /likes/by/{user}`
    pub async fn likes_by(&self, user: &str) -> Result<Vec<Like>, ApiError> {
        let envelope: LikesEnvelope = self.get_json(self.endpoint(&["likes", "by", user])).await?;
        Ok(envelope.likes)
    }

    // -- Users ----------------------------------------------------------------

    /// `GET /users/me`
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let envelope: UserEnvelope = self.get_json(self.endpoint(&["users", "me"])).await?;
        Ok(envelope.user)
    }

    /// `POST /users/me` with `{about}`
    pub async fn update_about(&self, about: &str) -> Result<(), ApiError> {
        let body = json!({ "about": about });
        self.send(Method::POST, self.endpoint(&["users", "me"]), Some(&body))
            .await?;
        Ok(())
    }

    // -- Authentication -------------------------------------------------------

    pub(crate) async fn sign_in_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let body = json!({ "email": email, "password": password });
        let url = self.auth_endpoint(&["sign-in", "email"]);
        let response = self.send(Method::POST, url.clone(), Some(&body)).await?;
        let signed_in: SignInResponse = decode(response, &url).await?;
        Ok(Session {
            token: signed_in.token.unwrap_or_default(),
            user: signed_in.user,
        })
    }

    pub(crate) async fn sign_up_email(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let url = self.auth_endpoint(&["sign-up", "email"]);
        let response = self.send(Method::POST, url.clone(), Some(&body)).await?;
        let signed_up: SignInResponse = decode(response, &url).await?;
        Ok(Session {
            token: signed_up.token.unwrap_or_default(),
            user: signed_up.user,
        })
    }

    /// Returns `None` when the auth service reports no active session.
    pub(crate) async fn get_session(&self) -> Result<Option<Session>, ApiError> {
        let current: Option<GetSessionResponse> =
            self.get_json(self.auth_endpoint(&["get-session"])).await?;
        Ok(current.map(|c| Session {
            token: c.session.token,
            user: c.user,
        }))
    }

    pub(crate) async fn sign_out(&self) -> Result<(), ApiError> {
        let body = json!({});
        self.send(Method::POST, self.auth_endpoint(&["sign-out"]), Some(&body))
            .await?;
        Ok(())
    }

    // -- Plumbing -------------------------------------------------------------

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn auth_endpoint(&self, segments: &[&str]) -> Url {
        let mut all: Vec<&str> = self.auth_segments.iter().map(String::as_str).collect();
        all.extend_from_slice(segments);
        self.endpoint(&all)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.send(Method::GET, url.clone(), None).await?;
        decode(response, &url).await
    }

    /// Sends a request and maps non-2xx answers to [`ApiError::Status`].
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            method = %method,
            path = url.path(),
            request_id = %request_id,
            "Sending request"
        );

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header("x-request-id", request_id.as_str());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %method,
                path = url.path(),
                request_id = %request_id,
                "Request failed: {}",
                e
            );
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        tracing::warn!(
            method = %method,
            path = url.path(),
            request_id = %request_id,
            status = status.as_u16(),
            "Backend rejected request"
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        endpoint: url.path().to_string(),
        source,
    })
}
