//! Screen addresses.
//!
//! Every screen has a path (`/posts/{id}/comments`, `/users/me/likes`, ...).
//! Actions that need a session answer with `Route::LogIn`, and the shell
//! accepts any of these paths in its `open` command.

use std::fmt;

use reqwest::Url;

use crate::ui::profile::MeSection;
use crate::ui::search::SearchLocation;

const APP_ORIGIN: &str = "http://forum.local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Today,
    Past,
    Discussions,
    Post(String),
    Comments(String),
    Search(SearchLocation),
    CreatePost,
    Me,
    MeSection(MeSection),
    User(String),
    LogIn,
    SignUp,
}

/// Resolve an app path (with optional query string) against a fixed origin.
pub(crate) fn app_url(path: &str) -> Option<Url> {
    let origin = Url::parse(APP_ORIGIN).ok()?;
    origin.join(path).ok()
}

impl Route {
    /// Parse a path such as `/posts/42/comments` or `/posts/search?query=rust`.
    pub fn parse(path: &str) -> Option<Route> {
        let url = app_url(path.trim())?;
        let segments: Vec<String> = url
            .path_segments()?
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();
        let parts: Vec<&str> = segments.iter().map(String::as_str).collect();

        let route = match parts.as_slice() {
            [] => Route::Home,
            ["new"] => Route::Today,
            ["past"] => Route::Past,
            ["comments"] => Route::Discussions,
            ["create-post"] => Route::CreatePost,
            ["log-in"] => Route::LogIn,
            ["sign-up"] => Route::SignUp,
            ["post", id] => Route::Post(id.to_string()),
            ["posts", "search"] => Route::Search(SearchLocation::from_url(&url)),
            ["posts", id, "comments"] => Route::Comments(id.to_string()),
            ["users", "me"] => Route::Me,
            ["users", "me", section] => Route::MeSection(section.parse().ok()?),
            ["users", name] => Route::User(name.to_string()),
            _ => return None,
        };
        Some(route)
    }

    /// Path of this screen, the inverse of [`Route::parse`].
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Today => "/new".to_string(),
            Route::Past => "/past".to_string(),
            Route::Discussions => "/comments".to_string(),
            Route::Post(id) => format!("/post/{}", urlencoding::encode(id)),
            Route::Comments(id) => format!("/posts/{}/comments", urlencoding::encode(id)),
            Route::Search(location) => location.path(),
            Route::CreatePost => "/create-post".to_string(),
            Route::Me => "/users/me".to_string(),
            Route::MeSection(section) => format!("/users/me/{}", section),
            Route::User(name) => format!("/users/{}", urlencoding::encode(name)),
            Route::LogIn => "/log-in".to_string(),
            Route::SignUp => "/sign-up".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
