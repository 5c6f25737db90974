use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub defaults: Defaults,
}

/// Where the forum backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the forum API (e.g., "http://localhost:3000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path under `base_url` served by the authentication service.
    #[serde(default = "default_auth_base_path")]
    pub auth_base_path: String,
}

/// Default settings for requests and views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Posts per page on list screens (default: 10).
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u32,
    /// Results per page for each search section (default: 5).
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    /// Quiet period before a search query is sent (default: 300).
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Characters shown before content is cut with "more" (default: 150).
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_auth_base_path() -> String {
    "/authentications".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_posts_per_page() -> u32 {
    10
}

fn default_search_page_size() -> u32 {
    5
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_preview_chars() -> usize {
    150
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_base_path: default_auth_base_path(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            posts_per_page: default_posts_per_page(),
            search_page_size: default_search_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            preview_chars: default_preview_chars(),
        }
    }
}
