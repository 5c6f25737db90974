//! Search position kept in the URL query string.
//!
//! Reading a location back from its URL gives the same location, which is
//! what lets reload and back/forward land on the same result pages.

use reqwest::Url;

use crate::ui::route::app_url;

pub const SEARCH_PATH: &str = "/posts/search";

const QUERY_KEY: &str = "query";
const USER_PAGE_KEY: &str = "userPage";
const POST_PAGE_KEY: &str = "postPage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLocation {
    pub query: String,
    pub user_page: u32,
    pub post_page: u32,
}

impl Default for SearchLocation {
    fn default() -> Self {
        Self {
            query: String::new(),
            user_page: 1,
            post_page: 1,
        }
    }
}

impl SearchLocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Read the location from `url`'s query string.
    ///
    /// Missing, zero or unparsable page numbers read as page 1.
    pub fn from_url(url: &Url) -> Self {
        let mut location = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                QUERY_KEY => location.query = value.into_owned(),
                USER_PAGE_KEY => location.user_page = parse_page(&value),
                POST_PAGE_KEY => location.post_page = parse_page(&value),
                _ => {}
            }
        }
        location
    }

    /// Store the location in `url`'s query string, keeping other parameters.
    pub fn write_to(&self, url: &mut Url) {
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let ours = [
            (QUERY_KEY, self.query.clone()),
            (USER_PAGE_KEY, self.user_page.to_string()),
            (POST_PAGE_KEY, self.post_page.to_string()),
        ];
        for (key, value) in ours {
            match pairs.iter_mut().find(|(k, _)| k == key) {
                Some(pair) => pair.1 = value,
                None => pairs.push((key.to_string(), value)),
            }
        }
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }

    /// App URL of the search screen at this location.
    pub fn to_url(&self) -> Option<Url> {
        app_url(&self.path())
    }

    /// Path and query string, e.g. `/posts/search?query=rust&userPage=1&postPage=2`.
    pub fn path(&self) -> String {
        format!(
            "{}?{}={}&{}={}&{}={}",
            SEARCH_PATH,
            QUERY_KEY,
            urlencoding::encode(&self.query),
            USER_PAGE_KEY,
            self.user_page,
            POST_PAGE_KEY,
            self.post_page
        )
    }
}

fn parse_page(value: &str) -> u32 {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}
