use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::api::Post;
use crate::ui::mvi::UiState;
use crate::ui::notice::Notice;

/// A fetched post merged with what the list screen derives for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub post: Post,
    pub liked_by_user: bool,
    /// Position across pages: `(page - 1) * page_size + index + 1`.
    pub number: usize,
}

/// Predicate applied to each fetched page before numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostFilter {
    #[default]
    All,
    /// Posts created on the current local calendar day.
    Today,
    /// Posts created before the current local calendar day.
    Past,
}

impl PostFilter {
    pub fn matches(&self, created_at: &DateTime<Utc>, today: NaiveDate) -> bool {
        let day = created_at.with_timezone(&Local).date_naive();
        match self {
            PostFilter::All => true,
            PostFilter::Today => day == today,
            PostFilter::Past => day < today,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PostFilter::All => "Recent Posts",
            PostFilter::Today => "Today's Posts",
            PostFilter::Past => "Past Posts",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostListState {
    pub page: u32,
    pub page_size: u32,
    pub filter: PostFilter,
    pub posts: Vec<PostView>,
    pub loading: bool,
    /// True while the last raw page came back full.
    pub has_next_page: bool,
    pub notice: Option<Notice>,
}

impl Default for PostListState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            filter: PostFilter::All,
            posts: Vec::new(),
            loading: false,
            has_next_page: true,
            notice: None,
        }
    }
}

impl UiState for PostListState {}

impl PostListState {
    pub fn new(page_size: u32, filter: PostFilter) -> Self {
        Self {
            page_size,
            filter,
            ..Self::default()
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    pub fn find(&self, post_id: &str) -> Option<&PostView> {
        self.posts.iter().find(|p| p.post.id == post_id)
    }
}
