use std::collections::HashMap;

use crate::api::{Comment, Like, Post, UserProfile};
use crate::ui::mvi::UiState;
use crate::ui::notice::Notice;
use crate::ui::profile::section::MeSection;

pub const UNNAMED: &str = "Unnamed";
pub const UNKNOWN_POST: &str = "Unknown Post";

/// `/users/me`: own profile with an editable "about" text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeState {
    pub profile: Option<UserProfile>,
    pub editing: bool,
    pub about_draft: String,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl UiState for MeState {}

impl MeState {
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED)
    }

    pub fn about(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.about.as_deref())
            .unwrap_or("")
    }

    /// Save is offered only for a non-blank draft.
    pub fn can_save(&self) -> bool {
        self.editing && !self.about_draft.trim().is_empty()
    }
}

/// `/users/me/{section}`: own posts, comments, or likes with resolved titles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionState {
    pub section: MeSection,
    pub profile: Option<UserProfile>,
    /// Post id to title, built from `GET /posts`.
    pub titles: HashMap<String, String>,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl UiState for SectionState {}

impl SectionState {
    pub fn new(section: MeSection) -> Self {
        Self {
            section,
            ..Self::default()
        }
    }

    pub fn title_of(&self, post_id: Option<&str>) -> &str {
        post_id
            .and_then(|id| self.titles.get(id))
            .map(String::as_str)
            .filter(|title| !title.is_empty())
            .unwrap_or(UNKNOWN_POST)
    }
}

/// `/users/{name}`: someone's posts, comments, and likes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPageState {
    pub name: String,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub likes: Vec<Like>,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl UiState for UserPageState {}
