use crate::ui::mvi::Reducer;
use crate::ui::notice::Notice;
use crate::ui::profile::intent::{MeIntent, SectionIntent, UserPageIntent};
use crate::ui::profile::state::{MeState, SectionState, UserPageState, UNNAMED};

pub struct MeReducer;

impl Reducer for MeReducer {
    type State = MeState;
    type Intent = MeIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MeIntent::FetchStarted => MeState {
                loading: true,
                ..state
            },
            MeIntent::Loaded(mut profile) => {
                if profile.name.as_deref().map_or(true, str::is_empty) {
                    profile.name = Some(UNNAMED.to_string());
                }
                let about = profile.about.get_or_insert_with(String::new).clone();
                MeState {
                    profile: Some(profile),
                    about_draft: about,
                    editing: false,
                    loading: false,
                    ..state
                }
            }
            MeIntent::FetchFailed { reason } => MeState {
                loading: false,
                notice: Some(Notice::error(format!("Error loading profile: {}", reason))),
                ..state
            },
            MeIntent::BeginEdit => {
                if state.profile.is_none() {
                    return state;
                }
                let about_draft = state.about().to_string();
                MeState {
                    editing: true,
                    about_draft,
                    ..state
                }
            }
            MeIntent::CancelEdit => {
                let about_draft = state.about().to_string();
                MeState {
                    editing: false,
                    about_draft,
                    ..state
                }
            }
            MeIntent::DraftChanged(about_draft) => MeState {
                about_draft,
                ..state
            },
            MeIntent::AboutSaved(about) => {
                let mut state = state;
                if let Some(profile) = state.profile.as_mut() {
                    profile.about = Some(about.clone());
                }
                state.about_draft = about;
                state.editing = false;
                state
            }
            MeIntent::Notify(notice) => MeState {
                notice: Some(notice),
                ..state
            },
        }
    }
}

pub struct SectionReducer;

impl Reducer for SectionReducer {
    type State = SectionState;
    type Intent = SectionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SectionIntent::FetchStarted => SectionState {
                loading: true,
                ..state
            },
            SectionIntent::Loaded { profile, posts } => SectionState {
                profile: Some(profile),
                titles: posts.into_iter().map(|p| (p.id, p.title)).collect(),
                loading: false,
                ..state
            },
            SectionIntent::FetchFailed => SectionState {
                loading: false,
                notice: Some(Notice::error("Error loading data.")),
                ..state
            },
        }
    }
}

pub struct UserPageReducer;

impl Reducer for UserPageReducer {
    type State = UserPageState;
    type Intent = UserPageIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            UserPageIntent::FetchStarted => UserPageState {
                loading: true,
                ..state
            },
            UserPageIntent::Loaded {
                posts,
                comments,
                likes,
            } => UserPageState {
                posts,
                comments,
                likes,
                loading: false,
                ..state
            },
            UserPageIntent::FetchFailed { reason } => UserPageState {
                loading: false,
                notice: Some(Notice::error(format!("Error loading profile: {}", reason))),
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Author, Post, UserProfile};
    use crate::ui::profile::section::MeSection;
    use crate::ui::profile::state::UNKNOWN_POST;
    use chrono::Utc;

    fn profile(name: Option<&str>, about: Option<&str>) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: name.map(str::to_string),
            email: "ann@example.com".into(),
            about: about.map(str::to_string),
            created_at: None,
            posts: vec![],
            comments: vec![],
            likes: vec![],
        }
    }

    #[test]
    fn missing_name_and_about_get_defaults() {
        let state = MeReducer::reduce(MeState::default(), MeIntent::Loaded(profile(None, None)));
        assert_eq!(state.display_name(), "Unnamed");
        assert_eq!(state.about(), "");
        assert_eq!(state.about_draft, "");
    }

    #[test]
    fn edit_cycle_updates_about() {
        let state = MeReducer::reduce(
            MeState::default(),
            MeIntent::Loaded(profile(Some("Ann"), Some("old"))),
        );
        let state = MeReducer::reduce(state, MeIntent::BeginEdit);
        assert!(state.editing);
        let state = MeReducer::reduce(state, MeIntent::DraftChanged("new".into()));
        assert!(state.can_save());
        let state = MeReducer::reduce(state, MeIntent::AboutSaved("new".into()));
        assert!(!state.editing);
        assert_eq!(state.about(), "new");
    }

    #[test]
    fn blank_draft_cannot_be_saved() {
        let state = MeReducer::reduce(
            MeState::default(),
            MeIntent::Loaded(profile(Some("Ann"), None)),
        );
        let state = MeReducer::reduce(state, MeIntent::BeginEdit);
        let state = MeReducer::reduce(state, MeIntent::DraftChanged("   ".into()));
        assert!(!state.can_save());
    }

    #[test]
    fn section_titles_resolve_through_post_map() {
        let post = Post {
            id: "p1".into(),
            title: "Hello".into(),
            content: String::new(),
            created_at: Utc::now(),
            author: Author::default(),
            like_count: 0,
        };
        let state = SectionReducer::reduce(
            SectionState::new(MeSection::Likes),
            SectionIntent::Loaded {
                profile: profile(Some("Ann"), None),
                posts: vec![post],
            },
        );
        assert_eq!(state.title_of(Some("p1")), "Hello");
        assert_eq!(state.title_of(Some("gone")), UNKNOWN_POST);
        assert_eq!(state.title_of(None), UNKNOWN_POST);
    }
}
