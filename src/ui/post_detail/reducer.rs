use crate::ui::mvi::Reducer;
use crate::ui::notice::Notice;
use crate::ui::post_detail::intent::{CommentsIntent, PostPageIntent};
use crate::ui::post_detail::state::{ordinal_of, CommentsState, PostPageState};

pub struct PostPageReducer;

impl Reducer for PostPageReducer {
    type State = PostPageState;
    type Intent = PostPageIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PostPageIntent::FetchStarted => PostPageState {
                loading: true,
                notice: None,
                ..state
            },
            PostPageIntent::Loaded(post) => PostPageState {
                post: Some(post),
                loading: false,
                ..state
            },
            PostPageIntent::FetchFailed => PostPageState {
                loading: false,
                notice: Some(Notice::error("Failed to fetch post")),
                ..state
            },
            PostPageIntent::MissingId => PostPageState {
                loading: false,
                notice: Some(Notice::error("No post ID provided.")),
                ..state
            },
        }
    }
}

pub struct CommentsReducer;

impl Reducer for CommentsReducer {
    type State = CommentsState;
    type Intent = CommentsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CommentsIntent::FetchStarted => CommentsState {
                loading: true,
                ..state
            },
            CommentsIntent::Loaded {
                siblings,
                post,
                comments,
            } => CommentsState {
                ordinal: ordinal_of(&siblings, &post.id),
                post: Some(post),
                comments,
                loading: false,
                ..state
            },
            CommentsIntent::FetchFailed => CommentsState {
                loading: false,
                notice: Some(Notice::error("Failed to fetch data.")),
                ..state
            },
            CommentsIntent::DraftChanged(draft) => CommentsState { draft, ..state },
            CommentsIntent::CommentStored => CommentsState {
                draft: String::new(),
                ..state
            },
            CommentsIntent::CommentsRefreshed { comments } => CommentsState { comments, ..state },
            CommentsIntent::CommentRemoved { comment_id } => {
                let mut state = state;
                if let Some(index) = state.comments.iter().position(|c| c.id == comment_id) {
                    state.comments.remove(index);
                }
                state
            }
            CommentsIntent::Notify(notice) => CommentsState {
                notice: Some(notice),
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Author, Comment, Post};
    use chrono::Utc;

    fn post(id: &str) -> Post {
        Post {
            id: id.into(),
            title: format!("Post {}", id),
            content: String::new(),
            created_at: Utc::now(),
            author: Author::named("ann"),
            like_count: 0,
        }
    }

    fn comment(id: &str) -> Comment {
        Comment {
            id: id.into(),
            content: format!("comment {}", id),
            created_at: None,
            user: Author::named("bob"),
            post_id: None,
            post: None,
        }
    }

    #[test]
    fn ordinal_is_position_among_siblings() {
        let state = CommentsReducer::reduce(
            CommentsState::new("b"),
            CommentsIntent::Loaded {
                siblings: vec![post("a"), post("b"), post("c")],
                post: post("b"),
                comments: vec![],
            },
        );
        assert_eq!(state.ordinal, Some(2));
    }

    #[test]
    fn ordinal_absent_when_post_not_listed() {
        let state = CommentsReducer::reduce(
            CommentsState::new("z"),
            CommentsIntent::Loaded {
                siblings: vec![post("a")],
                post: post("z"),
                comments: vec![],
            },
        );
        assert_eq!(state.ordinal, None);
        assert!(state.post.is_some());
    }

    #[test]
    fn removing_comment_keeps_the_rest_in_order() {
        let mut state = CommentsState::new("p");
        state.comments = vec![comment("1"), comment("2"), comment("3")];
        let state = CommentsReducer::reduce(
            state,
            CommentsIntent::CommentRemoved {
                comment_id: "2".into(),
            },
        );
        let ids: Vec<&str> = state.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn storing_clears_the_draft_and_keeps_the_list() {
        let mut state = CommentsState::new("p");
        state.draft = "hello".into();
        state.comments = vec![comment("1")];
        let state = CommentsReducer::reduce(state, CommentsIntent::CommentStored);
        assert!(state.draft.is_empty());
        assert_eq!(state.comments.len(), 1);

        let state = CommentsReducer::reduce(
            state,
            CommentsIntent::CommentsRefreshed {
                comments: vec![comment("1"), comment("9")],
            },
        );
        assert_eq!(state.comments.len(), 2);
    }

    #[test]
    fn removing_drops_only_one_matching_comment() {
        let mut state = CommentsState::new("p");
        state.comments = vec![comment("1"), comment("2"), comment("2")];
        let state = CommentsReducer::reduce(
            state,
            CommentsIntent::CommentRemoved {
                comment_id: "2".into(),
            },
        );
        let ids: Vec<&str> = state.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn missing_id_sets_notice() {
        let state = PostPageReducer::reduce(PostPageState::default(), PostPageIntent::MissingId);
        assert_eq!(
            state.notice.map(|n| n.message),
            Some("No post ID provided.".to_string())
        );
    }
}
