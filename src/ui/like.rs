//! Like/unlike toggling shared by the post list and post screens.
//!
//! The local count and flag only move after the backend confirms, and they
//! move by exactly one.

use crate::api::{ApiError, ForumClient};
use crate::session::SessionHandle;
use crate::ui::post_list::PostView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// The action that flips the current flag.
    pub fn toggle_from(liked_by_user: bool) -> Self {
        if liked_by_user {
            LikeAction::Unlike
        } else {
            LikeAction::Like
        }
    }

    pub fn liked_after(self) -> bool {
        self == LikeAction::Like
    }
}

/// Send the request that flips `liked_by_user` for `post_id`.
///
/// Returns the confirmed liked state.
pub async fn send_like(
    client: &ForumClient,
    session: &SessionHandle,
    post_id: &str,
    liked_by_user: bool,
) -> Result<bool, ApiError> {
    session.require()?;
    let action = LikeAction::toggle_from(liked_by_user);
    match action {
        LikeAction::Like => client.like(post_id).await?,
        LikeAction::Unlike => client.unlike(post_id).await?,
    }
    tracing::debug!(post_id, ?action, "Like toggle confirmed");
    Ok(action.liked_after())
}

/// Apply a confirmed like state to a view. Returns false when nothing changed.
pub fn reconcile(view: &mut PostView, liked: bool) -> bool {
    if view.liked_by_user == liked {
        return false;
    }
    view.liked_by_user = liked;
    view.post.like_count += if liked { 1 } else { -1 };
    true
}

pub fn confirmation(liked: bool) -> &'static str {
    if liked {
        "Post liked!"
    } else {
        "Post unliked!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Author, Post};
    use chrono::Utc;

    fn view(liked: bool, count: i64) -> PostView {
        PostView {
            post: Post {
                id: "p1".into(),
                title: "t".into(),
                content: "c".into(),
                created_at: Utc::now(),
                author: Author::named("ann"),
                like_count: count,
            },
            liked_by_user: liked,
            number: 1,
        }
    }

    #[test]
    fn toggle_picks_opposite_action() {
        assert_eq!(LikeAction::toggle_from(false), LikeAction::Like);
        assert_eq!(LikeAction::toggle_from(true), LikeAction::Unlike);
        assert!(LikeAction::Like.liked_after());
        assert!(!LikeAction::Unlike.liked_after());
    }

    #[test]
    fn reconcile_moves_count_by_one() {
        let mut v = view(false, 4);
        assert!(reconcile(&mut v, true));
        assert_eq!(v.post.like_count, 5);
        assert!(v.liked_by_user);

        assert!(reconcile(&mut v, false));
        assert_eq!(v.post.like_count, 4);
        assert!(!v.liked_by_user);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut v = view(true, 2);
        assert!(!reconcile(&mut v, true));
        assert_eq!(v.post.like_count, 2);
    }
}
