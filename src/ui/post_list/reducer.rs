use std::collections::HashSet;

use chrono::NaiveDate;

use crate::api::Post;
use crate::ui::like;
use crate::ui::mvi::Reducer;
use crate::ui::notice::Notice;
use crate::ui::post_list::intent::PostListIntent;
use crate::ui::post_list::state::{PostFilter, PostListState, PostView};

/// Merge one raw page with the user's like set.
///
/// The filter runs before numbering, so a filtered page can show fewer than
/// `page_size` posts while more pages remain: continuation is decided on the
/// raw page alone.
pub fn merge_page(
    raw: Vec<Post>,
    liked: &HashSet<String>,
    page: u32,
    page_size: u32,
    filter: PostFilter,
    today: NaiveDate,
) -> (Vec<PostView>, bool) {
    let has_next_page = raw.len() == page_size as usize;
    let offset = (page.max(1) as usize - 1) * page_size as usize;

    let views = raw
        .into_iter()
        .filter(|post| filter.matches(&post.created_at, today))
        .enumerate()
        .map(|(index, post)| PostView {
            liked_by_user: liked.contains(&post.id),
            number: offset + index + 1,
            post,
        })
        .collect();

    (views, has_next_page)
}

pub struct PostListReducer;

impl Reducer for PostListReducer {
    type State = PostListState;
    type Intent = PostListIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PostListIntent::FetchStarted => PostListState {
                loading: true,
                ..state
            },
            PostListIntent::PageLoaded {
                posts,
                liked,
                today,
            } => {
                let (posts, has_next_page) =
                    merge_page(posts, &liked, state.page, state.page_size, state.filter, today);
                PostListState {
                    posts,
                    has_next_page,
                    loading: false,
                    ..state
                }
            }
            PostListIntent::FetchFailed { reason } => PostListState {
                loading: false,
                has_next_page: false,
                notice: Some(Notice::error(format!("Failed to load posts: {}", reason))),
                ..state
            },
            PostListIntent::NextPage => {
                if !state.has_next_page {
                    return PostListState {
                        notice: Some(Notice::warning("You are already on the last page.")),
                        ..state
                    };
                }
                PostListState {
                    page: state.page + 1,
                    ..state
                }
            }
            PostListIntent::PreviousPage => PostListState {
                page: state.page.saturating_sub(1).max(1),
                ..state
            },
            PostListIntent::LikeConfirmed { post_id, liked } => {
                let mut state = state;
                let changed = state
                    .posts
                    .iter_mut()
                    .find(|view| view.post.id == post_id)
                    .map(|view| like::reconcile(view, liked))
                    .unwrap_or(false);
                if changed {
                    state.notice = Some(Notice::success(like::confirmation(liked)));
                }
                state
            }
            PostListIntent::PostRemoved { post_id } => {
                let mut state = state;
                state.posts.retain(|view| view.post.id != post_id);
                state.notice = Some(Notice::success("Post deleted successfully."));
                state
            }
            PostListIntent::Notify(notice) => PostListState {
                notice: Some(notice),
                ..state
            },
            PostListIntent::DismissNotice => PostListState {
                notice: None,
                ..state
            },
        }
    }
}
