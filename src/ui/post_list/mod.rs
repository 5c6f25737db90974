//! Paged post list with like state and optional date filter.

mod intent;
mod reducer;
mod state;
mod view;

pub use intent::PostListIntent;
pub use reducer::{merge_page, PostListReducer};
pub use state::{PostFilter, PostListState, PostView};
pub use view::PostListView;
