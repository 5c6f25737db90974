//! Single post page and the comments page.

mod intent;
mod reducer;
mod state;
mod view;

pub use intent::{CommentsIntent, PostPageIntent};
pub use reducer::{CommentsReducer, PostPageReducer};
pub use state::{ordinal_of, CommentsState, PostPageState};
pub use view::{CommentsView, PostPage};
