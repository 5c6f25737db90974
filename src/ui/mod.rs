//! Screens of the forum client.
//!
//! Each screen follows the MVI layout in [`mvi`]: a state struct, an intent
//! enum, a pure reducer, and a view that performs fetches and feeds the
//! results back through the reducer. Views never return errors; failures
//! become a [`Notice`] on the state.

pub mod compose;
pub mod discussions;
pub mod history;
pub mod like;
pub mod mvi;
pub mod notice;
pub mod post_detail;
pub mod post_list;
pub mod preview;
pub mod profile;
pub mod route;
pub mod search;

pub use notice::{Notice, NoticeLevel};
pub use route::Route;

/// Result of a user action on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request went through and the state was updated.
    Completed,
    /// Rejected locally or by the backend; the state carries a notice.
    Rejected,
    /// The action cannot proceed here, go to this screen instead.
    Navigate(Route),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}
