//! Own profile, own activity sections, and public profiles.

mod intent;
mod reducer;
mod section;
mod state;
mod view;

pub use intent::{MeIntent, SectionIntent, UserPageIntent};
pub use reducer::{MeReducer, SectionReducer, UserPageReducer};
pub use section::MeSection;
pub use state::{MeState, SectionState, UserPageState, UNKNOWN_POST, UNNAMED};
pub use view::{MeView, SectionView, UserPage};
