mod debounce;
mod intent;
mod location;
mod reducer;
mod state;
mod view;

pub use debounce::Debouncer;
pub use intent::SearchIntent;
pub use location::{SearchLocation, SEARCH_PATH};
pub use reducer::SearchReducer;
pub use state::SearchState;
pub use view::SearchView;
