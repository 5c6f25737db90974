//! Model-View-Intent (MVI) primitives shared by all screens.
//!
//! ```text
//! Command ──→ View ──fetch──→ Intent ──→ Reducer ──→ State ──→ render
//! ```
//!
//! - **State**: everything a screen shows
//! - **Intent**: user actions and fetch results
//! - **Reducer**: pure transition from (State, Intent) to State

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;

/// Run `$intent` through `$reducer` and store the result in `$self.$field`.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer as $crate::ui::mvi::Reducer>::reduce(
            std::mem::take(&mut $self.$field),
            $intent,
        );
    };
}

pub(crate) use dispatch_mvi;
