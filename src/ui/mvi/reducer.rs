//! Reducer trait for screen state.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms screen state based on intents.
///
/// All state transitions of a screen go through its reducer; network
/// calls live in the screen's view and only feed results back as intents.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
