//! Base trait for screen state.

/// Marker trait for screen state objects.
///
/// States hold everything a renderer needs to draw the screen and are
/// compared in tests, hence Clone + PartialEq + Default.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
