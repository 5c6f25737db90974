//! Base trait for intents (user actions and fetch results).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (next page, toggle like, submit comment)
/// - Fetch outcomes (page loaded, request failed)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
