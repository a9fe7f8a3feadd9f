//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (add, remove, clear)
/// - Lifecycle events (hydration from persisted storage)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
