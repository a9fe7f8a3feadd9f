//! Base trait for store state in MVI architecture.

/// Marker trait for state objects owned by a store.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything observers need to render)
/// - Comparable (PartialEq for detecting changes)
pub trait StoreState: Clone + PartialEq + Default + Send + 'static {}
