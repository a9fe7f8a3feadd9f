use crate::notify::Notification;

/// Work the store performs after committing a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchlistEffect {
    /// Serialize the committed state under the watchlist key.
    Persist,
    /// Delete the watchlist key instead of writing an empty snapshot.
    ErasePersisted,
    /// Hand a message to the notification sink.
    Notify(Notification),
}
