//! Explicit async request state.

/// The state of a data fetch as seen by a view.
///
/// Views match on this exhaustively instead of juggling loading/error flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch<T> {
    /// Request issued, no result yet.
    Pending,
    /// Request succeeded.
    Ready(T),
    /// Request failed; carries a user-facing message.
    Failed(String),
}

impl<T> Fetch<T> {
    /// Build a settled fetch from a result, keeping only the error's display text.
    pub fn settle<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    /// Transform the ready value, preserving pending and failed states.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetch<U> {
        match self {
            Self::Pending => Fetch::Pending,
            Self::Ready(value) => Fetch::Ready(f(value)),
            Self::Failed(message) => Fetch::Failed(message),
        }
    }
}
