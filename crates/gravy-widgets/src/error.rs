//! Error types for widget helpers.

use thiserror::Error;

/// Result alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors raised while interpreting host-supplied values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    /// An event name was not one of the supported touch events.
    #[error("unknown touch event")]
    UnknownTouchEvent {
        /// Event name supplied by the caller.
        value: String,
    },
    /// A side code was not one of `t`, `b`, `l`, `r`.
    #[error("unknown side code")]
    UnknownSide {
        /// Code supplied by the caller.
        value: char,
    },
}
