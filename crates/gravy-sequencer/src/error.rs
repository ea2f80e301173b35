//! # Design
//!
//! - Callback sequencers have no error channel; only async lanes can fail.
//! - Keep error messages constant while carrying the lane name for debugging.

use thiserror::Error;
use tokio::runtime::TryCurrentError;

/// Result alias for lane operations.
pub type SequencerResult<T> = Result<T, SequencerError>;

/// Errors raised by async lanes.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// The lane's drain task has stopped and can no longer accept steps.
    #[error("lane drain task is not running")]
    LaneClosed {
        /// Lane name.
        name: String,
    },
    /// A step was discarded (for example by `clear`) before it ran.
    #[error("lane step discarded before it ran")]
    StepDiscarded {
        /// Lane name.
        name: String,
    },
    /// No Tokio runtime was available to host the lane's drain task.
    #[error("no async runtime available for lane")]
    NoRuntime {
        /// Lane name.
        name: String,
        /// Underlying runtime lookup error.
        source: TryCurrentError,
    },
}

impl SequencerError {
    /// Name of the lane the error refers to.
    #[must_use]
    pub fn lane(&self) -> &str {
        match self {
            Self::LaneClosed { name }
            | Self::StepDiscarded { name }
            | Self::NoRuntime { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn sequencer_error_messages_are_constant() {
        let closed = SequencerError::LaneClosed {
            name: "upload".to_string(),
        };
        assert_eq!(closed.to_string(), "lane drain task is not running");
        assert_eq!(closed.lane(), "upload");
        assert!(closed.source().is_none());

        let discarded = SequencerError::StepDiscarded {
            name: "fade".to_string(),
        };
        assert_eq!(discarded.to_string(), "lane step discarded before it ran");
        assert_eq!(discarded.lane(), "fade");
    }

    #[test]
    fn no_runtime_error_exposes_source() {
        let Err(source) = tokio::runtime::Handle::try_current() else {
            panic!("tests run outside a runtime");
        };
        let err = SequencerError::NoRuntime {
            name: "resize".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "no async runtime available for lane");
        assert!(err.source().is_some());
    }
}
