//! # Design
//!
//! - Centralize application-level errors for bootstrap and walkthroughs.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: gravy_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: gravy_telemetry::TelemetryError,
    },
    /// Lane operations failed.
    #[error("lane operation failed")]
    Sequencer {
        /// Operation identifier.
        operation: &'static str,
        /// Source sequencer error.
        source: gravy_sequencer::SequencerError,
    },
    /// A callback queue was cleared or dropped before it finished draining.
    #[error("queue drain interrupted")]
    Interrupted {
        /// Queue name.
        queue: String,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: gravy_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: gravy_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn sequencer(
        operation: &'static str,
        source: gravy_sequencer::SequencerError,
    ) -> Self {
        Self::Sequencer { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_helpers_build_variants() {
        let config = AppError::config(
            "load",
            gravy_config::ConfigError::InvalidField {
                section: "telemetry",
                field: "level",
                value: None,
                reason: "test",
            },
        );
        assert!(matches!(config, AppError::Config { .. }));
        assert_eq!(config.to_string(), "configuration operation failed");

        let telemetry = AppError::telemetry(
            "init",
            gravy_telemetry::TelemetryError::UnknownLogFormat {
                value: "xml".to_string(),
            },
        );
        assert!(matches!(telemetry, AppError::Telemetry { .. }));

        let sequencer = AppError::sequencer(
            "lane",
            gravy_sequencer::SequencerError::LaneClosed {
                name: "fade".to_string(),
            },
        );
        assert!(matches!(sequencer, AppError::Sequencer { .. }));

        let interrupted = AppError::Interrupted {
            queue: "upload".to_string(),
        };
        assert_eq!(interrupted.to_string(), "queue drain interrupted");
    }
}
