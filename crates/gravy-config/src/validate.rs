//! Validation helpers for configuration documents.

use crate::error::{ConfigError, ConfigResult};
use crate::model::GravyConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl GravyConfig {
    /// Check every field for values the toolkit cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] for the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_log_level(&self.telemetry.level)?;
        validate_length("autosize", "min_height", self.autosize.min_height)?;
        validate_length("inline_editor", "extra_height", self.inline_editor.extra_height)?;
        Ok(())
    }
}

pub(crate) fn validate_log_level(level: &str) -> ConfigResult<()> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            "telemetry",
            "level",
            level.to_string(),
            "must be one of trace, debug, info, warn, error",
        ))
    }
}

pub(crate) fn validate_length(
    section: &'static str,
    field: &'static str,
    value: f64,
) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            section,
            field,
            value.to_string(),
            "must be a finite, non-negative number",
        ))
    }
}
