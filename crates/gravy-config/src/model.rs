//! Typed configuration models.
//!
//! # Design
//! - Every section has defaults, so partial documents are valid.
//! - Widget and sequencer sections reuse the option types of their crates.

use gravy_sequencer::StrayNextPolicy;
use gravy_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha};
use gravy_widgets::{AutoSizeOptions, InlineEditorOptions};
use serde::{Deserialize, Serialize};

/// Complete toolkit configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GravyConfig {
    /// Logging settings.
    pub telemetry: TelemetryConfig,
    /// Named queue settings.
    pub sequencer: SequencerConfig,
    /// Defaults for auto-sizing text areas.
    pub autosize: AutoSizeOptions,
    /// Defaults for inline editors.
    pub inline_editor: InlineEditorOptions,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Log level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::infer(),
        }
    }
}

impl TelemetryConfig {
    /// Borrow these settings as a subscriber configuration.
    #[must_use]
    pub fn logging_config(&self) -> LoggingConfig<'_> {
        LoggingConfig {
            level: &self.level,
            format: self.format,
            build_sha: build_sha(),
        }
    }
}

/// Named queue settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencerConfig {
    /// How `next()` calls on idle queues are reported.
    pub stray_next: StrayNextPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_documents_fill_defaults() {
        let config: GravyConfig = serde_json::from_value(json!({
            "sequencer": { "stray_next": "warn" },
            "autosize": { "min_height": 60.0 }
        }))
        .expect("partial config");

        assert_eq!(config.sequencer.stray_next, StrayNextPolicy::Warn);
        assert!((config.autosize.min_height - 60.0).abs() < f64::EPSILON);
        assert!(config.autosize.grow_on_key_up);
        assert_eq!(config.telemetry, TelemetryConfig::default());
        assert!(config.inline_editor.prompt_on_cancel);
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let result = serde_json::from_value::<GravyConfig>(json!({ "tooltips": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn logging_config_borrows_level() {
        let telemetry = TelemetryConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
        };
        let logging = telemetry.logging_config();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }
}
