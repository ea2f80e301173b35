//! Configuration sources: defaults, an optional JSON document, then
//! environment overrides.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::GravyConfig;

/// Path of a JSON configuration document.
pub const CONFIG_PATH_ENV: &str = "GRAVY_CONFIG";
/// Overrides `telemetry.level`.
pub const LOG_LEVEL_ENV: &str = "GRAVY_LOG_LEVEL";
/// Overrides `telemetry.format` (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "GRAVY_LOG_FORMAT";
/// Overrides `sequencer.stray_next` (`ignore` or `warn`).
pub const STRAY_NEXT_ENV: &str = "GRAVY_STRAY_NEXT";
/// Overrides `autosize.min_height`.
pub const AUTOSIZE_MIN_HEIGHT_ENV: &str = "GRAVY_AUTOSIZE_MIN_HEIGHT";

impl GravyConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json_str(document: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(document).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`GravyConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "configuration document loaded");
        Self::from_json_str(&document)
    }

    /// Apply overrides found through `lookup` (normally the process
    /// environment).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when an override cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.telemetry.level = level.trim().to_string();
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            self.telemetry.format = format.parse().map_err(|_| {
                ConfigError::invalid(
                    "telemetry",
                    "format",
                    format.clone(),
                    "must be json or pretty",
                )
            })?;
        }
        if let Some(policy) = lookup(STRAY_NEXT_ENV) {
            self.sequencer.stray_next = policy.parse().map_err(|_| {
                ConfigError::invalid(
                    "sequencer",
                    "stray_next",
                    policy.clone(),
                    "must be ignore or warn",
                )
            })?;
        }
        if let Some(height) = lookup(AUTOSIZE_MIN_HEIGHT_ENV) {
            self.autosize.min_height = height.trim().parse().map_err(|_| {
                ConfigError::invalid("autosize", "min_height", height.clone(), "must be a number")
            })?;
        }
        Ok(())
    }
}

/// Load configuration from the process environment.
///
/// # Errors
///
/// Returns an error if the referenced document or any override is invalid.
pub fn load_from_env() -> ConfigResult<GravyConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` in place of the process environment.
///
/// # Errors
///
/// Returns an error if the referenced document or any override is invalid.
pub fn load_with<F>(lookup: F) -> ConfigResult<GravyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(CONFIG_PATH_ENV) {
        Some(path) => GravyConfig::from_path(path)?,
        None => GravyConfig::default(),
    };
    config.apply_overrides(&lookup)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn overrides_replace_fields() {
        let mut config = GravyConfig::default();
        config
            .apply_overrides(lookup(&[
                (LOG_LEVEL_ENV, " debug "),
                (LOG_FORMAT_ENV, "json"),
                (STRAY_NEXT_ENV, "warn"),
                (AUTOSIZE_MIN_HEIGHT_ENV, "42.5"),
            ]))
            .expect("overrides apply");

        assert_eq!(config.telemetry.level, "debug");
        assert_eq!(config.telemetry.format, gravy_telemetry::LogFormat::Json);
        assert_eq!(
            config.sequencer.stray_next,
            gravy_sequencer::StrayNextPolicy::Warn
        );
        assert!((config.autosize.min_height - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn bad_override_names_the_field() {
        let mut config = GravyConfig::default();
        let err = config
            .apply_overrides(lookup(&[(STRAY_NEXT_ENV, "shout")]))
            .expect_err("invalid policy");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                section: "sequencer",
                field: "stray_next",
                ..
            }
        ));
    }

    #[test]
    fn load_with_validates_overrides() {
        let err = load_with(lookup(&[(LOG_LEVEL_ENV, "chatty")])).expect_err("bad level");
        assert!(matches!(err, ConfigError::InvalidField { field: "level", .. }));

        let config = load_with(lookup(&[])).expect("defaults load");
        assert_eq!(config, GravyConfig::default());
    }
}
