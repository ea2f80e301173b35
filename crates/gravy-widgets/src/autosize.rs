//! Text areas that grow (and shrink) with their content.
//!
//! # Design
//! - The host measures; [`AutoSizeTextArea::auto_size`] decides the height.
//! - Growth is detected from `scroll_height`; shrinking needs a proxy
//!   measurement because a text area never reports less content than its
//!   current height.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tunables for auto-sizing text areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSizeOptions {
    /// Re-run sizing after every key release.
    pub grow_on_key_up: bool,
    /// Smallest height the text area may shrink to.
    pub min_height: f64,
}

impl Default for AutoSizeOptions {
    fn default() -> Self {
        Self {
            grow_on_key_up: true,
            min_height: 100.0,
        }
    }
}

/// Measurements taken from the text area just before sizing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextAreaMetrics {
    /// Full content height (`scrollHeight`).
    pub scroll_height: f64,
    /// Current CSS height.
    pub height: f64,
    /// Inner height (`clientHeight`).
    pub client_height: f64,
    /// Length of the current value, in characters.
    pub value_len: usize,
}

/// Sizing state for one text area.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoSizeTextArea {
    options: AutoSizeOptions,
    old_length: usize,
}

impl AutoSizeTextArea {
    /// Track a text area whose value currently has `initial_len` characters.
    #[must_use]
    pub const fn new(options: AutoSizeOptions, initial_len: usize) -> Self {
        Self {
            options,
            old_length: initial_len,
        }
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &AutoSizeOptions {
        &self.options
    }

    /// Change the minimum height used by later sizing passes.
    pub const fn set_min_height(&mut self, min_height: f64) {
        self.options.min_height = min_height;
    }

    /// Decide the new height, if any.
    ///
    /// `measure_proxy` is only called when the content shrank; it should
    /// return the outer height of an off-screen element as wide as the text
    /// area holding the value plus a trailing newline.
    pub fn auto_size<F>(&mut self, metrics: &TextAreaMetrics, measure_proxy: F) -> Option<f64>
    where
        F: FnOnce() -> f64,
    {
        let normalised = metrics.scroll_height + (metrics.height - metrics.client_height);
        let new_height = if (normalised - metrics.height).abs() > f64::EPSILON {
            Some(normalised)
        } else if self.old_length > metrics.value_len {
            Some(measure_proxy())
        } else {
            None
        };
        self.old_length = metrics.value_len;

        let resized = new_height.map(|height| height.max(self.options.min_height));
        if let Some(height) = resized {
            trace!(height, "text area resized");
        }
        resized
    }

    /// Key-up hook: sizes only when `grow_on_key_up` is enabled.
    pub fn on_key_up<F>(&mut self, metrics: &TextAreaMetrics, measure_proxy: F) -> Option<f64>
    where
        F: FnOnce() -> f64,
    {
        if self.options.grow_on_key_up {
            self.auto_size(metrics, measure_proxy)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_height: f64, height: f64, value_len: usize) -> TextAreaMetrics {
        TextAreaMetrics {
            scroll_height,
            height,
            client_height: height,
            value_len,
        }
    }

    #[test]
    fn grows_to_scroll_height() {
        let mut area = AutoSizeTextArea::new(AutoSizeOptions::default(), 10);
        let resized = area.auto_size(&metrics(180.0, 120.0, 40), || unreachable!());
        assert_eq!(resized, Some(180.0));
    }

    #[test]
    fn accounts_for_borders_and_padding() {
        let mut area = AutoSizeTextArea::new(AutoSizeOptions::default(), 0);
        let measured = TextAreaMetrics {
            scroll_height: 200.0,
            height: 150.0,
            client_height: 140.0,
            value_len: 5,
        };
        assert_eq!(area.auto_size(&measured, || 0.0), Some(210.0));
    }

    #[test]
    fn shrinking_uses_proxy_and_min_height() {
        let mut area = AutoSizeTextArea::new(AutoSizeOptions::default(), 80);
        assert_eq!(area.auto_size(&metrics(300.0, 300.0, 60), || 240.0), Some(240.0));
        assert_eq!(area.auto_size(&metrics(240.0, 240.0, 2), || 20.0), Some(100.0));
    }

    #[test]
    fn unchanged_content_needs_no_resize() {
        let mut area = AutoSizeTextArea::new(AutoSizeOptions::default(), 5);
        assert_eq!(area.auto_size(&metrics(120.0, 120.0, 5), || unreachable!()), None);
        assert_eq!(area.auto_size(&metrics(120.0, 120.0, 9), || unreachable!()), None);
    }

    #[test]
    fn key_up_respects_option() {
        let options = AutoSizeOptions {
            grow_on_key_up: false,
            ..AutoSizeOptions::default()
        };
        let mut area = AutoSizeTextArea::new(options, 0);
        assert_eq!(area.on_key_up(&metrics(500.0, 120.0, 50), || 0.0), None);

        area.set_min_height(40.0);
        assert!((area.options().min_height - 40.0).abs() < f64::EPSILON);
    }
}
