use gravy_config::GravyConfig;
use gravy_sequencer::{Lane, LaneRegistry, QueueRegistry, Sequencer};
use gravy_widgets::{AutoSizeTextArea, InlineEditor};

use crate::error::{AppError, AppResult};

/// Owner of the queue registries and configured widget defaults.
///
/// Widgets and producers receive handles from here instead of reaching for
/// shared global state; every handle for a given name refers to the same
/// queue.
#[derive(Debug, Clone)]
pub struct Toolkit {
    config: GravyConfig,
    queues: QueueRegistry,
    lanes: LaneRegistry,
}

impl Toolkit {
    /// Build registries according to `config`.
    #[must_use]
    pub fn new(config: GravyConfig) -> Self {
        let queues = QueueRegistry::with_policy(config.sequencer.stray_next);
        Self {
            config,
            queues,
            lanes: LaneRegistry::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GravyConfig {
        &self.config
    }

    /// Callback queue registry.
    #[must_use]
    pub const fn queues(&self) -> &QueueRegistry {
        &self.queues
    }

    /// Async lane registry.
    #[must_use]
    pub const fn lanes(&self) -> &LaneRegistry {
        &self.lanes
    }

    /// Callback sequencer for `name`.
    #[must_use]
    pub fn sequencer(&self, name: impl Into<String>) -> Sequencer {
        self.queues.sequencer(name)
    }

    /// Async lane for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Sequencer`] when no Tokio runtime is available.
    pub fn lane(&self, name: impl Into<String>) -> AppResult<Lane> {
        self.lanes
            .lane(name)
            .map_err(|err| AppError::sequencer("lanes.lane", err))
    }

    /// Auto-sizing state for a text area using the configured defaults.
    #[must_use]
    pub const fn auto_size_text_area(&self, initial_len: usize) -> AutoSizeTextArea {
        AutoSizeTextArea::new(self.config.autosize, initial_len)
    }

    /// Inline editor using the configured defaults.
    #[must_use]
    pub fn inline_editor(&self) -> InlineEditor {
        InlineEditor::new(self.config.inline_editor.clone())
    }
}
