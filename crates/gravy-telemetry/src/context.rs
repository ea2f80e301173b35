//! Process-level span helpers.

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Guard that keeps the application-level span entered for the lifetime of the process.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    #[must_use]
    /// Enter the application-level tracing span for the lifetime of the guard.
    pub fn new(stage: impl Into<String>) -> Self {
        let stage = stage.into();
        let span: &'static Span = Box::leak(Box::new(
            tracing::info_span!("gravy", stage = %stage, build_sha = %build_sha()),
        ));
        let guard = span.enter();
        Self { _guard: guard }
    }
}

/// Record the current stage on the active span.
pub fn record_stage(stage: &str) {
    Span::current().record("stage", tracing::field::display(stage));
}
