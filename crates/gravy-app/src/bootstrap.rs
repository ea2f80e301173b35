use std::time::Duration;

use gravy_config::GravyConfig;
use gravy_telemetry::{GlobalContextGuard, init_logging, record_stage};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::toolkit::Toolkit;
use crate::walkthrough;

const UPLOAD_STEP_TIME: Duration = Duration::from_millis(200);
const FADE_GAP: Duration = Duration::from_millis(150);

/// Dependencies required to bootstrap the Gravy application.
pub(crate) struct BootstrapDependencies {
    config: GravyConfig,
    upload_step: Duration,
    fade_gap: Duration,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config =
            gravy_config::load_from_env().map_err(|err| AppError::config("config.load", err))?;
        Ok(Self::new(config, UPLOAD_STEP_TIME, FADE_GAP))
    }

    pub(crate) const fn new(
        config: GravyConfig,
        upload_step: Duration,
        fade_gap: Duration,
    ) -> Self {
        Self {
            config,
            upload_step,
            fade_gap,
        }
    }
}

/// Bootstraps the toolkit and runs both walkthroughs.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or a walkthrough fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    init_logging(&dependencies.config.telemetry.logging_config())
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let toolkit = boot(dependencies).await?;
    info!(queues = ?toolkit.queues().snapshot(), "Gravy toolkit shutting down");
    Ok(())
}

/// Everything after logging is installed: build the toolkit and run the
/// walkthroughs inside the process span.
pub(crate) async fn boot(dependencies: BootstrapDependencies) -> AppResult<Toolkit> {
    let BootstrapDependencies {
        config,
        upload_step,
        fade_gap,
    } = dependencies;
    let _context = GlobalContextGuard::new("bootstrap");

    info!(
        stray_next = config.sequencer.stray_next.as_str(),
        "Gravy toolkit bootstrap starting"
    );
    let toolkit = Toolkit::new(config);

    record_stage("upload");
    let uploaded = walkthrough::upload(&toolkit, upload_step).await?;
    info!(steps = ?uploaded, "upload walkthrough finished");

    record_stage("fade");
    let faded = walkthrough::fade(&toolkit, fade_gap).await?;
    info!(steps = ?faded, "fade walkthrough finished");

    record_stage("shutdown");
    Ok(toolkit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravy_sequencer::{QueueSnapshot, StrayNextPolicy};

    fn dependencies(config: GravyConfig) -> BootstrapDependencies {
        BootstrapDependencies::new(config, Duration::from_millis(20), Duration::from_millis(10))
    }

    #[tokio::test(start_paused = true)]
    async fn boot_runs_walkthroughs_with_injected_config() -> AppResult<()> {
        gravy_test_support::init_test_tracing();
        let mut config = GravyConfig::default();
        config.sequencer.stray_next = StrayNextPolicy::Warn;

        let toolkit = boot(dependencies(config)).await?;

        assert_eq!(toolkit.queues().stray_next_policy(), StrayNextPolicy::Warn);
        assert_eq!(
            toolkit.queues().snapshot(),
            vec![QueueSnapshot {
                name: walkthrough::UPLOAD_QUEUE.to_string(),
                pending: 0,
                in_progress: false,
            }]
        );
        assert_eq!(toolkit.lanes().names(), vec![walkthrough::FADE_LANE.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn run_app_with_reports_logging_install_failure() {
        // Guarantees a global subscriber exists before the boot path tries to install one.
        gravy_test_support::init_test_tracing();

        let err = run_app_with(dependencies(GravyConfig::default()))
            .await
            .expect_err("subscriber already installed");
        assert!(matches!(
            err,
            AppError::Telemetry {
                operation: "telemetry.init",
                ..
            }
        ));
    }
}
