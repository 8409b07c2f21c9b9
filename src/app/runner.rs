use crate::config::PortalConfig;
use crate::core::engine::FineCheckEngine;
use crate::domain::ports::{CredentialSource, Reporter, RunStatus, SessionLauncher};
use crate::utils::validation::Validate;
use std::time::Duration;

/// 一次完整的檢查：讀取憑證、執行流程、回報結果
///
/// 憑證有問題時不會啟動瀏覽器。
pub async fn run_check<L: SessionLauncher>(
    source: &dyn CredentialSource,
    launcher: L,
    portal: &PortalConfig,
    reporter: &dyn Reporter,
    linger: Duration,
) -> RunStatus {
    let credentials = match source.load() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("❌ Could not load credentials from {}: {}", source.name(), e);
            reporter.report_failure(&e);
            return RunStatus::ConfigurationFailed;
        }
    };

    if let Err(e) = portal.validate() {
        reporter.report_failure(&e);
        return RunStatus::ConfigurationFailed;
    }

    let engine = FineCheckEngine::new(
        launcher,
        portal.selectors.clone(),
        portal.workflow_settings(),
    )
    .with_linger(linger);

    match engine.run(&credentials).await {
        Ok(reading) => {
            let status = RunStatus::from(reading.outcome());
            if let Err(e) = reporter.report(&credentials.plate, &reading) {
                tracing::warn!("⚠️ Failed to report the result: {}", e);
            }
            status
        }
        Err(e) => {
            reporter.report_failure(&e);
            RunStatus::WorkflowFailed
        }
    }
}
