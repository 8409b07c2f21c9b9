use crate::domain::model::{FineOutcome, FineReading, Plate};
use crate::domain::ports::{Notice, Notifier, Reporter, RunStatus};
use crate::utils::error::{FineCheckError, Result};
use std::time::Duration;

pub const NOTIFICATION_TITLE: &str = "⚠️ Traffic Fine Alert";
pub const NOTIFICATION_APP_NAME: &str = "TrafficBot";
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

pub mod exit_code {
    pub const CLEAN: i32 = 0;
    pub const CONFIGURATION_ERROR: i32 = 1;
    pub const FINES_FOUND: i32 = 2;
    pub const WORKFLOW_ERROR: i32 = 3;
    pub const UNKNOWN_RESULT: i32 = 4;
}

impl From<FineOutcome> for RunStatus {
    fn from(outcome: FineOutcome) -> Self {
        match outcome {
            FineOutcome::Clean => RunStatus::Clean,
            FineOutcome::FinesFound => RunStatus::FinesFound,
            FineOutcome::Unknown => RunStatus::Unknown,
        }
    }
}

pub fn fine_notice(plate: &Plate, reading: &FineReading) -> Notice {
    Notice {
        title: NOTIFICATION_TITLE.to_string(),
        message: format!("Vehicle {} has {} EGP in fines.", plate, reading.text),
        app_name: NOTIFICATION_APP_NAME.to_string(),
        timeout: NOTIFICATION_TIMEOUT,
    }
}

/// 互動模式：有罰單時跳出桌面通知，不影響結束碼
pub struct DesktopReporter<N: Notifier> {
    notifier: N,
}

impl<N: Notifier> DesktopReporter<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<N: Notifier> Reporter for DesktopReporter<N> {
    fn report(&self, plate: &Plate, reading: &FineReading) -> Result<()> {
        match reading.outcome() {
            FineOutcome::FinesFound => {
                let notice = fine_notice(plate, reading);
                if let Err(e) = self.notifier.notify(&notice) {
                    // 通知失敗時退回終端輸出
                    tracing::warn!("⚠️ {}", e);
                    println!("{}: {}", notice.title, notice.message);
                }
            }
            FineOutcome::Clean => println!("No fines found. Clean record."),
            FineOutcome::Unknown => println!(
                "⚠️ Could not read a fine amount from '{}'. Check the portal manually.",
                reading.text
            ),
        }
        Ok(())
    }

    fn report_failure(&self, error: &FineCheckError) {
        println!("❌ An error occurred: {}", error);
    }

    fn exit_code(&self, status: RunStatus) -> i32 {
        match status {
            RunStatus::ConfigurationFailed => exit_code::CONFIGURATION_ERROR,
            _ => exit_code::CLEAN,
        }
    }
}

/// 排程 / CI 模式：輸出結構化 log，並以結束碼回報結果
#[derive(Debug, Clone, Default)]
pub struct CiReporter {
    /// 所有非 clean 的結果都回傳 1
    uniform_exit_codes: bool,
}

impl CiReporter {
    pub fn new(uniform_exit_codes: bool) -> Self {
        Self { uniform_exit_codes }
    }
}

impl Reporter for CiReporter {
    fn report(&self, plate: &Plate, reading: &FineReading) -> Result<()> {
        let outcome = reading.outcome();
        let checked_at = reading.checked_at.to_rfc3339();

        match outcome {
            FineOutcome::FinesFound => tracing::warn!(
                plate = %plate,
                amount = %reading.text,
                outcome = %outcome,
                checked_at = %checked_at,
                "🚨 FINES FOUND: {} EGP",
                reading.text
            ),
            FineOutcome::Clean => tracing::info!(
                plate = %plate,
                amount = %reading.text,
                outcome = %outcome,
                checked_at = %checked_at,
                "✅ No fines found. Clean record."
            ),
            FineOutcome::Unknown => tracing::error!(
                plate = %plate,
                amount = %reading.text,
                outcome = %outcome,
                checked_at = %checked_at,
                "❓ Fine amount could not be determined"
            ),
        }
        Ok(())
    }

    fn report_failure(&self, error: &FineCheckError) {
        tracing::error!(
            category = ?error.category(),
            severity = ?error.severity(),
            "❌ Fine check failed: {}",
            error
        );
        tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
    }

    fn exit_code(&self, status: RunStatus) -> i32 {
        if self.uniform_exit_codes {
            return match status {
                RunStatus::Clean => exit_code::CLEAN,
                _ => 1,
            };
        }

        match status {
            RunStatus::Clean => exit_code::CLEAN,
            RunStatus::ConfigurationFailed => exit_code::CONFIGURATION_ERROR,
            RunStatus::FinesFound => exit_code::FINES_FOUND,
            RunStatus::WorkflowFailed => exit_code::WORKFLOW_ERROR,
            RunStatus::Unknown => exit_code::UNKNOWN_RESULT,
        }
    }
}
