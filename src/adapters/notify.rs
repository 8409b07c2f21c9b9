use crate::domain::ports::{Notice, Notifier};
use crate::utils::error::Result;
#[cfg(feature = "desktop-notify")]
use crate::utils::error::FineCheckError;

/// 透過作業系統通知中心顯示
#[cfg(feature = "desktop-notify")]
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

#[cfg(feature = "desktop-notify")]
impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) -> Result<()> {
        let timeout_ms = u32::try_from(notice.timeout.as_millis()).unwrap_or(u32::MAX);

        notify_rust::Notification::new()
            .summary(&notice.title)
            .body(&notice.message)
            .appname(&notice.app_name)
            .timeout(notify_rust::Timeout::Milliseconds(timeout_ms))
            .show()
            .map_err(|e| FineCheckError::NotificationError {
                message: e.to_string(),
            })?;

        tracing::debug!("🔔 Desktop notification shown: {}", notice.title);
        Ok(())
    }
}

/// 沒有桌面環境時只寫 log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) -> Result<()> {
        tracing::warn!("🔔 {}: {}", notice.title, notice.message);
        Ok(())
    }
}

#[cfg(feature = "desktop-notify")]
pub fn default_notifier() -> Box<dyn Notifier> {
    Box::new(DesktopNotifier)
}

#[cfg(not(feature = "desktop-notify"))]
pub fn default_notifier() -> Box<dyn Notifier> {
    Box::new(LogNotifier)
}
