use crate::domain::model::ElementState;
use crate::domain::ports::PageDriver;
use crate::domain::selectors::{FieldKey, SelectorMap};
use crate::utils::error::{FineCheckError, Result};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Visible,
    Clickable,
}

impl Readiness {
    fn is_met(self, state: ElementState) -> bool {
        match self {
            Readiness::Visible => state.displayed,
            Readiness::Clickable => state.displayed && state.enabled,
        }
    }
}

/// 輪詢頁面直到元素可見或可點擊
///
/// 頁面在步驟之間是非同步更新的，所以每個跨步驟的相依都透過這裡等待，
/// 而不是固定 sleep。
pub struct ElementWaiter<'a, D: PageDriver> {
    driver: &'a D,
    selectors: &'a SelectorMap,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a, D: PageDriver> ElementWaiter<'a, D> {
    pub fn new(driver: &'a D, selectors: &'a SelectorMap) -> Self {
        Self {
            driver,
            selectors,
            timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub async fn wait_visible(&self, key: FieldKey) -> Result<()> {
        self.wait_until(key, Readiness::Visible).await
    }

    pub async fn wait_clickable(&self, key: FieldKey) -> Result<()> {
        self.wait_until(key, Readiness::Clickable).await
    }

    async fn wait_until(&self, key: FieldKey, readiness: Readiness) -> Result<()> {
        let selector = self.selectors.locate(key);
        let start = Instant::now();
        tracing::debug!("⏳ Waiting for {} to be {:?} ({})", key, readiness, selector);

        loop {
            // 單次查詢也受剩餘時間限制，WebDriver 卡住時不會超出等待預算
            let remaining = self.timeout.saturating_sub(start.elapsed());
            match tokio::time::timeout(remaining, self.driver.element_state(selector)).await {
                Ok(Ok(Some(state))) if readiness.is_met(state) => {
                    tracing::debug!("✅ {} ready after {:?}", key, start.elapsed());
                    return Ok(());
                }
                Ok(Ok(_)) => {}
                // 頁面重繪時元素可能暫時失效，繼續等待
                Ok(Err(e)) => tracing::debug!("Lookup of {} failed while waiting: {}", key, e),
                Err(_) => tracing::debug!("Lookup of {} did not answer in time", key),
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                tracing::warn!("⚠️ Gave up waiting for {} after {:?}", key, elapsed);
                return Err(FineCheckError::TimeoutError {
                    field: key.to_string(),
                    selector: selector.to_string(),
                    waited_secs: self.timeout.as_secs(),
                });
            }

            let remaining = self.timeout - elapsed;
            tokio::time::sleep(self.poll_interval.min(remaining)).await;
        }
    }
}
