use crate::core::amount::read_fine;
use crate::core::waiter::{ElementWaiter, DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};
use crate::domain::model::{Credentials, FineReading, WorkflowStage};
use crate::domain::ports::PageDriver;
use crate::domain::selectors::{FieldKey, SelectorMap};
use crate::utils::error::{FineCheckError, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub target_url: String,
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
}

impl WorkflowSettings {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// 罰單查詢表單流程
///
/// `Start -> PlateEntered -> SearchSubmitted -> DetailsEntered -> ResultRead`，
/// 嚴格線性，任何一步失敗整個流程就結束，不重試。
pub struct FineCheckWorkflow<'a, D: PageDriver> {
    driver: &'a D,
    selectors: &'a SelectorMap,
    settings: &'a WorkflowSettings,
    stage: WorkflowStage,
}

impl<'a, D: PageDriver> FineCheckWorkflow<'a, D> {
    pub fn new(driver: &'a D, selectors: &'a SelectorMap, settings: &'a WorkflowSettings) -> Self {
        Self {
            driver,
            selectors,
            settings,
            stage: WorkflowStage::Start,
        }
    }

    /// 最後到達的階段，失敗時用來判斷卡在哪裡
    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub async fn run(&mut self, credentials: &Credentials) -> Result<FineReading> {
        println!("1. Opening website...");
        tracing::info!("🌐 Navigating to {}", self.settings.target_url);
        self.driver.navigate(&self.settings.target_url).await?;

        println!("2. Entering License Plate...");
        self.enter_plate(credentials).await?;
        self.advance(WorkflowStage::PlateEntered);

        println!("3. Clicking 'Total Fines' to proceed...");
        self.submit_search().await?;
        self.advance(WorkflowStage::SearchSubmitted);

        println!("4. Entering National ID and Phone...");
        self.enter_details(credentials).await?;
        self.advance(WorkflowStage::DetailsEntered);

        println!("5. Requesting violation details...");
        self.click(FieldKey::CheckDetailsButton).await?;

        println!("6. Reading Result...");
        let reading = self.read_result().await?;
        self.advance(WorkflowStage::ResultRead);

        println!(">> REPORT: Total Fines detected: {} EGP", reading.text);
        Ok(reading)
    }

    async fn enter_plate(&self, credentials: &Credentials) -> Result<()> {
        // 只等第一個欄位，其餘欄位在同一頁面
        self.waiter().wait_visible(FieldKey::PlateLetter1).await?;

        let plate = &credentials.plate;
        self.fill(FieldKey::PlateLetter1, &plate.letters[0], false).await?;
        self.fill(FieldKey::PlateLetter2, &plate.letters[1], false).await?;
        self.fill(FieldKey::PlateLetter3, &plate.letters[2], false).await?;
        self.fill(FieldKey::PlateNumber, &plate.number, false).await
    }

    async fn submit_search(&self) -> Result<()> {
        self.waiter().wait_clickable(FieldKey::SearchButton).await?;
        self.click(FieldKey::SearchButton).await
    }

    async fn enter_details(&self, credentials: &Credentials) -> Result<()> {
        // 頁面 7 出現的同步點
        self.waiter().wait_visible(FieldKey::NationalId).await?;

        self.fill(FieldKey::NationalId, &credentials.national_id, true).await?;
        self.fill(FieldKey::PhoneNumber, &credentials.phone_number, true).await
    }

    async fn read_result(&self) -> Result<FineReading> {
        self.waiter().wait_visible(FieldKey::TotalFines).await?;

        let selector = self.selectors.locate(FieldKey::TotalFines);
        let text = self
            .driver
            .text(selector)
            .await
            .map_err(|e| tag_field(FieldKey::TotalFines, e))?;
        tracing::debug!("Raw result text: {:?}", text);

        Ok(read_fine(&text))
    }

    async fn fill(&self, key: FieldKey, value: &str, clear_first: bool) -> Result<()> {
        let selector = self.selectors.locate(key);
        if clear_first {
            self.driver
                .clear(selector)
                .await
                .map_err(|e| tag_field(key, e))?;
        }
        self.driver
            .send_keys(selector, value)
            .await
            .map_err(|e| tag_field(key, e))?;
        tracing::debug!("⌨️ Filled {}", key);
        Ok(())
    }

    async fn click(&self, key: FieldKey) -> Result<()> {
        let selector = self.selectors.locate(key);
        self.driver
            .click(selector)
            .await
            .map_err(|e| tag_field(key, e))?;
        tracing::debug!("🖱️ Clicked {}", key);
        Ok(())
    }

    fn waiter(&self) -> ElementWaiter<'a, D> {
        ElementWaiter::new(self.driver, self.selectors)
            .with_timeout(self.settings.wait_timeout)
            .with_poll_interval(self.settings.poll_interval)
    }

    fn advance(&mut self, next: WorkflowStage) {
        tracing::info!("➡️ {} -> {}", self.stage, next);
        self.stage = next;
    }
}

/// 將 adapter 回報的 selector 換成邏輯欄位名稱
fn tag_field(key: FieldKey, err: FineCheckError) -> FineCheckError {
    match err {
        FineCheckError::ElementError {
            action, message, ..
        } => FineCheckError::ElementError {
            field: key.to_string(),
            action,
            message,
        },
        other => other,
    }
}
