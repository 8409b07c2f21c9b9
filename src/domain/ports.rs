use crate::domain::model::{Credentials, ElementState, FineReading, Plate};
use crate::domain::selectors::Selector;
use crate::utils::error::{FineCheckError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// 一個已啟動、可操作的瀏覽器 session
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;

    /// 元素不存在時回傳 `Ok(None)`
    async fn element_state(&self, selector: &Selector) -> Result<Option<ElementState>>;

    async fn clear(&self, selector: &Selector) -> Result<()>;
    async fn send_keys(&self, selector: &Selector, text: &str) -> Result<()>;
    async fn click(&self, selector: &Selector) -> Result<()>;
    async fn text(&self, selector: &Selector) -> Result<String>;
    async fn current_url(&self) -> Result<String>;

    /// 釋放 session；呼叫後不可再使用
    async fn quit(&self) -> Result<()>;
}

#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Driver: PageDriver;

    async fn launch(&self) -> Result<Self::Driver>;
}

pub trait CredentialSource: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self) -> Result<Credentials>;
}

/// 檢查完成後的處理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Clean,
    FinesFound,
    Unknown,
    ConfigurationFailed,
    WorkflowFailed,
}

pub trait Reporter: Send + Sync {
    fn report(&self, plate: &Plate, reading: &FineReading) -> Result<()>;
    fn report_failure(&self, error: &FineCheckError);
    fn exit_code(&self, status: RunStatus) -> i32;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub app_name: String,
    pub timeout: Duration,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice) -> Result<()>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notice: &Notice) -> Result<()> {
        (**self).notify(notice)
    }
}
