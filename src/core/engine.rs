use crate::core::workflow::{FineCheckWorkflow, WorkflowSettings};
use crate::domain::model::{Credentials, FineReading};
use crate::domain::ports::{PageDriver, SessionLauncher};
use crate::domain::selectors::SelectorMap;
use crate::utils::error::{FineCheckError, Result};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type ShutdownFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

type ShutdownFactory = Box<dyn Fn() -> ShutdownFuture + Send + Sync>;

/// 等待 Ctrl-C 或 SIGTERM；訊號註冊失敗時永不完成
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::debug!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                if sigterm.recv().await.is_none() {
                    std::future::pending::<()>().await;
                }
            }
            Err(e) => {
                tracing::debug!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// 擁有一次檢查的瀏覽器 session：啟動、執行流程、最後一定釋放
pub struct FineCheckEngine<L: SessionLauncher> {
    launcher: L,
    selectors: SelectorMap,
    settings: WorkflowSettings,
    linger: Duration,
    shutdown: ShutdownFactory,
}

impl<L: SessionLauncher> FineCheckEngine<L> {
    pub fn new(launcher: L, selectors: SelectorMap, settings: WorkflowSettings) -> Self {
        Self {
            launcher,
            selectors,
            settings,
            linger: Duration::ZERO,
            shutdown: Box::new(|| -> ShutdownFuture { Box::pin(shutdown_signal()) }),
        }
    }

    /// 關閉瀏覽器前保留視窗，方便肉眼確認結果
    pub fn with_linger(mut self, linger: Duration) -> Self {
        self.linger = linger;
        self
    }

    /// 替換中斷訊號，每次 `run` 都會建立一個新的 future
    pub fn with_shutdown<F, Fut>(mut self, shutdown: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.shutdown = Box::new(move || -> ShutdownFuture { Box::pin(shutdown()) });
        self
    }

    pub async fn run(&self, credentials: &Credentials) -> Result<FineReading> {
        tracing::info!("🚀 Starting fine check for plate {}", credentials.plate);
        let mut shutdown = (self.shutdown)();

        let driver = tokio::select! {
            launched = self.launcher.launch() => launched?,
            _ = &mut shutdown => {
                tracing::warn!("⚠️ Interrupted while starting the browser");
                return Err(FineCheckError::Interrupted);
            }
        };
        tracing::info!("✅ Browser session started");

        let mut workflow = FineCheckWorkflow::new(&driver, &self.selectors, &self.settings);
        let result = tokio::select! {
            result = workflow.run(credentials) => result,
            _ = &mut shutdown => {
                tracing::warn!("⚠️ Interrupted, closing the browser session");
                Err(FineCheckError::Interrupted)
            }
        };

        if let Err(e) = &result {
            tracing::error!("❌ Check stopped after stage '{}': {}", workflow.stage(), e);
            // 確認是否被導向其他頁面
            match driver.current_url().await {
                Ok(url) => tracing::error!("📍 Current Page: {}", url),
                Err(e) => tracing::debug!("Current page unavailable: {}", e),
            }
        }

        self.release(&driver).await;
        result
    }

    async fn release(&self, driver: &L::Driver) {
        if !self.linger.is_zero() {
            tracing::info!("⏸️ Keeping the browser open for {:?}", self.linger);
            tokio::time::sleep(self.linger).await;
        }

        match driver.quit().await {
            Ok(()) => tracing::info!("🧹 Browser session closed"),
            Err(e) => tracing::warn!("⚠️ Failed to close browser session cleanly: {}", e),
        }
    }
}
