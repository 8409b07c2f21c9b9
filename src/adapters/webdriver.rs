use crate::domain::model::ElementState;
use crate::domain::ports::{PageDriver, SessionLauncher};
use crate::domain::selectors::Selector;
use crate::utils::error::{FineCheckError, Result};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub webdriver_url: String,
    pub headless: bool,
    /// 容器內執行 Chrome 時需要
    pub no_sandbox: bool,
    pub window_size: (u32, u32),
    pub chrome_binary: Option<String>,
    pub proxy_url: Option<String>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: false,
            no_sandbox: false,
            window_size: (1920, 1080),
            chrome_binary: None,
            proxy_url: None,
        }
    }
}

impl BrowserOptions {
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-dev-shm-usage".to_string(),
            format!("--window-size={},{}", self.window_size.0, self.window_size.1),
        ];

        if self.headless {
            args.push("--headless=new".to_string());
            args.push("--disable-gpu".to_string());
        }

        if self.no_sandbox {
            args.push("--no-sandbox".to_string());
        }

        if let Some(proxy_url) = &self.proxy_url {
            args.push(format!("--proxy-server={}", proxy_url));
        }

        args
    }

    pub fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut chrome_opts = serde_json::Map::new();
        chrome_opts.insert("args".to_string(), json!(self.chrome_args()));
        if let Some(binary) = &self.chrome_binary {
            chrome_opts.insert("binary".to_string(), json!(binary));
        }

        let mut caps = serde_json::Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
        caps
    }
}

pub struct WebDriverLauncher {
    options: BrowserOptions,
}

impl WebDriverLauncher {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl SessionLauncher for WebDriverLauncher {
    type Driver = WebDriverSession;

    async fn launch(&self) -> Result<WebDriverSession> {
        tracing::info!(
            "Connecting to WebDriver at {} (headless: {})",
            self.options.webdriver_url,
            self.options.headless
        );

        let client = ClientBuilder::native()
            .capabilities(self.options.capabilities())
            .connect(&self.options.webdriver_url)
            .await
            .map_err(|e| FineCheckError::LaunchError {
                message: format!("{} ({})", e, self.options.webdriver_url),
            })?;

        Ok(WebDriverSession { client })
    }
}

/// 以 fantoccini 連線的 WebDriver session
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    async fn find(&self, selector: &Selector, action: &str) -> Result<Element> {
        self.client
            .find(locator(selector))
            .await
            .map_err(|e| element_error(selector, action, e))
    }
}

#[async_trait]
impl PageDriver for WebDriverSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| FineCheckError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn element_state(&self, selector: &Selector) -> Result<Option<ElementState>> {
        let element = match self.client.find(locator(selector)).await {
            Ok(element) => element,
            // 還沒出現在頁面上
            Err(e) if e.is_no_such_element() => return Ok(None),
            Err(e) => return Err(element_error(selector, "find", e)),
        };

        let displayed = element
            .is_displayed()
            .await
            .map_err(|e| element_error(selector, "inspect", e))?;
        let enabled = element
            .is_enabled()
            .await
            .map_err(|e| element_error(selector, "inspect", e))?;

        Ok(Some(ElementState { displayed, enabled }))
    }

    async fn clear(&self, selector: &Selector) -> Result<()> {
        self.find(selector, "clear")
            .await?
            .clear()
            .await
            .map_err(|e| element_error(selector, "clear", e))
    }

    async fn send_keys(&self, selector: &Selector, text: &str) -> Result<()> {
        self.find(selector, "type into")
            .await?
            .send_keys(text)
            .await
            .map_err(|e| element_error(selector, "type into", e))
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        self.find(selector, "click")
            .await?
            .click()
            .await
            .map_err(|e| element_error(selector, "click", e))
    }

    async fn text(&self, selector: &Selector) -> Result<String> {
        self.find(selector, "read")
            .await?
            .text()
            .await
            .map_err(|e| element_error(selector, "read", e))
    }

    async fn current_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|e| FineCheckError::NavigationError {
                url: "current page".to_string(),
                message: e.to_string(),
            })
    }

    async fn quit(&self) -> Result<()> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| FineCheckError::LaunchError {
                message: format!("failed to end session: {}", e),
            })
    }
}

fn locator(selector: &Selector) -> Locator<'_> {
    match selector {
        Selector::Id(id) => Locator::Id(id),
        Selector::Css(css) => Locator::Css(css),
        Selector::XPath(xpath) => Locator::XPath(xpath),
    }
}

fn element_error(selector: &Selector, action: &str, err: CmdError) -> FineCheckError {
    FineCheckError::ElementError {
        field: selector.to_string(),
        action: action.to_string(),
        message: err.to_string(),
    }
}
