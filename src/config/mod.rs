pub mod credentials;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::webdriver::{BrowserOptions, DEFAULT_WEBDRIVER_URL};
use crate::config::credentials::{EnvCredentials, FileCredentials, InlineCredentials};
use crate::domain::ports::CredentialSource;
use crate::utils::error::{FineCheckError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub use toml_config::PortalConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReporterKind {
    /// 桌面通知
    Desktop,
    /// 結構化 log 與結束碼
    Ci,
}

impl ReporterKind {
    /// CI runner 上的入口網站通常比較慢
    pub fn default_wait_seconds(self) -> u64 {
        match self {
            ReporterKind::Desktop => toml_config::DEFAULT_WAIT_SECONDS,
            ReporterKind::Ci => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CredentialSourceKind {
    Inline,
    Env,
    File,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ppo-fine-check")]
#[command(about = "Check the PPO traffic portal for outstanding vehicle fines")]
pub struct CliConfig {
    /// How to report the outcome
    #[arg(long, value_enum, default_value_t = ReporterKind::Desktop)]
    pub reporter: ReporterKind,

    /// Where to read the plate, national ID and phone number from
    #[arg(long, value_enum, default_value_t = CredentialSourceKind::Inline)]
    pub credentials: CredentialSourceKind,

    /// TOML file with a [credentials] table (used with --credentials file)
    #[arg(long)]
    pub credentials_file: Option<String>,

    /// TOML file overriding the portal URL, timeouts and selectors
    #[arg(long)]
    pub portal_config: Option<String>,

    #[arg(long, env = "WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver_url: String,

    /// Run Chrome without a visible window
    #[arg(long)]
    pub headless: bool,

    /// Pass --no-sandbox to Chrome (needed in most containers)
    #[arg(long)]
    pub no_sandbox: bool,

    #[arg(long, env = "CHROME_PATH")]
    pub chrome_binary: Option<String>,

    #[arg(long, env = "PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Per-element wait timeout; defaults to the portal config, then 15s (desktop) or 20s (ci)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Keep the browser open this long before closing it
    #[arg(long, default_value = "0")]
    pub linger_secs: u64,

    /// Exit with 1 for every non-clean result (ci reporter)
    #[arg(long)]
    pub uniform_exit_codes: bool,

    /// Validate the configuration and print it without opening a browser
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            webdriver_url: self.webdriver_url.clone(),
            headless: self.headless,
            no_sandbox: self.no_sandbox,
            chrome_binary: self.chrome_binary.clone(),
            proxy_url: self.proxy_url.clone().filter(|s| !s.is_empty()),
            ..BrowserOptions::default()
        }
    }

    pub fn credential_source(&self) -> Result<Box<dyn CredentialSource>> {
        credential_source(self.credentials, self.credentials_file.as_deref())
    }

    /// 載入 portal 設定並套用命令列覆寫
    pub fn load_portal_config(&self) -> Result<PortalConfig> {
        let mut portal = match &self.portal_config {
            Some(path) => {
                tracing::info!("📁 Loading portal configuration from: {}", path);
                PortalConfig::from_file(path)?
            }
            None => PortalConfig::default(),
        };

        // 命令列 > 設定檔 > 報告模式預設值
        let wait_seconds = self
            .timeout_secs
            .or(portal.timeouts.wait_seconds)
            .unwrap_or_else(|| self.reporter.default_wait_seconds());
        portal.timeouts.wait_seconds = Some(wait_seconds);

        portal.validate()?;
        Ok(portal)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("webdriver_url", &self.webdriver_url)?;

        if self.credentials == CredentialSourceKind::File && self.credentials_file.is_none() {
            return Err(FineCheckError::ConfigError {
                message: "--credentials file requires --credentials-file <path>".to_string(),
            });
        }

        Ok(())
    }
}

pub fn credential_source(
    kind: CredentialSourceKind,
    file: Option<&str>,
) -> Result<Box<dyn CredentialSource>> {
    match kind {
        CredentialSourceKind::Inline => Ok(Box::new(InlineCredentials::default())),
        CredentialSourceKind::Env => Ok(Box::new(EnvCredentials::new())),
        CredentialSourceKind::File => {
            let path = file.ok_or_else(|| FineCheckError::ConfigError {
                message: "no credentials file given".to_string(),
            })?;
            Ok(Box::new(FileCredentials::new(path)))
        }
    }
}
