use crate::core::workflow::WorkflowSettings;
use crate::domain::model::{Credentials, Plate};
use crate::domain::selectors::SelectorMap;
use crate::utils::error::{FineCheckError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PORTAL_URL: &str = "https://ppo.gov.eg/ppo/r/ppoportal/ppoportal/traffic";
pub const DEFAULT_WAIT_SECONDS: u64 = 15;

/// 入口網站設定，可由 TOML 覆寫
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    #[serde(default)]
    pub portal: PortalSection,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub selectors: SelectorMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSection {
    pub url: String,
}

impl Default for PortalSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_PORTAL_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// 未設定時由報告模式決定
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_seconds: Option<u64>,
    pub poll_millis: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            wait_seconds: None,
            poll_millis: 250,
        }
    }
}

impl TimeoutConfig {
    pub fn effective_wait_seconds(&self) -> u64 {
        self.wait_seconds.unwrap_or(DEFAULT_WAIT_SECONDS)
    }
}

impl PortalConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let (processed_content, missing) = substitute_env_vars(content)?;
        if !missing.is_empty() {
            tracing::warn!(
                "⚠️ Unresolved variables in portal config: {}",
                missing.join(", ")
            );
        }

        Ok(toml::from_str(&processed_content)?)
    }

    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            target_url: self.portal.url.clone(),
            wait_timeout: Duration::from_secs(self.timeouts.effective_wait_seconds()),
            poll_interval: Duration::from_millis(self.timeouts.poll_millis),
        }
    }
}

impl Validate for PortalConfig {
    fn validate(&self) -> Result<()> {
        validate_url("portal.url", &self.portal.url)?;
        if let Some(wait_seconds) = self.timeouts.wait_seconds {
            validate_positive_number("timeouts.wait_seconds", wait_seconds, 1)?;
        }
        validate_range("timeouts.poll_millis", self.timeouts.poll_millis, 10, 5_000)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialsFile {
    credentials: CredentialsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialsSection {
    plate_letters: [String; 3],
    plate_number: String,
    national_id: String,
    phone_number: String,
}

/// 解析 `[credentials]` 表格；未設定的 `${VAR}` 視為缺少設定
pub fn credentials_from_toml_str(content: &str) -> Result<Credentials> {
    let (processed_content, missing) = substitute_env_vars(content)?;
    if !missing.is_empty() {
        return Err(FineCheckError::MissingEnvVarsError { vars: missing });
    }

    let file: CredentialsFile = toml::from_str(&processed_content)?;
    let section = file.credentials;
    let [letter_1, letter_2, letter_3] = section.plate_letters;

    Ok(Credentials {
        plate: Plate::new(letter_1, letter_2, letter_3, section.plate_number),
        national_id: section.national_id,
        phone_number: section.phone_number,
    })
}

/// 替換環境變數 (例如 ${NATIONAL_ID})，回傳處理後內容與找不到的變數
fn substitute_env_vars(content: &str) -> Result<(String, Vec<String>)> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FineCheckError::ConfigError {
        message: format!("invalid placeholder pattern: {}", e),
    })?;

    let mut missing = Vec::new();
    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        match std::env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                missing.push(var_name.to_string());
                format!("${{{}}}", var_name)
            }
        }
    });

    Ok((result.to_string(), missing))
}
