use crate::config::toml_config::credentials_from_toml_str;
use crate::domain::model::{Credentials, Plate};
use crate::domain::ports::CredentialSource;
use crate::utils::error::{FineCheckError, Result};
use crate::utils::validation::Validate;
use std::path::PathBuf;

// 內建的車輛資料
pub const PLATE_CHAR_1: &str = "ب";
pub const PLATE_CHAR_2: &str = "س";
pub const PLATE_CHAR_3: &str = "ف";
pub const PLATE_NUMS: &str = "4176";
pub const NATIONAL_ID: &str = "29301301803574";
pub const PHONE_NUMBER: &str = "01142939127";

pub const ENV_VARS: [&str; 6] = [
    "PLATE_CHAR_1",
    "PLATE_CHAR_2",
    "PLATE_CHAR_3",
    "PLATE_NUMS",
    "NATIONAL_ID",
    "PHONE_NUMBER",
];

#[derive(Debug, Clone)]
pub struct InlineCredentials {
    credentials: Credentials,
}

impl InlineCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl Default for InlineCredentials {
    fn default() -> Self {
        Self::new(Credentials {
            plate: Plate::new(PLATE_CHAR_1, PLATE_CHAR_2, PLATE_CHAR_3, PLATE_NUMS),
            national_id: NATIONAL_ID.to_string(),
            phone_number: PHONE_NUMBER.to_string(),
        })
    }
}

impl CredentialSource for InlineCredentials {
    fn name(&self) -> &str {
        "inline"
    }

    fn load(&self) -> Result<Credentials> {
        self.credentials.validate()?;
        Ok(self.credentials.clone())
    }
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// 從六個環境變數讀取，缺任何一個就失敗
pub struct EnvCredentials {
    lookup: EnvLookup,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn name(&self) -> &str {
        "environment"
    }

    fn load(&self) -> Result<Credentials> {
        let mut values = Vec::with_capacity(ENV_VARS.len());
        let mut missing = Vec::new();

        for var in ENV_VARS {
            match (self.lookup)(var) {
                Some(value) if !value.trim().is_empty() => values.push(value),
                _ => missing.push(var.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(FineCheckError::MissingEnvVarsError { vars: missing });
        }

        let [letter_1, letter_2, letter_3, number, national_id, phone_number]: [String; 6] =
            values
                .try_into()
                .map_err(|_| FineCheckError::ConfigError {
                    message: "unexpected number of credential values".to_string(),
                })?;

        Ok(Credentials {
            plate: Plate::new(letter_1, letter_2, letter_3, number),
            national_id,
            phone_number,
        })
    }
}

pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for FileCredentials {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> Result<Credentials> {
        tracing::debug!("Reading credentials from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            FineCheckError::ConfigError {
                message: format!("cannot read {}: {}", self.path.display(), e),
            }
        })?;

        let credentials = credentials_from_toml_str(&content)?;
        credentials.validate()?;
        Ok(credentials)
    }
}
