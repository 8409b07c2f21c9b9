use thiserror::Error;

#[derive(Error, Debug)]
pub enum FineCheckError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required environment variables: {}", vars.join(", "))]
    MissingEnvVarsError { vars: Vec<String> },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Browser session could not be started: {message}")]
    LaunchError { message: String },

    #[error("Failed to load {url}: {message}")]
    NavigationError { url: String, message: String },

    #[error("Timed out after {waited_secs}s waiting for {field} ({selector})")]
    TimeoutError {
        field: String,
        selector: String,
        waited_secs: u64,
    },

    #[error("Failed to {action} {field}: {message}")]
    ElementError {
        field: String,
        action: String,
        message: String,
    },

    #[error("Interrupted before the check completed")]
    Interrupted,

    #[error("Notification failed: {message}")]
    NotificationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Browser,
    Page,
    Reporting,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FineCheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingEnvVarsError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::LaunchError { .. } | Self::NavigationError { .. } => ErrorCategory::Browser,
            Self::TimeoutError { .. } | Self::ElementError { .. } => ErrorCategory::Page,
            Self::NotificationError { .. } => ErrorCategory::Reporting,
            Self::Interrupted | Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotificationError { .. } => ErrorSeverity::Low,
            // 逾時可能只是網站太慢，下次執行可能成功
            Self::TimeoutError { .. } | Self::NavigationError { .. } => ErrorSeverity::Medium,
            Self::ElementError { .. }
            | Self::ConfigError { .. }
            | Self::MissingEnvVarsError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_)
            | Self::Interrupted => ErrorSeverity::High,
            Self::LaunchError { .. } | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingEnvVarsError { vars } => {
                format!("Export {} before running the check", vars.join(", "))
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the command line flags and config files".to_string()
            }
            Self::TomlError(_) => "Make sure the file is valid TOML".to_string(),
            Self::LaunchError { .. } => {
                "Make sure chromedriver is running and matches the installed Chrome version"
                    .to_string()
            }
            Self::NavigationError { .. } => {
                "Check network access to the portal and try again".to_string()
            }
            Self::TimeoutError { .. } => {
                "The portal may be slow or its markup changed; retry or update the selectors"
                    .to_string()
            }
            Self::ElementError { .. } => {
                "The page layout may have changed; update the selectors in the portal config"
                    .to_string()
            }
            Self::Interrupted => "Run the check again".to_string(),
            Self::NotificationError { .. } => {
                "Desktop notifications are unavailable; use the ci reporter instead".to_string()
            }
            Self::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Browser => format!("Browser problem: {}", self),
            ErrorCategory::Page => format!("Portal page problem: {}", self),
            ErrorCategory::Reporting => format!("Reporting problem: {}", self),
            ErrorCategory::System => format!("System problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FineCheckError>;
