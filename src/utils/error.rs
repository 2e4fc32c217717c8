use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request to {url} failed with status {status}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Extraction error on `{field}`: {message}")]
    Extraction { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Spreadsheet API error: {message}")]
    RemoteApi { message: String },

    #[error("Invalid argument `{value}`: {reason}")]
    Argument { value: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value `{value}` for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

/// 錯誤分類，對應不同的程序退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Argument,
    Http,
    Network,
    Extraction,
    Io,
    RemoteApi,
    Config,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Argument => 2,
            ErrorCategory::Http => 3,
            ErrorCategory::Network => 4,
            ErrorCategory::Extraction => 5,
            ErrorCategory::Io => 6,
            ErrorCategory::RemoteApi => 7,
            ErrorCategory::Config => 8,
        }
    }
}

impl ScrapeError {
    pub fn extraction(field: &str, message: impl Into<String>) -> Self {
        ScrapeError::Extraction {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn remote(message: impl std::fmt::Display) -> Self {
        ScrapeError::RemoteApi {
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::Http { .. } => ErrorCategory::Http,
            ScrapeError::Network(_) => ErrorCategory::Network,
            ScrapeError::Extraction { .. } => ErrorCategory::Extraction,
            ScrapeError::Io(_) | ScrapeError::Csv(_) | ScrapeError::Serialization(_) => {
                ErrorCategory::Io
            }
            ScrapeError::RemoteApi { .. } => ErrorCategory::RemoteApi,
            ScrapeError::Argument { .. } => ErrorCategory::Argument,
            ScrapeError::Config { .. }
            | ScrapeError::InvalidConfigValue { .. }
            | ScrapeError::MissingConfig { .. } => ErrorCategory::Config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::Http { status, .. } => {
                format!("The speakers page answered with HTTP {}", status)
            }
            ScrapeError::Network(_) => "Could not reach the speakers page".to_string(),
            ScrapeError::Extraction { field, .. } => {
                format!("A speaker entry has no `{}`; the page markup may have changed", field)
            }
            ScrapeError::Io(e) => format!("Could not write the output file: {}", e),
            ScrapeError::Csv(_) | ScrapeError::Serialization(_) => {
                "Could not encode the speaker records".to_string()
            }
            ScrapeError::RemoteApi { message } => {
                format!("Google Sheets request failed: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Argument => "Use a file name ending in .json, .csv or .gsheets",
            ErrorCategory::Http => "Check that the site URL in the profile is still valid",
            ErrorCategory::Network => "Check your network connection and try again",
            ErrorCategory::Extraction => {
                "Update the selectors in the site profile or rerun with --skip-incomplete"
            }
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::RemoteApi => {
                "Verify the service account credentials and that the Sheets and Drive APIs are enabled"
            }
            ErrorCategory::Config => "Set CREDS_PATH and SHARING_EMAIL or fix the site profile",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
