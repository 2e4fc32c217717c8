use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use std::env;
use std::path::PathBuf;

pub const CREDS_PATH_VAR: &str = "CREDS_PATH";
pub const SHARING_EMAIL_VAR: &str = "SHARING_EMAIL";

/// Out-of-band settings, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub credentials_path: Option<PathBuf>,
    pub sharing_email: Option<String>,
}

/// Everything the spreadsheet writer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsSettings {
    pub credentials_path: PathBuf,
    pub sharing_email: String,
}

impl AppSettings {
    /// 讀取環境變數；`.env` 需由呼叫端先載入
    pub fn from_env() -> Self {
        Self {
            credentials_path: non_empty_var(CREDS_PATH_VAR).map(PathBuf::from),
            sharing_email: non_empty_var(SHARING_EMAIL_VAR),
        }
    }

    pub fn require_sheets(&self) -> Result<SheetsSettings> {
        let credentials_path =
            self.credentials_path
                .clone()
                .ok_or_else(|| ScrapeError::MissingConfig {
                    field: CREDS_PATH_VAR.to_string(),
                })?;
        let sharing_email = self
            .sharing_email
            .clone()
            .ok_or_else(|| ScrapeError::MissingConfig {
                field: SHARING_EMAIL_VAR.to_string(),
            })?;

        let settings = SheetsSettings {
            credentials_path,
            sharing_email,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for SheetsSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path(CREDS_PATH_VAR, &self.credentials_path.to_string_lossy())?;
        validation::validate_email(SHARING_EMAIL_VAR, &self.sharing_email)?;
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
