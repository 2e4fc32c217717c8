use crate::core::extractor::{DEFAULT_PLACEHOLDER_LINK, DEFAULT_RELATIVE_MARKER};
use crate::core::selectors::SelectorConfig;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SITE_URL: &str = "https://interaction24.ixda.org/";
pub const DEFAULT_BASE_URL: &str = "https://interaction24.ixda.org";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 網站設定檔：要抓哪個頁面、怎麼抓
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteProfile {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub url: String,
    /// Replaces the relative marker in image sources.
    pub base_url: String,
    pub timeout_seconds: u64,
    pub relative_marker: String,
    pub placeholder_link: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            relative_marker: DEFAULT_RELATIVE_MARKER.to_string(),
            placeholder_link: DEFAULT_PLACEHOLDER_LINK.to_string(),
        }
    }
}

impl SiteProfile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SPEAKERS_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::Config {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.site.timeout_seconds)
    }
}

impl Validate for SiteProfile {
    fn validate(&self) -> Result<()> {
        validation::validate_url("site.url", &self.site.url)?;
        validation::validate_url("site.base_url", &self.site.base_url)?;
        validation::validate_range("site.timeout_seconds", self.site.timeout_seconds, 1, 300)?;

        validation::validate_non_empty_string("selectors.item", &self.selectors.item)?;
        validation::validate_non_empty_string("selectors.name", &self.selectors.name)?;
        validation::validate_non_empty_string("selectors.role", &self.selectors.role)?;
        validation::validate_non_empty_string("selectors.image", &self.selectors.image)?;
        validation::validate_non_empty_string("selectors.social", &self.selectors.social)?;

        // 順便確認選擇器語法正確
        self.selectors.compile()?;

        tracing::debug!("Site profile validation passed");
        Ok(())
    }
}
