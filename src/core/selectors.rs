//! Declarative selector layer.
//!
//! All knowledge about the speakers page markup lives here. When the site
//! changes its HTML, only these selector strings need to be touched.

use crate::utils::error::{Result, ScrapeError};
use scraper::Selector;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEM_SELECTOR: &str =
    "div.speakers-list_component div.speakers-list_list div.speakers-list_item";
pub const DEFAULT_NAME_SELECTOR: &str = "h3.speakers-list_item-heading";
pub const DEFAULT_ROLE_SELECTOR: &str =
    r#"div[class="margin-bottom margin-small"] > div:nth-of-type(2)"#;
pub const DEFAULT_IMAGE_SELECTOR: &str = "div.speakers-list_item-image-wrapper > img";
pub const DEFAULT_SOCIAL_SELECTOR: &str =
    r#"div[class="w-layout-grid speakers-list_social-list"] > a"#;

/// Selector strings as they appear in a site profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub item: String,
    pub name: String,
    pub role: String,
    pub image: String,
    pub social: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: DEFAULT_ITEM_SELECTOR.to_string(),
            name: DEFAULT_NAME_SELECTOR.to_string(),
            role: DEFAULT_ROLE_SELECTOR.to_string(),
            image: DEFAULT_IMAGE_SELECTOR.to_string(),
            social: DEFAULT_SOCIAL_SELECTOR.to_string(),
        }
    }
}

impl SelectorConfig {
    pub fn compile(&self) -> Result<SpeakerSelectors> {
        Ok(SpeakerSelectors {
            item: parse_selector("selectors.item", &self.item)?,
            name: parse_selector("selectors.name", &self.name)?,
            role: parse_selector("selectors.role", &self.role)?,
            image: parse_selector("selectors.image", &self.image)?,
            social: parse_selector("selectors.social", &self.social)?,
        })
    }
}

/// Compiled form of [`SelectorConfig`].
#[derive(Debug, Clone)]
pub struct SpeakerSelectors {
    pub item: Selector,
    pub name: Selector,
    pub role: Selector,
    pub image: Selector,
    pub social: Selector,
}

fn parse_selector(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidConfigValue {
        field: field.to_string(),
        value: selector.to_string(),
        reason: format!("Invalid selector: {}", e),
    })
}
