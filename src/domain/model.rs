use serde::{Deserialize, Serialize};

/// CSV 表頭
pub const CSV_HEADER: [&str; 4] = ["Name", "Role", "Image Link", "Social Links"];

/// 試算表表頭
pub const SHEET_HEADER: [&str; 4] = ["Name", "Role", "ImageLink", "SocialLinks"];

/// One speaker entry scraped from the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "ImageLink")]
    pub image_link: String,
    /// Source order, duplicates kept.
    #[serde(rename = "SocialLinks")]
    pub social_links: Vec<String>,
}

impl SpeakerRecord {
    pub fn social_links_joined(&self, separator: &str) -> String {
        self.social_links.join(separator)
    }

    /// 轉成表格列，社群連結以指定分隔符號合併
    pub fn to_row(&self, separator: &str) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role.clone(),
            self.image_link.clone(),
            self.social_links_joined(separator),
        ]
    }
}

/// 抽取失敗時的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// Stop the run at the first incomplete speaker entry.
    #[default]
    Abort,
    /// Log and drop incomplete entries.
    Skip,
}
