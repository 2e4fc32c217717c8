use crate::adapters::writers::{CsvWriter, JsonWriter, SheetsWriter};
use crate::config::settings::CREDS_PATH_VAR;
use crate::config::toml_config::SiteProfile;
use crate::core::extractor::SpeakerExtractor;
use crate::core::fetcher::{PageFetcher, SpeakerPage};
use crate::core::{Pipeline, RecordWriter, SpeakerRecord, SpreadsheetService, Storage};
use crate::domain::model::ExtractionPolicy;
use crate::domain::target::OutputTarget;
use crate::utils::error::{Result, ScrapeError};

struct SheetsTarget<G: SpreadsheetService> {
    service: G,
    sharing_email: String,
}

/// 講者抓取流程：抓頁面、逐筆抽取、依輸出目標寫出
pub struct SpeakerPipeline<S: Storage, G: SpreadsheetService> {
    fetcher: PageFetcher,
    extractor: SpeakerExtractor,
    storage: S,
    target: OutputTarget,
    policy: ExtractionPolicy,
    sheets: Option<SheetsTarget<G>>,
}

impl<S: Storage, G: SpreadsheetService> SpeakerPipeline<S, G> {
    pub fn from_profile(profile: &SiteProfile, storage: S, target: OutputTarget) -> Result<Self> {
        let selectors = profile.selectors.compile()?;

        let fetcher = PageFetcher::new(
            profile.site.url.clone(),
            profile.timeout(),
            selectors.item.clone(),
        );
        let extractor = SpeakerExtractor::new(selectors, profile.site.base_url.clone())
            .with_relative_marker(profile.site.relative_marker.clone())
            .with_placeholder_link(profile.site.placeholder_link.clone());

        Ok(Self {
            fetcher,
            extractor,
            storage,
            target,
            policy: ExtractionPolicy::default(),
            sheets: None,
        })
    }

    pub fn with_policy(mut self, policy: ExtractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sheets(mut self, service: G, sharing_email: impl Into<String>) -> Self {
        self.sheets = Some(SheetsTarget {
            service,
            sharing_email: sharing_email.into(),
        });
        self
    }

    fn extract_records(&self, page: &SpeakerPage) -> Result<Vec<SpeakerRecord>> {
        let nodes = page.nodes();
        if nodes.is_empty() {
            tracing::warn!("No speaker entries matched the item selector");
        }

        let mut records = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.into_iter().enumerate() {
            match self.extractor.extract(node) {
                Ok(record) => records.push(record),
                Err(e) if self.policy == ExtractionPolicy::Skip => {
                    tracing::warn!("Skipping speaker #{}: {}", index + 1, e);
                }
                Err(e) => {
                    tracing::error!("Speaker #{} could not be extracted", index + 1);
                    return Err(e);
                }
            }
        }

        Ok(records)
    }
}

#[async_trait::async_trait]
impl<S: Storage, G: SpreadsheetService> Pipeline for SpeakerPipeline<S, G> {
    async fn extract(&self) -> Result<Vec<SpeakerRecord>> {
        tracing::info!("Fetching speakers from: {}", self.fetcher.url());
        let page = self.fetcher.fetch().await?;
        self.extract_records(&page)
    }

    async fn load(&self, records: Vec<SpeakerRecord>) -> Result<String> {
        tracing::info!("Writing {} records to {}", records.len(), self.target);

        match &self.target {
            OutputTarget::Json(path) => {
                JsonWriter::new(&self.storage, path.to_string_lossy().to_string())
                    .write(&records)
                    .await
            }
            OutputTarget::Csv(path) => {
                CsvWriter::new(&self.storage, path.to_string_lossy().to_string())
                    .write(&records)
                    .await
            }
            OutputTarget::Sheet(title) => {
                let sheets = self
                    .sheets
                    .as_ref()
                    .ok_or_else(|| ScrapeError::MissingConfig {
                        field: CREDS_PATH_VAR.to_string(),
                    })?;
                SheetsWriter::new(&sheets.service, title.clone(), sheets.sharing_email.clone())
                    .write(&records)
                    .await
            }
        }
    }
}
