use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub location: String,
}

/// Drives a [`Pipeline`]: extract everything, then load once.
pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting speaker scrape");

        let records = self.pipeline.extract().await?;
        let count = records.len();
        tracing::info!("📊 Extracted {} speaker records", count);

        let location = self.pipeline.load(records).await?;
        tracing::info!("📁 Output saved to: {}", location);

        Ok(RunSummary {
            records: count,
            location,
        })
    }
}
