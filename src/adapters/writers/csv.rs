use crate::domain::model::{SpeakerRecord, CSV_HEADER};
use crate::domain::ports::{RecordWriter, Storage};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;

/// 社群連結在單一欄位內以分號分隔
pub const SOCIAL_LINK_SEPARATOR: &str = ";";

pub struct CsvWriter<'a, S: Storage> {
    storage: &'a S,
    path: String,
}

impl<'a, S: Storage> CsvWriter<'a, S> {
    pub fn new(storage: &'a S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

pub fn render_csv(records: &[SpeakerRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(record.to_row(SOCIAL_LINK_SEPARATOR))?;
    }
    writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
}

#[async_trait]
impl<'a, S: Storage> RecordWriter for CsvWriter<'a, S> {
    async fn write(&self, records: &[SpeakerRecord]) -> Result<String> {
        let data = render_csv(records)?;
        tracing::debug!("Writing {} CSV rows to {}", records.len(), self.path);

        self.storage.write_file(&self.path, &data).await?;

        tracing::info!("Data successfully written to file: {}", self.path);
        Ok(self.path.clone())
    }
}
