use crate::domain::model::SpeakerRecord;
use crate::domain::ports::{RecordWriter, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Writes the records as a pretty-printed JSON array.
pub struct JsonWriter<'a, S: Storage> {
    storage: &'a S,
    path: String,
}

impl<'a, S: Storage> JsonWriter<'a, S> {
    pub fn new(storage: &'a S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

pub fn render_json(records: &[SpeakerRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

#[async_trait]
impl<'a, S: Storage> RecordWriter for JsonWriter<'a, S> {
    async fn write(&self, records: &[SpeakerRecord]) -> Result<String> {
        let data = render_json(records)?;
        tracing::debug!("Writing {} bytes of JSON to {}", data.len(), self.path);

        self.storage.write_file(&self.path, &data).await?;

        tracing::info!("Data successfully written to file: {}", self.path);
        Ok(self.path.clone())
    }
}
