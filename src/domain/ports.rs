use crate::domain::model::SpeakerRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SpeakerRecord>>;
    async fn load(&self, records: Vec<SpeakerRecord>) -> Result<String>;
}

/// 輸出端：回傳可讀的輸出位置（檔案路徑或試算表網址）
#[async_trait]
pub trait RecordWriter: Send + Sync {
    async fn write(&self, records: &[SpeakerRecord]) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetHandle {
    pub id: String,
    pub url: String,
    pub sheet_id: i64,
    pub sheet_title: String,
}

/// Remote spreadsheet operations the sheet writer needs.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    async fn open_by_title(&self, title: &str) -> Result<Option<SpreadsheetHandle>>;
    async fn create(&self, title: &str) -> Result<SpreadsheetHandle>;
    async fn share_with_writer(&self, spreadsheet: &SpreadsheetHandle, email: &str) -> Result<()>;
    async fn update_range(
        &self,
        spreadsheet: &SpreadsheetHandle,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<()>;
    /// `row_index` is 1-based, as shown in the sheet UI.
    async fn insert_row(
        &self,
        spreadsheet: &SpreadsheetHandle,
        row: Vec<String>,
        row_index: usize,
    ) -> Result<()>;
}
