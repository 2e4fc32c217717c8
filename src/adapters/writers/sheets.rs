use crate::domain::model::{SpeakerRecord, SHEET_HEADER};
use crate::domain::ports::{RecordWriter, SpreadsheetService};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const HEADER_RANGE: &str = "A1:D1";
/// 試算表內社群連結以逗號合併
pub const SOCIAL_LINK_SEPARATOR: &str = ",";
/// First data row, right under the header.
pub const FIRST_DATA_ROW: usize = 2;

pub struct SheetsWriter<'a, G: SpreadsheetService> {
    service: &'a G,
    title: String,
    sharing_email: String,
}

impl<'a, G: SpreadsheetService> SheetsWriter<'a, G> {
    pub fn new(service: &'a G, title: impl Into<String>, sharing_email: impl Into<String>) -> Self {
        Self {
            service,
            title: title.into(),
            sharing_email: sharing_email.into(),
        }
    }
}

#[async_trait]
impl<'a, G: SpreadsheetService> RecordWriter for SheetsWriter<'a, G> {
    async fn write(&self, records: &[SpeakerRecord]) -> Result<String> {
        let spreadsheet = match self.service.open_by_title(&self.title).await? {
            Some(existing) => {
                tracing::info!("Opened existing spreadsheet \"{}\"", self.title);
                existing
            }
            None => {
                tracing::info!("Spreadsheet \"{}\" not found, creating it", self.title);
                self.service.create(&self.title).await?
            }
        };

        self.service
            .share_with_writer(&spreadsheet, &self.sharing_email)
            .await?;
        tracing::debug!("Shared spreadsheet {} with {}", spreadsheet.id, self.sharing_email);

        let header = SHEET_HEADER.iter().map(|h| h.to_string()).collect();
        self.service
            .update_range(&spreadsheet, HEADER_RANGE, vec![header])
            .await?;

        for (offset, record) in records.iter().enumerate() {
            self.service
                .insert_row(
                    &spreadsheet,
                    record.to_row(SOCIAL_LINK_SEPARATOR),
                    FIRST_DATA_ROW + offset,
                )
                .await?;
        }

        tracing::info!(
            "Data written to Google Spreadsheet successfully to file {}",
            self.title
        );
        tracing::info!("{}", spreadsheet.url);
        Ok(spreadsheet.url)
    }
}
