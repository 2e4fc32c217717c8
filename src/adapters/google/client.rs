use crate::adapters::google::auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::config::settings::SheetsSettings;
use crate::domain::ports::{SpreadsheetHandle, SpreadsheetService};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use tokio::sync::OnceCell;
use url::Url;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com";
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleEndpoints {
    pub sheets: String,
    pub drive: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            sheets: SHEETS_API_BASE.to_string(),
            drive: DRIVE_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetResource {
    spreadsheet_id: String,
    spreadsheet_url: String,
    #[serde(default)]
    sheets: Vec<SheetResource>,
}

#[derive(Debug, Deserialize)]
struct SheetResource {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

impl SpreadsheetResource {
    fn into_handle(self) -> Result<SpreadsheetHandle> {
        let first = self.sheets.into_iter().next().ok_or_else(|| {
            ScrapeError::remote(format!("Spreadsheet {} has no worksheets", self.spreadsheet_id))
        })?;
        Ok(SpreadsheetHandle {
            id: self.spreadsheet_id,
            url: self.spreadsheet_url,
            sheet_id: first.properties.sheet_id,
            sheet_title: first.properties.title,
        })
    }
}

/// Google Sheets / Drive REST client authenticated as a service account.
///
/// The credentials file is read and the access token requested on the first
/// API call, then reused for the lifetime of the client.
pub struct GoogleSheetsClient {
    http: Client,
    credentials_path: PathBuf,
    endpoints: GoogleEndpoints,
    token: OnceCell<String>,
}

impl GoogleSheetsClient {
    pub fn new(settings: &SheetsSettings) -> Self {
        Self {
            http: Client::new(),
            credentials_path: settings.credentials_path.clone(),
            endpoints: GoogleEndpoints::default(),
            token: OnceCell::new(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: GoogleEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    async fn access_token(&self) -> Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| async {
                let key = ServiceAccountKey::from_file(&self.credentials_path)?;
                ServiceAccountAuth::new(key).fetch_token(&self.http).await
            })
            .await?;
        Ok(token.as_str())
    }

    /// 送出請求並把非 2xx 回應轉成 RemoteApi 錯誤
    async fn execute(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let token = self.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ScrapeError::remote(format!("{} failed: {}", action, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::remote(format!(
                "{} failed with status {}: {}",
                action, status, body
            )));
        }
        Ok(response)
    }

    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T> {
        self.execute(request, action)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ScrapeError::remote(format!("{}: unexpected response: {}", action, e)))
    }

    fn sheets_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.sheets.trim_end_matches('/'), path)
    }

    fn drive_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.drive.trim_end_matches('/'), path)
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url> {
        let base = self.sheets_url(&format!("/v4/spreadsheets/{}/values", spreadsheet_id));
        let mut url = Url::parse(&base).map_err(|e| ScrapeError::Config {
            message: format!("Invalid Sheets API endpoint {}: {}", base, e),
        })?;
        url.path_segments_mut()
            .map_err(|_| ScrapeError::Config {
                message: format!("Sheets API endpoint cannot be a base URL: {}", base),
            })?
            .push(range);
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        Ok(url)
    }

    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<SpreadsheetHandle> {
        let request = self
            .http
            .get(self.sheets_url(&format!("/v4/spreadsheets/{}", spreadsheet_id)));
        let resource: SpreadsheetResource =
            self.execute_json(request, "Spreadsheet lookup").await?;
        resource.into_handle()
    }
}

/// Drive 查詢字串中的單引號與反斜線需要跳脫
pub fn title_query(title: &str) -> String {
    let escaped = title.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

/// Ranges without a sheet prefix are applied to the first worksheet.
pub fn qualify_range(sheet_title: &str, range: &str) -> String {
    if range.contains('!') {
        range.to_string()
    } else {
        format!("'{}'!{}", sheet_title.replace('\'', "''"), range)
    }
}

#[async_trait]
impl SpreadsheetService for GoogleSheetsClient {
    async fn open_by_title(&self, title: &str) -> Result<Option<SpreadsheetHandle>> {
        let query = title_query(title);
        let request = self
            .http
            .get(self.drive_url("/drive/v3/files"))
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")]);
        let listing: FileList = self.execute_json(request, "Spreadsheet search").await?;

        match listing.files.into_iter().next() {
            Some(file) => self.get_spreadsheet(&file.id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, title: &str) -> Result<SpreadsheetHandle> {
        let request = self
            .http
            .post(self.sheets_url("/v4/spreadsheets"))
            .json(&json!({ "properties": { "title": title } }));
        let resource: SpreadsheetResource =
            self.execute_json(request, "Spreadsheet creation").await?;
        resource.into_handle()
    }

    async fn share_with_writer(&self, spreadsheet: &SpreadsheetHandle, email: &str) -> Result<()> {
        let request = self
            .http
            .post(self.drive_url(&format!("/drive/v3/files/{}/permissions", spreadsheet.id)))
            .json(&json!({
                "type": "user",
                "role": "writer",
                "emailAddress": email,
            }));
        self.execute(request, "Spreadsheet sharing").await?;
        Ok(())
    }

    async fn update_range(
        &self,
        spreadsheet: &SpreadsheetHandle,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<()> {
        let range = qualify_range(&spreadsheet.sheet_title, range);
        let url = self.values_url(&spreadsheet.id, &range)?;
        let request = self.http.put(url).json(&json!({
            "majorDimension": "ROWS",
            "values": values,
        }));
        self.execute(request, "Range update").await?;
        Ok(())
    }

    async fn insert_row(
        &self,
        spreadsheet: &SpreadsheetHandle,
        row: Vec<String>,
        row_index: usize,
    ) -> Result<()> {
        if row_index == 0 {
            return Err(ScrapeError::remote("Row indices start at 1"));
        }

        // 先插入空白列，再寫入該列的值
        let request = self
            .http
            .post(self.sheets_url(&format!("/v4/spreadsheets/{}:batchUpdate", spreadsheet.id)))
            .json(&json!({
                "requests": [{
                    "insertDimension": {
                        "range": {
                            "sheetId": spreadsheet.sheet_id,
                            "dimension": "ROWS",
                            "startIndex": row_index - 1,
                            "endIndex": row_index,
                        },
                        "inheritFromBefore": false,
                    }
                }]
            }));
        self.execute(request, "Row insertion").await?;

        self.update_range(spreadsheet, &format!("A{}", row_index), vec![row])
            .await
    }
}
