use crate::utils::error::{Result, ScrapeError};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Parsed speakers page.
pub struct SpeakerPage {
    document: Html,
    item_selector: Selector,
}

impl SpeakerPage {
    pub fn parse(html: &str, item_selector: Selector) -> Self {
        Self {
            document: Html::parse_document(html),
            item_selector,
        }
    }

    /// 依文件順序回傳所有講者節點；找不到時回傳空陣列
    pub fn nodes(&self) -> Vec<ElementRef<'_>> {
        self.document.select(&self.item_selector).collect()
    }
}

pub struct PageFetcher {
    client: Client,
    url: String,
    timeout: Duration,
    item_selector: Selector,
}

impl PageFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration, item_selector: Selector) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
            item_selector,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Single GET, no retry. Non-2xx becomes [`ScrapeError::Http`],
    /// transport failures become [`ScrapeError::Network`].
    pub async fn fetch(&self) -> Result<SpeakerPage> {
        tracing::debug!("Requesting speakers page: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Speakers page response status: {}", status);

        if !status.is_success() {
            return Err(ScrapeError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Received {} bytes of HTML", body.len());

        Ok(SpeakerPage::parse(&body, self.item_selector.clone()))
    }
}
