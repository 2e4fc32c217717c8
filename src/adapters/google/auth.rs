//! Service account authentication for Google APIs.
//!
//! Signs an RS256 JWT with the service account's private key and exchanges it
//! at the account's token endpoint for a short-lived access token.

use crate::utils::error::{Result, ScrapeError};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const DEFAULT_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

/// Assertions are valid for one hour, the maximum Google accepts.
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

/// The fields we need from a service account key file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ScrapeError::Config {
            message: format!(
                "Cannot read service account file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        serde_json::from_str(&content).map_err(|e| ScrapeError::Config {
            message: format!(
                "Invalid service account file {}: {}",
                path.as_ref().display(),
                e
            ),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    scopes: Vec<String>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 產生簽章後的 JWT assertion
    pub fn assertion(&self) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: self.key.client_email.clone(),
            scope: self.scopes.join(" "),
            aud: self.key.token_uri.clone(),
            exp: now + ASSERTION_LIFETIME_SECONDS,
            iat: now,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| ScrapeError::Config {
                message: format!("Invalid service account private key: {}", e),
            })?;

        encode(&header, &claims, &encoding_key)
            .map_err(|e| ScrapeError::remote(format!("Failed to sign JWT: {}", e)))
    }

    pub async fn fetch_token(&self, client: &Client) -> Result<String> {
        let assertion = self.assertion()?;
        tracing::debug!(
            "Requesting access token for {} from {}",
            self.key.client_email,
            self.key.token_uri
        );

        let response = client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(ScrapeError::remote)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::remote(format!(
                "Token request failed with status {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(ScrapeError::remote)?;
        tracing::debug!("Access token acquired (expires in {:?}s)", token.expires_in);
        Ok(token.access_token)
    }
}
