//! HTTP client for the folder data source.

use async_trait::async_trait;
use serde::Deserialize;

use stax_proto::folder::ListingPage;
use stax_proto::source::{FolderSource, SourceError};

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    data: AuthData,
}

#[derive(Debug, Deserialize)]
struct AuthData {
    sid: String,
}

pub struct HttpFolderSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFolderSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FolderSource for HttpFolderSource {
    async fn auth(&self) -> Result<String, SourceError> {
        let response = self
            .client
            .get(format!("{}/auth", self.base_url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let envelope: AuthEnvelope = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(envelope.data.sid)
    }

    async fn listing(&self, dir_id: Option<&str>) -> Result<ListingPage, SourceError> {
        let mut request = self
            .client
            .get(format!("{}/folder", self.base_url))
            .header("Accept", "application/json");
        if let Some(id) = dir_id {
            request = request.query(&[("dirId", id)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}
