use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT},
    StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only client for static JSON documents served over HTTP.
///
/// Only GET is issued; no credentials or query parameters are attached.
#[derive(Debug, Clone, Default)]
pub struct StaticJsonClient {
    client: Client,
}

impl StaticJsonClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    pub async fn get<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        debug!("Fetching static document from {}", url);

        let response = self.client.get(url)
            .headers(self.get_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Static document error ({}): {}", status, body);
            return Err(FetchError::Status { status, body });
        }

        // Decoded separately from transport so a bad payload is not reported as a network error.
        let bytes = response.bytes().await?;
        let data = serde_json::from_slice::<T>(&bytes)?;
        Ok(data)
    }
}
