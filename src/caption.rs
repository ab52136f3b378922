//! Client for the hosted captioning model. One request, one caption.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::utils::data_uri::EncodedImage;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("photo data is missing")]
    MissingData,
    #[error("caption request failed: {0}")]
    Transport(String),
    #[error("caption service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("caption service produced no output")]
    NoOutput,
}

#[async_trait]
pub trait CaptionService: Send + Sync {
    /// Returns a short descriptive caption for the image, or a single
    /// collapsed failure the caller treats as non-fatal.
    async fn generate_caption(&self, image: &EncodedImage) -> Result<String, CaptionError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CaptionRequest<'a> {
    photo_data_uri: &'a str,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    caption: String,
}

pub struct CaptionClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CaptionClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint,
            api_key,
        }
    }

    pub fn from_env() -> Self {
        let endpoint = env::var("CAPTION_API_URL").expect("CAPTION_API_URL must be set");
        let api_key = env::var("CAPTION_API_KEY").expect("CAPTION_API_KEY must be set");
        Self::new(endpoint, api_key)
    }
}

#[async_trait]
impl CaptionService for CaptionClient {
    async fn generate_caption(&self, image: &EncodedImage) -> Result<String, CaptionError> {
        if image.is_empty() {
            return Err(CaptionError::MissingData);
        }

        debug!(media_type = %image.mime(), size = image.len(), "requesting caption");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CaptionRequest {
                photo_data_uri: image.as_data_uri(),
            })
            .send()
            .await
            .map_err(|e| CaptionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, "caption request rejected");
            return Err(CaptionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CaptionResponse = response
            .json()
            .await
            .map_err(|e| CaptionError::Transport(e.to_string()))?;

        if body.caption.trim().is_empty() {
            return Err(CaptionError::NoOutput);
        }

        Ok(body.caption)
    }
}
