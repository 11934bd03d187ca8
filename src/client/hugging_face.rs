use crate::{
    client::ImageBackend,
    error::{GenerationError, Result},
    logger,
    models::{ApiErrorBody, InferenceRequest},
};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
}

impl HuggingFaceClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![(
            "stabilityai/stable-diffusion-xl-base-1.0",
            "Stable Diffusion XL Base 1.0",
            "Stability AI",
        )]
    }
}

/// Map a non-success response to an error, preferring the body's `error` field.
pub fn remote_error(status: StatusCode, body: &str) -> GenerationError {
    let parsed = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error);

    let message = match parsed {
        Some(error) => error,
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        None => body.to_string(),
    };

    GenerationError::RemoteError {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl ImageBackend for HuggingFaceClient {
    async fn generate(&self, credential: &str, request: &InferenceRequest) -> Result<Vec<u8>> {
        let _timer = logger::timer("inference request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {}", credential))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                GenerationError::RequestError(format!("Inference request failed: {}", e))
            })?;

        let status = response.status();
        log::debug!("Inference endpoint answered with status {}", status);

        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| GenerationError::RequestError(e.to_string()))?;
            log::debug!("Received {} bytes of image data", bytes.len());
            Ok(bytes.to_vec())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(remote_error(status, &body))
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
