pub mod hugging_face;

use crate::{error::Result, models::InferenceRequest};
use async_trait::async_trait;

pub use hugging_face::HuggingFaceClient;

/// A remote text-to-image endpoint. Returns the raw image bytes of a successful call.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate(&self, credential: &str, request: &InferenceRequest) -> Result<Vec<u8>>;

    fn endpoint(&self) -> &str;
}
