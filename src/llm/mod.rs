mod api_client;

use async_trait::async_trait;

use crate::error::VoxResult;

pub use api_client::APIClient;

/// A hosted text-generation endpoint: one prompt in, raw text out.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> VoxResult<String>;

    /// Short label for status lines.
    fn model_name(&self) -> &str;
}
