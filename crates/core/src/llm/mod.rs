pub mod openrouter;
pub mod reply;

use crate::error::AdvisorError;

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Single user-role prompt in, raw completion text out.
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError>;
}
