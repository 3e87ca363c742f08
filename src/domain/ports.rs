use crate::domain::model::{Prompt, ResponseFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn api_key_env(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn num_recommendations(&self) -> usize;
    fn response_format(&self) -> ResponseFormat;
    fn max_prompt_chars(&self) -> usize;
}

/// A hosted text-generation backend. One call per prompt, no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}
