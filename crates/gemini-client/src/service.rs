//! The seam between recommendation code and the text-generation backend.

use async_trait::async_trait;

use crate::error::GeminiClientError;

/// Anything that can turn a prompt into text.
///
/// [`GeminiClient`](crate::GeminiClient) is the production implementation;
/// tests substitute a fake so no network endpoint is contacted.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Generate text for `prompt` with the model identified by `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GeminiClientError>;
}

#[async_trait]
impl<'a, T: GenerativeService + ?Sized> GenerativeService for &'a T {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GeminiClientError> {
        (**self).generate(model, prompt).await
    }
}
