use async_trait::async_trait;

use crate::errors::DidactResult;
use crate::models::common::{ Backend, ModelChoice };

/// Uniform call interface over the text-generation backends
///
/// One call, one response or one error. Implementations never retry;
/// retries only happen as full regenerations in the refinement loop.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Send `prompt` to `model` on `backend` and return the generated text
    async fn invoke(&self, backend: Backend, model: &str, prompt: &str) -> DidactResult<String>;

    /// Report missing credentials for `backend` before any call is made
    fn ensure_configured(&self, _backend: Backend) -> DidactResult<()> {
        Ok(())
    }

    async fn invoke_choice(&self, choice: &ModelChoice, prompt: &str) -> DidactResult<String> {
        self.invoke(choice.backend, &choice.model, prompt).await
    }
}
