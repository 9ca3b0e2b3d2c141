use anyhow::Result;
use async_trait::async_trait;

use super::Message;

pub type BackendBox = Box<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work
    /// with the backend. A missing credential is not a health failure; it
    /// surfaces later as an auth error on the first request.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single completion for the full conversation so far. The
    /// returned message is exactly the first choice from the provider. Errors
    /// carry the provider's user-facing notice as their display text.
    async fn complete(&self, messages: &[Message]) -> Result<Message>;
}
