use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Asks the model which of the changes in `diff` likely caused the
    /// described issue. Returns the model's answer as opaque text.
    async fn analyze(&self, diff: &str, issue: &str) -> Result<String>;

    fn name(&self) -> &str;
}
