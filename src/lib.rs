pub mod analysis;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod ui;

pub use analysis::Pipeline;
pub use config::{ConfigStore, ProviderConfig};
pub use error::{Error, Result};
pub use git::CommitInfo;
pub use llm::{LlmProvider, ModelInvoker, OpenAiProvider};
pub use ui::{ConsolePrompter, Interaction, ResultView};
