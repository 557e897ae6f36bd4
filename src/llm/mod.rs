pub mod invoker;
pub mod openai;
pub mod prompts;
pub mod provider;

pub use invoker::ModelInvoker;
pub use openai::OpenAiProvider;
pub use prompts::{build_analysis_prompt, NO_ANALYSIS, SYSTEM_PROMPT};
pub use provider::LlmProvider;
