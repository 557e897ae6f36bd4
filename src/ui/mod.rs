pub mod prompt;
pub mod view;

#[cfg(test)]
pub(crate) use prompt::scripted;

pub use prompt::{ConsolePrompter, Interaction};
pub use view::{AnalysisReport, ResultView};
