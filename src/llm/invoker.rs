use crate::config::{ConfigStore, ProviderConfig};
use crate::error::{Error, Result};
use crate::llm::openai::OpenAiProvider;
use crate::llm::provider::LlmProvider;
use crate::ui::Interaction;

pub type ProviderFactory = Box<dyn Fn(&ProviderConfig) -> Box<dyn LlmProvider>>;

/// Resolves credentials lazily and issues the model call. When no
/// configuration can be resolved, runs exactly one interactive
/// configure-and-save round-trip before retrying.
pub struct ModelInvoker {
    factory: ProviderFactory,
}

impl ModelInvoker {
    pub fn new(factory: ProviderFactory) -> Self {
        Self { factory }
    }

    /// The production invoker, backed by [`OpenAiProvider`].
    pub fn openai() -> Self {
        Self::new(Box::new(|config| {
            Box::new(OpenAiProvider::new(config.clone()))
        }))
    }

    pub async fn analyze(
        &self,
        store: &mut ConfigStore,
        interaction: &mut dyn Interaction,
        diff: &str,
        issue: &str,
    ) -> Result<String> {
        // Bounded retry: at most one configuration round-trip, and the retry
        // only proceeds with a freshly saved config.
        let mut prompted = false;
        loop {
            if let Some(config) = store.get()? {
                let provider = (self.factory)(&config);
                tracing::info!("Requesting analysis from {}", provider.name());
                return provider.analyze(diff, issue).await;
            }

            if prompted {
                return Err(Error::ConfigRequired);
            }
            let Some(config) = store.prompt_for_config(&mut *interaction)? else {
                return Err(Error::ConfigRequired);
            };
            store.save(&config)?;
            prompted = true;
        }
    }
}
