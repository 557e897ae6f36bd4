use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ui::Interaction;

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";

/// Placeholder shown instead of a stored key. Submitting it unchanged keeps
/// the existing key.
pub const MASKED_KEY: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Empty means the public OpenAI endpoint; non-empty means Azure.
    pub endpoint: String,
    pub api_key: String,
    /// Azure deployment name, or the model name for the public endpoint.
    pub deployment: String,
}

/// Session-scoped environment the store mirrors credentials into. Injected so
/// the mirror is explicit state with a set/clear lifecycle instead of an
/// ambient global.
pub trait SessionEnv {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// The real process environment.
pub struct ProcessEnv;

impl SessionEnv for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }

    fn remove(&mut self, key: &str) {
        std::env::remove_var(key);
    }
}

/// Non-secret half of the stored configuration. The API key lives in a
/// separate credentials file, never in this one.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSettings {
    endpoint: Option<String>,
    deployment: Option<String>,
}

pub struct ConfigStore {
    dir: PathBuf,
    env: Box<dyn SessionEnv>,
}

impl ConfigStore {
    pub fn new() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("could not determine the user config directory".to_string()))?
            .join("crashfinder");
        Ok(Self::with_env(dir, Box::new(ProcessEnv)))
    }

    pub fn with_env(dir: PathBuf, env: Box<dyn SessionEnv>) -> Self {
        Self { dir, env }
    }

    /// Resolves the provider configuration: explicit environment first, then
    /// the stored files, then the built-in default for the deployment name
    /// only. Returns `None` when no API key can be found anywhere.
    pub fn get(&self) -> Result<Option<ProviderConfig>> {
        let settings = self.read_settings();

        let endpoint = self
            .env
            .get(ENV_ENDPOINT)
            .filter(|v| !v.is_empty())
            .or_else(|| settings.endpoint.filter(|v| !v.is_empty()))
            .unwrap_or_default();

        let deployment = self
            .env
            .get(ENV_DEPLOYMENT)
            .filter(|v| !v.is_empty())
            .or_else(|| settings.deployment.filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string());

        let api_key = self
            .env
            .get(ENV_API_KEY)
            .filter(|v| !v.is_empty())
            .or_else(|| self.read_stored_key());

        Ok(api_key.map(|api_key| ProviderConfig {
            endpoint,
            api_key,
            deployment,
        }))
    }

    /// Persists the configuration and mirrors all three values into the
    /// session environment for the remainder of the process.
    pub fn save(&mut self, config: &ProviderConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let settings = StoredSettings {
            endpoint: Some(config.endpoint.clone()),
            deployment: Some(config.deployment.clone()),
        };
        fs::write(self.settings_path(), serde_json::to_string_pretty(&settings)?)?;

        fs::write(self.credentials_path(), &config.api_key)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(self.credentials_path(), fs::Permissions::from_mode(0o600))?;
        }

        self.env.set(ENV_ENDPOINT, &config.endpoint);
        self.env.set(ENV_API_KEY, &config.api_key);
        self.env.set(ENV_DEPLOYMENT, &config.deployment);

        tracing::info!("Saved provider configuration");
        Ok(())
    }

    /// Removes both stored files and the mirrored environment variables.
    pub fn clear(&mut self) -> Result<()> {
        for path in [self.settings_path(), self.credentials_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        self.env.remove(ENV_ENDPOINT);
        self.env.remove(ENV_API_KEY);
        self.env.remove(ENV_DEPLOYMENT);

        tracing::info!("Cleared provider configuration");
        Ok(())
    }

    /// Interactive configuration round-trip. Known values are pre-filled and
    /// the stored key is redisplayed masked; leaving the mask untouched keeps
    /// it. Returns `None` when the user dismisses any prompt, or when no key
    /// is supplied and none is stored.
    pub fn prompt_for_config(
        &self,
        interaction: &mut dyn Interaction,
    ) -> Result<Option<ProviderConfig>> {
        let current = self.get()?;

        let endpoint_prefill = current.as_ref().map(|c| c.endpoint.as_str()).unwrap_or("");
        let Some(endpoint) = interaction.input(
            "Provider endpoint (leave empty for api.openai.com)",
            endpoint_prefill,
        )?
        else {
            return Ok(None);
        };

        let key_prefill = if current.is_some() { MASKED_KEY } else { "" };
        let Some(entered) = interaction.input("API key", key_prefill)? else {
            return Ok(None);
        };
        let api_key = if entered.is_empty() || entered == MASKED_KEY {
            match &current {
                Some(c) => c.api_key.clone(),
                None => return Ok(None),
            }
        } else {
            entered
        };

        let deployment_prefill = current
            .as_ref()
            .map(|c| c.deployment.as_str())
            .unwrap_or(DEFAULT_DEPLOYMENT);
        let Some(deployment) = interaction.input("Deployment or model name", deployment_prefill)?
        else {
            return Ok(None);
        };
        let deployment = if deployment.is_empty() {
            DEFAULT_DEPLOYMENT.to_string()
        } else {
            deployment
        };

        Ok(Some(ProviderConfig {
            endpoint,
            api_key,
            deployment,
        }))
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.join("settings.json")
    }

    fn credentials_path(&self) -> PathBuf {
        self.dir.join("credentials")
    }

    fn read_settings(&self) -> StoredSettings {
        fs::read_to_string(self.settings_path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn read_stored_key(&self) -> Option<String> {
        fs::read_to_string(self.credentials_path())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
