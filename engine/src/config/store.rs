use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::{ConfigContentProvider, FileContentConfigProvider, Validate};

/// YAML-backed store for a validated config value. A missing document yields
/// the default config; a present but invalid one is an error.
pub struct ConfigStore<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    provider: TProvider,
    _config: PhantomData<TConfig>,
}

impl<TConfig> ConfigStore<FileContentConfigProvider, TConfig>
where
    TConfig: for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<TProvider, TConfig> ConfigStore<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn new(provider: TProvider) -> Self {
        Self {
            provider,
            _config: PhantomData,
        }
    }

    pub fn load(&self) -> Result<TConfig, String> {
        let Some(content) = self.provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        Ok(config)
    }

    pub fn save(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        self.provider.set_config_content(&content)
    }
}
