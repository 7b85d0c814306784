use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates, caches and stores one config value. A missing config
/// reads as `TConfig::default()` and is not cached until it is first saved.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.to_string()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    fn cache(&self) -> Result<MutexGuard<'_, Option<TConfig>>, String> {
        self.config
            .lock()
            .map_err(|e| format!("Config cache poisoned: {}", e))
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.cache()?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        *self.cache()? = Some(config.clone());
        Ok(())
    }

    /// Loads the current config, lets `change` edit it and stores the result.
    pub fn update_config<F>(&self, change: F) -> Result<TConfig, String>
    where
        F: FnOnce(&mut TConfig),
    {
        let mut config = self.get_config()?;
        change(&mut config);
        self.set_config(&config)?;
        Ok(config)
    }

    pub fn clear_config(&self) -> Result<(), String> {
        self.config_content_provider.clear_config_content()?;
        *self.cache()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentConfigProvider;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        move_delay_ms: u64,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self { move_delay_ms: 500 }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.move_delay_ms > 10_000 {
                return Err("move_delay_ms must not exceed 10000".to_string());
            }
            Ok(())
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<MemoryContentConfigProvider, TestConfig> {
        ConfigManager::new(
            MemoryContentConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_config_is_default() {
        assert_eq!(manager(None).get_config(), Ok(TestConfig::default()));
    }

    #[test]
    fn test_stored_config_is_loaded() {
        let config = manager(Some("move_delay_ms: 20\n")).get_config().unwrap();
        assert_eq!(config.move_delay_ms, 20);
    }

    #[test]
    fn test_invalid_stored_config_is_rejected() {
        let result = manager(Some("move_delay_ms: 99999\n")).get_config();
        assert!(result.unwrap_err().contains("validation"));
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let manager = manager(None);
        assert!(manager.set_config(&TestConfig { move_delay_ms: 20_000 }).is_err());
        assert_eq!(manager.get_config(), Ok(TestConfig::default()));
    }

    #[test]
    fn test_update_config_persists() {
        let manager = manager(None);
        manager.update_config(|config| config.move_delay_ms = 0).unwrap();
        assert_eq!(manager.get_config().unwrap().move_delay_ms, 0);
    }

    #[test]
    fn test_clear_config_restores_default() {
        let manager = manager(Some("move_delay_ms: 20\n"));
        assert_eq!(manager.get_config().unwrap().move_delay_ms, 20);
        manager.clear_config().unwrap();
        assert_eq!(manager.get_config(), Ok(TestConfig::default()));
    }
}
