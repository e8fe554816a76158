use super::{featurize::FeaturizeConfig, generation::GenerationConfig, traits::ConfigSection};
use crate::error::FreqgenError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub featurize: FeaturizeConfig,
    pub generation: GenerationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), FreqgenError> {
        self.featurize.validate()?;
        self.generation.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FreqgenError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FreqgenError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| FreqgenError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FreqgenError> {
        let config = self.config.read().unwrap();
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| FreqgenError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| FreqgenError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), FreqgenError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap();
        f(&mut config);
        config.validate()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip() {
        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.featurize.k_mers = vec![1, 2, 3];
                c.generation.population_size = 42;
            })
            .unwrap();

        let path = std::env::temp_dir().join("freqgen_config_test.toml");
        manager.save_to_file(&path).unwrap();

        let restored = ConfigManager::new();
        restored.load_from_file(&path).unwrap();
        let config = restored.get();
        assert_eq!(config.featurize.k_mers, vec![1, 2, 3]);
        assert_eq!(config.generation.population_size, 42);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn update_rejects_invalid_state() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.generation.rel_tol = 2.0);
        assert!(result.is_err());
    }
}
