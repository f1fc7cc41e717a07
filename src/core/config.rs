//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::catalog::CATALOG_BRAND;
use crate::core::stash::Stash;

/// Default low-stock threshold in skeins
pub const DEFAULT_LOW_STOCK: u32 = 1;

/// Sable configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Brand recorded on new threads when none is given
    pub default_brand: Option<String>,

    /// Default output format
    pub default_format: Option<String>,

    /// Threads at or below this quantity count as low stock
    pub low_stock: Option<u32>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(stash: Option<&Stash>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sable/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Stash config (.sable/config.yaml)
        if let Some(stash) = stash {
            if let Some(local) = Self::read_file(&stash.config_path()) {
                config.merge(local);
            }
        }

        // 4. Environment variables
        if let Ok(brand) = std::env::var("SABLE_BRAND") {
            config.default_brand = Some(brand);
        }
        if let Ok(format) = std::env::var("SABLE_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable config: {e}");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sable")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_brand.is_some() {
            self.default_brand = other.default_brand;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.low_stock.is_some() {
            self.low_stock = other.low_stock;
        }
    }

    /// Brand for new threads, falling back to the catalog brand
    pub fn brand(&self) -> String {
        self.default_brand
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| CATALOG_BRAND.to_string())
    }

    /// Low-stock threshold
    pub fn low_stock(&self) -> u32 {
        self.low_stock.unwrap_or(DEFAULT_LOW_STOCK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.brand(), "DMC");
        assert_eq!(config.low_stock(), DEFAULT_LOW_STOCK);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            default_brand: Some("Anchor".to_string()),
            default_format: Some("json".to_string()),
            low_stock: None,
        };
        base.merge(Config {
            default_brand: None,
            default_format: Some("yaml".to_string()),
            low_stock: Some(3),
        });

        assert_eq!(base.brand(), "Anchor");
        assert_eq!(base.default_format.as_deref(), Some("yaml"));
        assert_eq!(base.low_stock(), 3);
    }

    #[test]
    fn test_read_stash_config_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "default_brand: Cosmo\nlow_stock: 2\n").unwrap();

        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.brand(), "Cosmo");
        assert_eq!(config.low_stock(), 2);
    }

    #[test]
    fn test_read_bad_config_file_is_ignored() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "low_stock: [not, a, number]\n").unwrap();

        assert!(Config::read_file(&path).is_none());
    }

    #[test]
    fn test_blank_brand_falls_back() {
        let config = Config {
            default_brand: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.brand(), "DMC");
    }
}
