//! Configuration structures for Cinedex.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the tab-separated catalog file.
    pub catalog_path: PathBuf,
    /// Field delimiter within a catalog line.
    pub field_delimiter: char,
    /// Skip lines that fail to parse instead of failing the whole read.
    pub skip_malformed: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("./catalog.tsv"),
            field_delimiter: '\t',
            skip_malformed: false,
        }
    }
}

impl CatalogConfig {
    /// Creates a configuration for the given catalog path with the
    /// default delimiter and error policy.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: path.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("./catalog.tsv"));
        assert_eq!(config.field_delimiter, '\t');
        assert!(!config.skip_malformed);
    }

    #[test]
    fn test_catalog_config_for_path() {
        let config = CatalogConfig::for_path("/data/movies.tsv");
        assert_eq!(config.catalog_path, PathBuf::from("/data/movies.tsv"));
        assert_eq!(config.field_delimiter, '\t');
        assert!(!config.skip_malformed);
    }

    #[test]
    fn test_catalog_config_custom() {
        let config = CatalogConfig {
            catalog_path: PathBuf::from("/data/movies.csv"),
            field_delimiter: ',',
            skip_malformed: true,
        };

        assert_eq!(config.catalog_path, PathBuf::from("/data/movies.csv"));
        assert_eq!(config.field_delimiter, ',');
        assert!(config.skip_malformed);
    }

    #[test]
    fn test_catalog_config_clone() {
        let config1 = CatalogConfig::default();
        let config2 = config1.clone();
        assert_eq!(config1.catalog_path, config2.catalog_path);
        assert_eq!(config1.field_delimiter, config2.field_delimiter);
    }

    #[test]
    fn test_catalog_config_serde_roundtrip() {
        let original = CatalogConfig {
            catalog_path: PathBuf::from("/data/movies.tsv"),
            field_delimiter: '\t',
            skip_malformed: true,
        };
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: CatalogConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(original.catalog_path, deserialized.catalog_path);
        assert_eq!(original.field_delimiter, deserialized.field_delimiter);
        assert_eq!(original.skip_malformed, deserialized.skip_malformed);
    }
}
