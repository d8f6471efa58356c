use crate::service::DESCRIPTION_PREVIEW_CHARS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub paging: PagingRules,
    pub listing: ListingRules,
    pub server: ServerRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingRules {
    pub default_limit: usize,
    /// Largest `limit` a listing may ask for
    pub max_limit: usize,
    /// Largest `limit` a search may ask for; unbounded when unset
    pub search_max_limit: Option<usize>,
}

impl Default for PagingRules {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 200,
            search_max_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingRules {
    pub description_preview_chars: usize,
}

impl Default for ListingRules {
    fn default() -> Self {
        Self {
            description_preview_chars: DESCRIPTION_PREVIEW_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerRules {
    pub bind: String,
    /// `"*"` allows any origin
    pub cors_allowed_origins: Vec<String>,
    /// Frontend directory served under `/static`, with `/index` as its `index.html`
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerRules {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            static_dir: None,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<QueryConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<QueryConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<QueryConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static QueryConfig {
    static DEFAULT_CONFIG: LazyLock<QueryConfig> = LazyLock::new(QueryConfig::default);
    &DEFAULT_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: QueryConfig = toml::from_str("[paging]\nmax_limit = 50\n").unwrap();
        assert_eq!(config.paging.max_limit, 50);
        assert_eq!(config.paging.default_limit, 10);
        assert_eq!(config.listing.description_preview_chars, 300);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.paging.search_max_limit, None);
    }

    #[test]
    fn test_search_ceiling_is_separate_from_listing() {
        let config: QueryConfig = toml::from_str("[paging]\nsearch_max_limit = 1000\n").unwrap();
        assert_eq!(config.paging.max_limit, 200);
        assert_eq!(config.paging.search_max_limit, Some(1000));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), QueryConfig::default());
    }
}
