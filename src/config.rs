//! Runtime configuration.
//!
//! Settings come from a JSON file (`config.json` by default). Credentials
//! and endpoints can be overridden from the environment so they need not be
//! written to disk:
//!
//! | Variable            | Field                    |
//! |---------------------|--------------------------|
//! | `CATALOG_ENDPOINT`  | `source.endpoint`        |
//! | `CATALOG_API_KEY`   | `source.api_key`         |
//! | `SPARQL_UPDATE_URL` | `storage.sparql_update`  |
//! | `SPARQL_USER`       | `storage.auth.user`      |
//! | `SPARQL_PASSWORD`   | `storage.auth.password`  |

use crate::errors::{EtlError, Result};
use crate::pipeline::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Catalog API settings.
#[derive(Clone, Debug, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    /// Records per page; offsets advance in multiples of this.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// The catalog allows one call every ten seconds.
    #[serde(default = "default_max_calls_per_second")]
    pub max_calls_per_second: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Graph store (SPARQL update endpoint) settings.
#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub sparql_update: String,
    #[serde(default)]
    pub auth: StorageAuth,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StorageAuth {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PipelineConfig {
    /// Keep running later resolvers after one fails.
    #[serde(default)]
    pub continue_on_error: bool,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_calls_per_second() -> f64 {
    0.1
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Parses a JSON document without touching the environment.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| EtlError::configuration(format!("invalid config: {}", e)))
    }

    /// Replaces fields with values returned by `lookup` for the override
    /// variables; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(v) = get("CATALOG_ENDPOINT") {
            self.source.endpoint = v;
        }
        if let Some(v) = get("CATALOG_API_KEY") {
            self.source.api_key = v;
        }
        if let Some(v) = get("SPARQL_UPDATE_URL") {
            self.storage.sparql_update = v;
        }
        if let Some(v) = get("SPARQL_USER") {
            self.storage.auth.user = v;
        }
        if let Some(v) = get("SPARQL_PASSWORD") {
            self.storage.auth.password = v;
        }
    }

    /// Checks that every credential and endpoint the run needs is present.
    pub fn validate(&self) -> Result<()> {
        require("source.endpoint", &self.source.endpoint)?;
        require("source.api_key", &self.source.api_key)?;
        require("storage.sparql_update", &self.storage.sparql_update)?;
        require("storage.auth.user", &self.storage.auth.user)?;

        require_url("source.endpoint", &self.source.endpoint)?;
        require_url("storage.sparql_update", &self.storage.sparql_update)?;

        if self.source.page_size == 0 {
            return Err(EtlError::configuration("source.page_size must be > 0"));
        }
        let rate = self.source.max_calls_per_second;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EtlError::configuration(format!(
                "source.max_calls_per_second must be a positive number, got {}",
                rate
            )));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::configuration(format!("{} is missing", field)));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<()> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .map_err(|e| EtlError::configuration(format!("{} is not a valid URL: {}", field, e)))
}

/// Loads `path`, applies environment overrides and validates the result.
pub fn load_config(path: &Path) -> Result<Config> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// Same as [`load_config`] with the override variables read from `lookup`.
pub fn load_config_with<F>(path: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let content = fs::read_to_string(path).map_err(|e| {
        EtlError::configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let mut config = Config::from_json(&content)?;
    config.apply_overrides(lookup);
    config.validate()?;
    Ok(config)
}
