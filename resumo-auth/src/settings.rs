use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::AuthError;
use crate::token_storage::FileTokenStore;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Directory holding the token file. Defaults to `<cache_dir>/resumo`.
    #[serde(default)]
    pub token_dir: Option<PathBuf>,
}

fn default_server_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            token_dir: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("RESUMO_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Self::from_file(&config_path)
    }

    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("RESUMO").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.is_empty() {
            return Err("server_url is required".to_string());
        }
        if !self.server_url.starts_with("http") {
            return Err("server_url must be a valid HTTP(S) URL".to_string());
        }
        Ok(())
    }

    /// Opens the token file in the configured directory.
    pub fn token_store(&self) -> Result<FileTokenStore, AuthError> {
        match &self.token_dir {
            Some(dir) => FileTokenStore::in_dir(dir),
            None => FileTokenStore::new(),
        }
    }
}
