//! # wbx-config
//!
//! Layered configuration loading for wbx using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WBX_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.wbx/config.toml`
//! 4. User-level `~/.config/wbx/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WBX_CREDENTIALS__PASSWORD` -> `credentials.password`,
//! `WBX_TRANSFER__STOP_ON_ERROR` -> `transfer.stop_on_error`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use wbx_config::WbxConfig;
//!
//! let config = WbxConfig::load_with_dotenv(None).expect("config");
//! if config.credentials.is_configured() {
//!     println!("target: {}", config.credentials.endpoint_url);
//! }
//! ```

mod credentials;
mod error;
mod http;
mod source;
mod transfer;

pub use credentials::CredentialsConfig;
pub use error::ConfigError;
pub use http::HttpConfig;
pub use source::{SourceConfig, WIKIDATA_API_URL};
pub use transfer::TransferConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WbxConfig {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl WbxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`WbxConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = extra {
            if !path.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "--config".to_string(),
                    reason: format!("{} is not a readable file", path.display()),
                });
            }
        }
        let config: Self = Self::figment(extra).extract()?;
        config.http.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Reads `.env` from the current directory (if any) before building the
    /// figment. This is the entry point used by the CLI.
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain.
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".wbx/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("WBX_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wbx").join("config.toml"))
    }
}
