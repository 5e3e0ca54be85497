use reqwest::Url;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl Config {
    /// `<config_dir>/stockscan/config.toml`, relative to the working
    /// directory when the platform has no config dir.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stockscan")
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// A missing file means defaults. Anything present must parse and validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Override the service address, e.g. from `--base-url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.api.base_url)?;

        let non_zero = [
            ("api.timeout_seconds", u64::from(self.api.timeout_seconds)),
            (
                "api.connect_timeout_seconds",
                u64::from(self.api.connect_timeout_seconds),
            ),
            ("ui.tick_rate_ms", self.ui.tick_rate_ms),
            ("ui.page_size", self.ui.page_size as u64),
        ];
        match non_zero.iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(invalid(format!("{key} must be greater than 0"))),
            None => Ok(()),
        }
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| invalid(format!("api.base_url '{base_url}' is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!(
            "api.base_url '{base_url}' must use http or https, got '{other}'"
        ))),
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid { message }
}
