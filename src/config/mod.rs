//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the API access token, the API base URL, the log level and the
//! theme preference.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::ui::Theme;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/tasklist-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub log_level: String,
    pub theme_name: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme_name() -> String {
    Theme::default().name.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            access_token: None,
            base_url: None,
            log_level: default_log_level(),
            theme_name: default_theme_name(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided, or the default directory otherwise. A missing
    /// file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        if file_path.exists() {
            debug!("Loading configuration from {}...", file_path.display());
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.access_token = data.access_token;
            self.base_url = data.base_url;
            self.log_level = data.log_level;
            self.theme_name = data.theme_name;
        }
        self.file_path = Some(file_path);

        Ok(())
    }

    /// Attempt to serialize the configuration data and write it to the disk,
    /// returning any unrecoverable errors.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            access_token: self.access_token.clone(),
            base_url: self.base_url.clone(),
            log_level: self.log_level.clone(),
            theme_name: self.theme_name.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Apply values given on the command line and persist them. Returns
    /// whether anything changed.
    ///
    pub fn apply_overrides(
        &mut self,
        base_url: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<bool, AppError> {
        let mut changed = false;
        if let Some(base_url) = base_url {
            self.base_url = Some(base_url.to_string());
            changed = true;
        }
        if let Some(access_token) = access_token {
            self.access_token = Some(access_token.to_string());
            changed = true;
        }
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    /// Return the access token and base URL needed to reach the API.
    ///
    pub fn credentials(&self) -> Result<(String, String), ConfigError> {
        let access_token = self
            .access_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::AccessTokenNotSet)?;
        let base_url = self
            .base_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::BaseUrlNotSet)?;
        Ok((access_token, base_url))
    }

    /// Return the configured maximum log level.
    ///
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Return the configured theme, falling back to the default one for
    /// unknown names.
    ///
    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", self.theme_name);
            Theme::default()
        })
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
