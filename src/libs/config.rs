//! Application configuration.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! platform data directory (see [`DataStorage`]). Every section is optional;
//! a missing file simply yields [`Config::default`].
//!
//! ## Database Location
//!
//! The store file is resolved in this order:
//!
//! 1. `PUNCHLIST_DB` environment variable (a `.env` file is honored)
//! 2. `database.path` from the configuration file
//! 3. `punchlist.db` in the data directory
//!
//! ```rust,no_run
//! use punchlist::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("{}", config.database_path()?.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::problem::Priority;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "punchlist.db";
pub const DB_PATH_ENV: &str = "PUNCHLIST_DB";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    /// Location of the SQLite store file.
    pub path: PathBuf,
}

/// Values the CLI fills in when a new problem omits them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    pub fn read() -> Result<Config> {
        Self::read_from(Self::path()?)
    }

    /// Reads the configuration at `path`, returning defaults when the file is missing.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(Self::path()?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` when there was none.
    pub fn delete() -> Result<bool> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// Resolves the store file location.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Ok(path) = env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        match &self.database {
            Some(database) => Ok(database.path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    pub fn default_reporter(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.reported_by.as_deref())
    }

    pub fn default_priority(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.priority.as_deref())
    }

    /// Interactive setup wizard seeded with the current configuration.
    pub fn init() -> Result<Config> {
        let mut config = Config::read()?;

        let modules = [Message::ConfigModuleDatabase.to_string(), Message::ConfigModuleDefaults.to_string()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::SelectConfigModules.to_string())
            .items(&modules)
            .interact()?;

        for index in selected {
            match index {
                0 => {
                    let current = config.database_path()?;
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(current.display().to_string())
                        .interact_text()?;
                    config.database = Some(DatabaseConfig { path: PathBuf::from(path) });
                }
                1 => {
                    let defaults = config.defaults.clone().unwrap_or_default();
                    let reported_by: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultReporter.to_string())
                        .default(defaults.reported_by.unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    let priority: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultPriority.to_string())
                        .default(defaults.priority.unwrap_or_else(|| Priority::Medium.to_string()))
                        .validate_with(|input: &String| -> Result<(), String> {
                            input.parse::<Priority>().map(|_| ()).map_err(|_| Message::InvalidPriority(input.clone()).to_string())
                        })
                        .interact_text()?;
                    config.defaults = Some(DefaultsConfig {
                        reported_by: Some(reported_by).filter(|r| !r.is_empty()),
                        priority: Some(priority),
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
