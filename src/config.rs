use std::{env, fs, str::FromStr};

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Memory,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "memory" => Ok(Backend::Memory),
            _ => Err(ConfigError::InvalidValue {
                name: "STORE_BACKEND",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub csv_path: String,
    pub database_path: String,
    pub backend: Backend,
    pub host: String,
    pub port: u16,
    /// Abort startup on the first record with unreadable hours instead of
    /// skipping it.
    pub strict_load: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: "restaurants.csv".to_string(),
            database_path: "restaurant_data.db".to_string(),
            backend: Backend::Sqlite,
            host: "0.0.0.0".to_string(),
            port: 5000,
            strict_load: false,
        }
    }
}

impl Config {
    /// Reads a JSON config. Missing fields keep their defaults.
    pub fn from_config(config: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(config)?)
    }

    /// Builds the config from the environment.
    ///
    /// # Environment Variables
    /// - `CONFIG_FILE` (optional): JSON file read first
    /// - `RESTAURANTS_CSV`: hours CSV (default: `restaurants.csv`)
    /// - `DATABASE_PATH`: SQLite file (default: `restaurant_data.db`)
    /// - `STORE_BACKEND`: `sqlite` | `memory` (default: `sqlite`)
    /// - `HOST`: bind address (default: `0.0.0.0`)
    /// - `PORT`: bind port (default: 5000)
    /// - `STRICT_LOAD`: `true` to abort on a bad record (default: `false`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("CONFIG_FILE") {
            Ok(path) => Self::from_config(&fs::read_to_string(path)?)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|name| env::var(name).ok())?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(csv_path) = lookup("RESTAURANTS_CSV") {
            self.csv_path = csv_path;
        }
        if let Some(database_path) = lookup("DATABASE_PATH") {
            self.database_path = database_path;
        }
        if let Some(backend) = lookup("STORE_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = parse_value("PORT", port)?;
        }
        if let Some(strict_load) = lookup("STRICT_LOAD") {
            self.strict_load = parse_value("STRICT_LOAD", strict_load)?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
