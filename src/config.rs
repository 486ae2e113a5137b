use crate::clock::Clock;
use chrono::NaiveDate;
use std::{env, net::SocketAddr, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/habits.json";
const DEFAULT_OWNER: u64 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub default_owner: u64,
    pub clock: Clock,
}

#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(String);

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError(format!("PORT must be a port number, got {value:?}")))?,
            None => DEFAULT_PORT,
        };

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let default_owner = match lookup("APP_DEFAULT_OWNER") {
            Some(value) => value.parse::<u64>().ok().filter(|id| *id > 0).ok_or_else(|| {
                ConfigError(format!("APP_DEFAULT_OWNER must be a positive integer, got {value:?}"))
            })?,
            None => DEFAULT_OWNER,
        };

        let clock = match lookup("APP_TODAY") {
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map(Clock::Fixed)
                .map_err(|_| ConfigError(format!("APP_TODAY must be YYYY-MM-DD, got {value:?}")))?,
            None => Clock::System,
        };

        Ok(Self {
            port,
            data_path,
            default_owner,
            clock,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
