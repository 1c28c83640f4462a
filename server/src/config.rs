//! Server configuration, read from the environment.
//!
//! - `RATATOUILLE_DATA_DIR`: storage root (default `data`)
//! - `RATATOUILLE_STORAGE`: `per-record` (default) or `single-file`
//! - `RATATOUILLE_BIND_ADDR`: listen address (default `0.0.0.0:3000`)

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use ratatouille_core::StorageLayout;
use thiserror::Error;

pub const DATA_DIR_VAR: &str = "RATATOUILLE_DATA_DIR";
pub const STORAGE_VAR: &str = "RATATOUILLE_STORAGE";
pub const BIND_ADDR_VAR: &str = "RATATOUILLE_BIND_ADDR";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StorageLayout,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let storage = match lookup(STORAGE_VAR) {
            Some(raw) => raw.trim().parse::<StorageLayout>().map_err(|message| ConfigError::Invalid {
                var: STORAGE_VAR,
                message,
            })?,
            None => StorageLayout::default(),
        };

        let bind_addr: SocketAddr = lookup(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                message: e.to_string(),
            })?;

        Ok(Self {
            data_dir,
            storage,
            bind_addr,
        })
    }
}
