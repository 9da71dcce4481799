//! Server configuration module.
//!
//! This module provides configuration loading for the unicorn server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `UNICORNS_LISTEN_PORT`: Port to listen on (default: `3000`)
//! - `UNICORNS_STATIC_DIRECTORY`: Directory served for unmatched paths (default: `./public`)
//! - `UNICORNS_SEED_FILE`: JSON file with the starting records (default: built-in herd)
//!
//! # Invariants
//!
//! - `listen_port` is always a valid port number (1-65535)
//! - `static_directory` is a path (it may not exist; missing files simply 404)

use std::path::PathBuf;

/// Server configuration.
///
/// # Post-conditions
///
/// - `listen_port` is always in the valid range (1-65535)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to listen on for HTTP requests.
    pub listen_port: u16,
    /// Directory whose files are served for paths no route matches.
    pub static_directory: PathBuf,
    /// Optional JSON seed file. `None` means start from the built-in herd.
    pub seed_file: Option<PathBuf>,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default static file directory.
    pub const DEFAULT_STATIC_DIRECTORY: &'static str = "./public";

    pub const LISTEN_PORT_VAR: &'static str = "UNICORNS_LISTEN_PORT";
    pub const STATIC_DIRECTORY_VAR: &'static str = "UNICORNS_STATIC_DIRECTORY";
    pub const SEED_FILE_VAR: &'static str = "UNICORNS_SEED_FILE";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `UNICORNS_LISTEN_PORT` is set but not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let listen_port = Self::parse_listen_port(get(Self::LISTEN_PORT_VAR))?;
        let static_directory = get(Self::STATIC_DIRECTORY_VAR)
            .map_or_else(|| PathBuf::from(Self::DEFAULT_STATIC_DIRECTORY), PathBuf::from);
        let seed_file = get(Self::SEED_FILE_VAR).map(PathBuf::from);

        Ok(Self {
            listen_port,
            static_directory,
            seed_file,
        })
    }

    /// Parse the listen port, falling back to the default if unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is set but not a valid port number.
    fn parse_listen_port(value: Option<String>) -> Result<u16, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::DEFAULT_PORT);
        };
        match value.trim().parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(ConfigError::InvalidValue {
                name: Self::LISTEN_PORT_VAR.to_string(),
                message: format!("'{value}' is not a valid port number (must be 1-65535)"),
            }),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: Self::DEFAULT_PORT,
            static_directory: PathBuf::from(Self::DEFAULT_STATIC_DIRECTORY),
            seed_file: None,
        }
    }
}
