//! Server and client settings loaded from an optional TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,
}

/// Settings for the terminal client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Delay between status polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,
}

/// Whole settings file.
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
///
/// [client]
/// server_url = "http://localhost:8080"
/// poll_interval_ms = 2000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// `[server]` table.
    #[serde(default)]
    server: ServerConfig,

    /// `[client]` table.
    #[serde(default)]
    client: ClientConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

impl ServerConfig {
    /// Creates a server configuration.
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Replaces whichever values were given on the command line.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(default_host(), default_port())
    }
}

impl ClientConfig {
    /// Creates a client configuration.
    pub fn new(server_url: String, poll_interval_ms: u64) -> Self {
        Self {
            server_url,
            poll_interval_ms,
        }
    }

    /// Replaces whichever values were given on the command line.
    pub fn with_overrides(mut self, server_url: Option<String>, poll_interval_ms: Option<u64>) -> Self {
        if let Some(url) = server_url {
            self.server_url = url;
        }
        if let Some(ms) = poll_interval_ms {
            self.poll_interval_ms = ms;
        }
        self
    }

    /// Delay between status polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(default_server_url(), default_poll_interval_ms())
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(path, format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(path, format!("Failed to parse config: {}", e)))?;

        info!(bind = %settings.server.bind_address(), "Settings loaded");
        Ok(settings)
    }

    /// Loads `path` if given, falling back to defaults otherwise.
    ///
    /// A path that was given but cannot be read is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// A settings file that could not be read or parsed.
///
/// Records the offending file and the place in this crate that rejected it.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid settings file {}: {} ({}:{})", path.display(), message, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub message: String,
    /// Settings file being loaded.
    pub path: PathBuf,
    /// Line of the check that failed.
    pub line: u32,
    /// Source file of the check that failed.
    pub file: &'static str,
}

impl ConfigError {
    /// Error for `path`, located at the caller.
    #[track_caller]
    pub fn new(path: &Path, message: String) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message,
            path: path.to_path_buf(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}
