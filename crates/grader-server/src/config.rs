//! Server configuration

use std::env;
use std::fs;

use grader_core::{Error, GradingConfig, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub grading: GradingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            grading: GradingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source.
    ///
    /// Reads `HOST`, `PORT`, `PROMPT_GRADER_CONFIG` (path to a JSON grading
    /// configuration) and `PROMPT_GRADER_MAX_SUGGESTIONS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                Error::Configuration(format!("PORT must be a port number, got '{}'", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let mut grading = match lookup("PROMPT_GRADER_CONFIG") {
            Some(path) => {
                let json = fs::read_to_string(&path).map_err(|e| {
                    Error::Configuration(format!("cannot read grading config '{}': {}", path, e))
                })?;
                GradingConfig::from_json_str(&json)?
            }
            None => GradingConfig::default(),
        };

        if let Some(raw) = lookup("PROMPT_GRADER_MAX_SUGGESTIONS") {
            let max = raw.trim().parse::<usize>().map_err(|_| {
                Error::Configuration(format!(
                    "PROMPT_GRADER_MAX_SUGGESTIONS must be a number, got '{}'",
                    raw
                ))
            })?;
            grading = grading.with_max_suggestions(max);
        }

        Ok(Self {
            host,
            port,
            grading,
        })
    }

    /// Address to bind, as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
