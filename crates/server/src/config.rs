//! Server configuration from the environment

use predict_facade::{ConfigError, PredictorConfig};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_PREDICT_TIMEOUT: &str = "PREDICT_TIMEOUT";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Startup failures
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Predictor(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Listener and request settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub predict_timeout: Duration,
    pub predictor: PredictorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            predict_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            predictor: PredictorConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(ENV_PORT) {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ServerError::InvalidValue {
                key: ENV_PORT,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
        };

        let timeout_secs = match lookup(ENV_PREDICT_TIMEOUT) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ServerError::InvalidValue {
                        key: ENV_PREDICT_TIMEOUT,
                        value: raw,
                        reason: "must be positive".to_string(),
                    })
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ServerError::InvalidValue {
                        key: ENV_PREDICT_TIMEOUT,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            host,
            port,
            predict_timeout: Duration::from_secs(timeout_secs),
            predictor: PredictorConfig::from_lookup(&lookup)?,
        })
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ServerError::InvalidValue {
            key: ENV_HOST,
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}
