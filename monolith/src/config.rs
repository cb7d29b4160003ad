use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: unsupported value `{value}`")]
    InvalidValue { key: &'static str, value: String },

    #[error("unknown unit `{0}` (expected `author` or `book`)")]
    UnknownUnit(String),

    #[error("MONOLITH_UNITS selects no unit")]
    NoUnits,
}

/// Which adapter pair backs the author dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMode {
    /// Direct calls into an author service built in this process.
    InProcess,
    /// gRPC calls to `author_endpoint`.
    Remote,
}

impl FromStr for BridgeMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "inprocess" | "in-process" | "local" => Ok(BridgeMode::InProcess),
            "remote" | "grpc" => Ok(BridgeMode::Remote),
            _ => Err(ConfigError::InvalidValue {
                key: "AUTHOR_BRIDGE",
                value: value.to_string(),
            }),
        }
    }
}

/// A unit this process can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Author service exposed over gRPC.
    Author,
    /// Book catalogue exposed over HTTP.
    Book,
}

impl FromStr for UnitKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "author" => Ok(UnitKind::Author),
            "book" => Ok(UnitKind::Book),
            other => Err(ConfigError::UnknownUnit(other.to_string())),
        }
    }
}

/// Monolith configuration
#[derive(Debug, Clone)]
pub struct MonolithConfig {
    /// Book HTTP listen address
    pub http_addr: String,

    /// Author gRPC listen address
    pub author_grpc_addr: String,

    /// How book reaches author
    pub author_bridge: BridgeMode,

    /// Remote author endpoint, e.g. `http://127.0.0.1:50061`
    pub author_endpoint: Option<String>,

    /// Per-call deadline for remote author calls, in milliseconds
    pub author_timeout_ms: u64,

    /// Time units get to stop after cancellation, in seconds
    pub grace_period_secs: u64,

    /// Units hosted by this process
    pub units: Vec<UnitKind>,

    /// Service version
    pub version: String,
}

impl Default for MonolithConfig {
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:8080".to_string(),
            author_grpc_addr: "127.0.0.1:50061".to_string(),
            author_bridge: BridgeMode::InProcess,
            author_endpoint: None,
            author_timeout_ms: 3000,
            grace_period_secs: 5,
            units: vec![UnitKind::Author, UnitKind::Book],
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl MonolithConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from any key lookup, overriding defaults.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("HTTP_ADDR") {
            config.http_addr = addr;
        }

        if let Some(addr) = get("AUTHOR_GRPC_ADDR") {
            config.author_grpc_addr = addr;
        }

        if let Some(mode) = get("AUTHOR_BRIDGE") {
            config.author_bridge = mode.parse()?;
        }

        config.author_endpoint = get("AUTHOR_ENDPOINT");

        if let Some(timeout) = get("AUTHOR_TIMEOUT_MS") {
            config.author_timeout_ms = parse_number("AUTHOR_TIMEOUT_MS", &timeout)?;
        }

        if let Some(grace) = get("GRACE_PERIOD_SECS") {
            config.grace_period_secs = parse_number("GRACE_PERIOD_SECS", &grace)?;
        }

        if let Some(units) = get("MONOLITH_UNITS") {
            let mut parsed = Vec::new();
            for name in units.split(',').filter(|name| !name.trim().is_empty()) {
                let unit: UnitKind = name.parse()?;
                if !parsed.contains(&unit) {
                    parsed.push(unit);
                }
            }
            if parsed.is_empty() {
                return Err(ConfigError::NoUnits);
            }
            config.units = parsed;
        }

        Ok(config)
    }

    pub fn hosts(&self, unit: UnitKind) -> bool {
        self.units.contains(&unit)
    }

    /// Get the remote call deadline as Duration
    pub fn author_timeout(&self) -> Duration {
        Duration::from_millis(self.author_timeout_ms)
    }

    /// Get the grace period as Duration
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
