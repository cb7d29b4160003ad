//! Monolith library
//!
//! Configuration, wiring and units behind the `monolith` binary, exposed as a
//! library so the composition can be exercised from tests.

pub mod config;
pub mod http;
pub mod units;
pub mod wiring;

pub use config::{BridgeMode, ConfigError, MonolithConfig, UnitKind};
pub use http::{build_router, AppState};
pub use wiring::{build_services, compose, Services, WiringError};
