#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod problem;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use health::*;
pub use problem::*;
pub use server::*;
pub use telemetry::*;

/// Top-level errata configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and built-in routes
    #[serde(default)]
    pub server: ServerConfig,
    /// Problem document rendering
    #[serde(default)]
    pub problem: ProblemConfig,
    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
