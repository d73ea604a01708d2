//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use errata_config::{Config, HealthConfig, ProblemConfig, ServerConfig, TelemetryConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                    health: HealthConfig::default(),
                },
                problem: ProblemConfig::default(),
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Render problem types under a different base URI
    pub fn with_type_base_uri(mut self, base: &str) -> Self {
        self.config.problem.type_base_uri = base.to_owned();
        self
    }

    /// Move the health endpoint
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
