use std::path::Path;

use url::Url;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the problem base URI or health path is malformed,
    /// or the log filter is empty
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_problem_config()?;
        self.validate_health_config()?;

        if self.telemetry.log_filter.trim().is_empty() {
            anyhow::bail!("telemetry.log_filter must not be empty");
        }

        Ok(())
    }

    /// Problem types must be absolute http(s) URIs
    fn validate_problem_config(&self) -> anyhow::Result<()> {
        let base = &self.problem.type_base_uri;

        let url = Url::parse(base).map_err(|e| anyhow::anyhow!("invalid problem.type_base_uri '{base}': {e}"))?;

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("problem.type_base_uri must use http or https, got '{}'", url.scheme());
        }

        if base.ends_with('/') {
            anyhow::bail!("problem.type_base_uri must not end with '/'");
        }

        if url.query().is_some() || url.fragment().is_some() {
            anyhow::bail!("problem.type_base_uri must not carry a query or fragment");
        }

        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        Ok(())
    }
}
