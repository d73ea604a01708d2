use serde::Deserialize;

/// Problem document settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemConfig {
    /// Base URI that problem `type` values are built under
    #[serde(default = "default_type_base_uri")]
    pub type_base_uri: String,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            type_base_uri: default_type_base_uri(),
        }
    }
}

fn default_type_base_uri() -> String {
    errata_core::DEFAULT_TYPE_BASE_URI.to_string()
}
