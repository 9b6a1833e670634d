use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `extproj.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtprojConfigV1 {
    /// Optional schema string for tooling (`extproj.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// What to do when two handlers claim the same extension: `first-wins` (default) or
    /// `reject`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_collision: Option<String>,

    /// Output format: `text` (default) or `json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Map of handler name -> config.
    #[serde(default)]
    pub handlers: BTreeMap<String, HandlerConfig>,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HandlerConfig {
    /// Set to `false` to keep the handler out of the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanConfig {
    /// Glob patterns for paths `extproj scan` skips.
    #[serde(default)]
    pub exclude: Vec<String>,
}
