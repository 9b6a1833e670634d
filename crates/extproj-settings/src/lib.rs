//! Config parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{ExtprojConfigV1, HandlerConfig, ScanConfig};
pub use resolve::{EffectiveConfig, OutputFormat, Overrides};

/// Parse `extproj.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ExtprojConfigV1> {
    let cfg: ExtprojConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config: defaults, then file values, then overrides.
pub fn resolve_config(
    cfg: ExtprojConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON Schema describing `extproj.toml`.
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(ExtprojConfigV1)
}
