use anyhow::Context;
use extproj_handlers::{ExtensionRegistry, builtin_registrations};
use extproj_settings::{EffectiveConfig, ExtprojConfigV1, Overrides};

/// Parse and resolve config text. Empty text means defaults.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<EffectiveConfig> {
    let cfg = if config_text.trim().is_empty() {
        ExtprojConfigV1::default()
    } else {
        extproj_settings::parse_config_toml(config_text).context("parse config")?
    };
    extproj_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Registry of every built-in handler the config leaves enabled.
pub fn build_registry(config: &EffectiveConfig) -> anyhow::Result<ExtensionRegistry> {
    let mut registry = ExtensionRegistry::new(config.on_collision);
    for registration in builtin_registrations() {
        if !config.handler_enabled(registration.name) {
            tracing::debug!(handler = registration.name, "handler disabled by config");
            continue;
        }
        registry
            .register(registration)
            .with_context(|| format!("register handler {}", registration.name))?;
    }
    Ok(registry)
}
