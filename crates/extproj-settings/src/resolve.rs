use crate::model::ExtprojConfigV1;
use anyhow::Context;
use extproj_handlers::{CollisionPolicy, builtin_registrations};
use extproj_types::ids;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Values given on the command line; they win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub on_collision: Option<String>,
    pub format: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub on_collision: CollisionPolicy,
    pub format: OutputFormat,
    pub disabled_handlers: BTreeSet<String>,
    pub scan_exclude: Vec<String>,
    exclude_set: GlobSet,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            on_collision: CollisionPolicy::default(),
            format: OutputFormat::default(),
            disabled_handlers: BTreeSet::new(),
            scan_exclude: Vec::new(),
            exclude_set: GlobSet::empty(),
        }
    }
}

impl EffectiveConfig {
    pub fn handler_enabled(&self, name: &str) -> bool {
        !self.disabled_handlers.contains(name)
    }

    /// Whether `path` matches one of the `scan.exclude` globs.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_set.is_match(path)
    }
}

pub fn resolve_config(
    cfg: ExtprojConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CONFIG_V1
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            ids::SCHEMA_CONFIG_V1
        );
    }

    let mut effective = EffectiveConfig::default();

    if let Some(policy) = overrides.on_collision.or(cfg.on_collision) {
        effective.on_collision = parse_collision_policy(&policy)?;
    }

    if let Some(format) = overrides.format.or(cfg.format) {
        effective.format = parse_format(&format)?;
    }

    let known: Vec<&str> = builtin_registrations().iter().map(|r| r.name).collect();
    for (name, hc) in cfg.handlers.iter() {
        if !known.contains(&name.as_str()) {
            anyhow::bail!(
                "unknown handler: {name} (expected one of: {})",
                known.join(", ")
            );
        }
        if hc.enabled == Some(false) {
            effective.disabled_handlers.insert(name.clone());
        }
    }

    effective.exclude_set = build_exclude_set(&cfg.scan.exclude)?;
    effective.scan_exclude = cfg.scan.exclude;

    Ok(effective)
}

fn build_exclude_set(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid scan.exclude glob: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("build scan.exclude glob set")
}

fn parse_collision_policy(v: &str) -> anyhow::Result<CollisionPolicy> {
    match v {
        "first-wins" => Ok(CollisionPolicy::FirstWins),
        "reject" => Ok(CollisionPolicy::Reject),
        other => anyhow::bail!("unknown on_collision: {other} (expected first-wins|reject)"),
    }
}

fn parse_format(v: &str) -> anyhow::Result<OutputFormat> {
    match v {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected text|json)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve(toml: &str, overrides: Overrides) -> anyhow::Result<EffectiveConfig> {
        resolve_config(parse_config_toml(toml)?, overrides)
    }

    #[test]
    fn empty_config_gives_defaults() {
        let eff = resolve("", Overrides::default()).expect("resolve");
        assert_eq!(eff.on_collision, CollisionPolicy::FirstWins);
        assert_eq!(eff.format, OutputFormat::Text);
        assert!(eff.handler_enabled("visual-studio"));
        assert!(!eff.is_excluded("a/b.vcproj"));
    }

    #[test]
    fn file_values_are_applied() {
        let eff = resolve(
            r#"
schema = "extproj.config.v1"
on_collision = "reject"
format = "json"

[handlers.visual-studio]
enabled = false

[scan]
exclude = ["**/vendor/**"]
"#,
            Overrides::default(),
        )
        .expect("resolve");
        assert_eq!(eff.on_collision, CollisionPolicy::Reject);
        assert_eq!(eff.format, OutputFormat::Json);
        assert!(!eff.handler_enabled("visual-studio"));
        assert!(eff.is_excluded("src/vendor/zlib/zlib.vcproj"));
        assert!(!eff.is_excluded("src/app/app.vcproj"));
        assert_eq!(eff.scan_exclude, vec!["**/vendor/**".to_string()]);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let eff = resolve(
            "on_collision = \"reject\"\nformat = \"json\"\n",
            Overrides {
                on_collision: Some("first-wins".to_string()),
                format: Some("text".to_string()),
            },
        )
        .expect("resolve");
        assert_eq!(eff.on_collision, CollisionPolicy::FirstWins);
        assert_eq!(eff.format, OutputFormat::Text);
    }

    #[test]
    fn invalid_values_name_the_offender() {
        let err = resolve("format = \"yaml\"", Overrides::default()).expect_err("bad format");
        assert!(err.to_string().contains("yaml"));

        let err = resolve("on_collision = \"last-wins\"", Overrides::default())
            .expect_err("bad policy");
        assert!(err.to_string().contains("last-wins"));

        let err = resolve("[scan]\nexclude = [\"a/[\"]\n", Overrides::default())
            .expect_err("bad glob");
        assert!(err.to_string().contains("a/["));

        let err = resolve("[handlers.xcode]\nenabled = false\n", Overrides::default())
            .expect_err("unknown handler");
        assert!(err.to_string().contains("xcode"));

        let err = resolve("schema = \"extproj.config.v9\"", Overrides::default())
            .expect_err("bad schema");
        assert!(err.to_string().contains("extproj.config.v9"));
    }

    #[test]
    fn config_schema_describes_top_level_keys() {
        let schema = serde_json::to_value(crate::config_schema()).expect("serialize schema");
        let props = schema
            .get("properties")
            .and_then(|p| p.as_object())
            .expect("properties");
        for key in ["schema", "on_collision", "format", "handlers", "scan"] {
            assert!(props.contains_key(key), "missing {key}");
        }
    }
}
