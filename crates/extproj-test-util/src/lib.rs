//! Shared test utilities for the extproj workspace.
//!
//! Project file builders live here rather than behind `#[cfg(test)]` because several crates'
//! unit and integration tests need the same fixtures.

use serde_json::Value;
use std::path::Path;

/// Escape text for use inside a double-quoted XML attribute or element body.
pub fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// A Visual Studio 2003-2008 style project. `None` leaves the attribute out entirely.
pub fn legacy_project_xml(
    version: Option<&str>,
    name: Option<&str>,
    guid: Option<&str>,
) -> String {
    let mut attrs = String::from(r#"ProjectType="Visual C++""#);
    if let Some(v) = version {
        attrs.push_str(&format!(r#" Version="{}""#, xml_escape(v)));
    }
    if let Some(n) = name {
        attrs.push_str(&format!(r#" Name="{}""#, xml_escape(n)));
    }
    if let Some(g) = guid {
        attrs.push_str(&format!(r#" ProjectGUID="{}""#, xml_escape(g)));
    }
    format!(
        r#"<?xml version="1.0" encoding="Windows-1252"?>
<VisualStudioProject
	{attrs}
	>
	<Platforms>
		<Platform Name="Win32"/>
	</Platforms>
	<Configurations>
		<Configuration Name="Debug|Win32" OutputDirectory="$(SolutionDir)$(ConfigurationName)"/>
	</Configurations>
	<Files/>
</VisualStudioProject>
"#
    )
}

/// A Visual Studio 2010 MSBuild project. `None` leaves the attribute or element out.
pub fn modern_project_xml(
    tools_version: Option<&str>,
    root_namespace: Option<&str>,
    guid: Option<&str>,
) -> String {
    let tools = tools_version
        .map(|v| format!(r#" ToolsVersion="{}""#, xml_escape(v)))
        .unwrap_or_default();
    let mut globals = String::new();
    if let Some(g) = guid {
        globals.push_str(&format!(
            "    <ProjectGuid>{}</ProjectGuid>\n",
            xml_escape(g)
        ));
    }
    if let Some(n) = root_namespace {
        globals.push_str(&format!(
            "    <RootNamespace>{}</RootNamespace>\n",
            xml_escape(n)
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Project DefaultTargets="Build"{tools} xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ItemGroup Label="ProjectConfigurations">
    <ProjectConfiguration Include="Debug|Win32">
      <Configuration>Debug</Configuration>
      <Platform>Win32</Platform>
    </ProjectConfiguration>
  </ItemGroup>
  <PropertyGroup Label="Globals">
{globals}    <Keyword>Win32Proj</Keyword>
  </PropertyGroup>
  <Import Project="$(VCTargetsPath)\Microsoft.Cpp.Default.props" />
</Project>
"#
    )
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, contents).expect("write file");
}

/// Replace every occurrence of `root` (and its forward-slash form) inside JSON strings with
/// `__ROOT__`, so output produced under a temp dir can be compared against fixed values.
pub fn normalize_root(mut value: Value, root: &str) -> Value {
    let forward = root.replace('\\', "/");
    normalize_root_recursive(&mut value, root, &forward);
    value
}

fn normalize_root_recursive(value: &mut Value, root: &str, forward: &str) {
    match value {
        Value::String(s) => {
            if s.contains(root) {
                *s = s.replace(root, "__ROOT__");
            }
            if s.contains(forward) {
                *s = s.replace(forward, "__ROOT__");
            }
        }
        Value::Object(map) => {
            for val in map.values_mut() {
                normalize_root_recursive(val, root, forward);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_root_recursive(val, root, forward);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(xml_escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn legacy_builder_omits_absent_attributes() {
        let xml = legacy_project_xml(Some("9.00"), None, Some("{G}"));
        assert!(xml.contains(r#"Version="9.00""#));
        assert!(!xml.contains("Name=\"Foo"));
        assert!(xml.contains(r#"ProjectGUID="{G}""#));
    }

    #[test]
    fn modern_builder_places_globals_in_property_group() {
        let xml = modern_project_xml(Some("4.0"), Some("Bar"), None);
        assert!(xml.contains(r#"ToolsVersion="4.0""#));
        assert!(xml.contains("<RootNamespace>Bar</RootNamespace>"));
        assert!(!xml.contains("<ProjectGuid>"));
    }

    #[test]
    fn normalize_root_rewrites_nested_strings() {
        let value = json!({
            "source": "/tmp/x/foo.vcproj",
            "items": [{"path": "/tmp/x/a/b.vcxproj"}],
            "count": 2
        });
        let normalized = normalize_root(value, "/tmp/x");
        assert_eq!(
            normalized,
            json!({
                "source": "__ROOT__/foo.vcproj",
                "items": [{"path": "__ROOT__/a/b.vcxproj"}],
                "count": 2
            })
        );
    }
}
