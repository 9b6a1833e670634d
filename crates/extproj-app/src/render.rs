//! Text and JSON rendering of use case results.

use crate::handlers::HandlersReport;
use crate::scan::ScanOutput;
use anyhow::Context;
use camino::Utf8Path;
use extproj_types::ProjectDescriptor;
use serde::Serialize;
use serde_json::{Value, json};

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Multi-line text form of one descriptor.
pub fn render_descriptor_text(d: &ProjectDescriptor) -> String {
    format!(
        "source:  {}\nversion: {}\nname:    {}\nguid:    {}\n",
        d.source,
        d.version,
        or_dash(d.name.as_deref()),
        or_dash(d.guid.as_deref()),
    )
}

/// One line per described file. Failures are left out; they go to stderr.
pub fn render_scan_text(out: &ScanOutput) -> String {
    let mut text = String::new();
    for entry in &out.entries {
        if let Ok(d) = &entry.result {
            text.push_str(&format!(
                "{}: {} {} {}\n",
                entry.path,
                d.version,
                or_dash(d.name.as_deref()),
                or_dash(d.guid.as_deref()),
            ));
        }
    }
    text
}

pub fn render_handlers_text(report: &HandlersReport) -> String {
    let mut text = String::new();
    for handler in &report.handlers {
        text.push_str(&format!("{}: {}\n", handler.name, handler.extensions.join(", ")));
    }
    for c in &report.collisions {
        text.push_str(&format!(
            "collision: .{} kept by {}, ignored for {}\n",
            c.extension, c.kept, c.ignored
        ));
    }
    text
}

/// JSON form of a scan: one object per file with either a descriptor or a diagnostic.
pub fn scan_json(out: &ScanOutput) -> Value {
    let files: Vec<Value> = out
        .entries
        .iter()
        .map(|entry| match &entry.result {
            Ok(d) => json!({ "path": entry.path, "descriptor": d }),
            Err(diag) => json!({ "path": entry.path, "diagnostic": diag.to_report() }),
        })
        .collect();
    json!({
        "root": out.root.as_str(),
        "files": files,
        "failed": out.failed(),
    })
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("serialize json")?;
    text.push('\n');
    Ok(text)
}

pub fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use extproj_types::{ProjectPath, VsVersion};

    fn foo() -> ProjectDescriptor {
        ProjectDescriptor {
            version: VsVersion::Vs2008,
            name: Some("Foo".to_string()),
            guid: None,
            source: ProjectPath::new("foo.vcproj"),
        }
    }

    #[test]
    fn descriptor_text_uses_dash_for_missing_values() {
        assert_eq!(
            render_descriptor_text(&foo()),
            "source:  foo.vcproj\nversion: 2008\nname:    Foo\nguid:    -\n"
        );
    }

    #[test]
    fn json_has_trailing_newline() {
        let text = to_json_pretty(&foo()).expect("json");
        assert!(text.ends_with("}\n"));
        let value: Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(value["version"], json!(2008));
    }

    #[test]
    fn write_text_file_creates_parents() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = camino::Utf8PathBuf::from_path_buf(tmp.path().join("out/scan.json"))
            .expect("utf8 temp path");
        write_text_file(&path, "{}\n").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{}\n");
    }
}
