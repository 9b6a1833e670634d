//! The `scan` use case: describe every recognized project file under a directory.

use crate::project::describe_project;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use extproj_diagnostics::{ContextStack, Diagnostic};
use extproj_handlers::{ExtensionRegistry, ToolsetContext};
use extproj_settings::EffectiveConfig;
use extproj_types::{ProjectDescriptor, ProjectPath};
use walkdir::WalkDir;

/// Input for the scan use case.
#[derive(Clone, Copy, Debug)]
pub struct ScanInput<'a> {
    /// Directory to walk.
    pub root: &'a Utf8Path,
    pub registry: &'a ExtensionRegistry,
    pub config: &'a EffectiveConfig,
    pub toolset: &'a ToolsetContext,
}

#[derive(Debug)]
pub struct ScanEntry {
    pub path: ProjectPath,
    pub result: Result<ProjectDescriptor, Diagnostic>,
}

#[derive(Debug)]
pub struct ScanOutput {
    pub root: Utf8PathBuf,
    /// Entries in walk order (file names sorted within each directory).
    pub entries: Vec<ScanEntry>,
}

/// Status of a scanned file, as it appears in output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStatus {
    Described,
    Failed,
}

impl ScanEntry {
    pub fn status(&self) -> ScanStatus {
        match self.result {
            Ok(_) => ScanStatus::Described,
            Err(_) => ScanStatus::Failed,
        }
    }
}

impl ScanOutput {
    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status() == ScanStatus::Failed)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Walk `input.root` and describe every file a registered handler recognizes.
///
/// One context stack is used for the whole scan; each file is described with the stack at the
/// same base depth.
pub fn run_scan(input: ScanInput<'_>) -> anyhow::Result<ScanOutput> {
    let root = input.root;
    if !root.is_dir() {
        anyhow::bail!("scan root is not a directory: {root}");
    }

    let mut stack = ContextStack::new();
    let mut scan = stack.enter(format!("while scanning {root}"));
    let base_depth = scan.depth();
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {root}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };

        let relative = path.strip_prefix(root).unwrap_or(path);
        if input.config.is_excluded(relative.as_str()) {
            tracing::debug!(path = %relative, "excluded by scan.exclude");
            continue;
        }

        let project_path = ProjectPath::from(path);
        if !input.registry.recognizes(&project_path) {
            continue;
        }

        tracing::debug!(path = %project_path, "describing");
        let result = describe_project(input.registry, &mut scan, input.toolset, path);
        debug_assert_eq!(scan.depth(), base_depth);
        if let Err(diag) = &result {
            tracing::debug!(path = %project_path, code = diag.code(), "describe failed");
        }
        entries.push(ScanEntry {
            path: project_path,
            result,
        });
    }

    tracing::debug!(root = %root, files = entries.len(), "scan finished");
    Ok(ScanOutput {
        root: root.to_path_buf(),
        entries,
    })
}
