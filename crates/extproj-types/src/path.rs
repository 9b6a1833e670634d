use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path-like value for an external project file.
///
/// The path is kept exactly as it was given (no separator rewriting), so the
/// native path handed to the filesystem and the text shown in diagnostics are
/// the same string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectPath(String);

impl Default for ProjectPath {
    fn default() -> Self {
        ProjectPath::new(".")
    }
}

impl ProjectPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let v = s.as_ref();
        // Avoid empty path; keep it explicit.
        if v.is_empty() {
            return Self(".".to_string());
        }
        Self(v.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_native_path(&self) -> &Utf8Path {
        Utf8Path::new(&self.0)
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }

    /// Extension exactly as the file name carries it (no case folding).
    pub fn extension(&self) -> Option<&str> {
        self.as_native_path().extension()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.as_native_path().file_name()
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for ProjectPath {
    fn from(value: &Utf8Path) -> Self {
        ProjectPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for ProjectPath {
    fn from(value: Utf8PathBuf) -> Self {
        ProjectPath::new(value.as_str())
    }
}

impl From<&str> for ProjectPath {
    fn from(value: &str) -> Self {
        ProjectPath::new(value)
    }
}
