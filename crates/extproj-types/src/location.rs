use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of something a diagnostic can point at.
///
/// `source` is usually a file path, but may be a symbolic position such as
/// `file=foo.vcproj` when the thing being located is a property value rather
/// than bytes in a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
}

impl Location {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            line: None,
            col: None,
        }
    }

    pub fn at<S: Into<String>>(source: S, line: u32, col: u32) -> Self {
        Self {
            source: source.into(),
            line: Some(line),
            col: Some(col),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
            if let Some(col) = self.col {
                write!(f, ":{col}")?;
            }
        }
        Ok(())
    }
}

/// Anything that can tell where it came from.
pub trait Locatable {
    fn location(&self) -> Location;
}

impl Locatable for Location {
    fn location(&self) -> Location {
        self.clone()
    }
}
