use crate::context::ContextEntry;
use extproj_types::{Location, ids};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// What went wrong, as a closed set the caller can match on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No registered handler claims the file's extension.
    UnrecognizedExtension,
    /// `Version` / `ToolsVersion` is missing or not a known value.
    UnrecognizedSchemaVersion,
    /// The XML parser rejected the document.
    MalformedDocument,
    /// The handler does not support the requested operation.
    NotImplemented,
    /// The project file could not be read.
    Io,
    /// A target lacks a required property.
    MissingProperty,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UnrecognizedExtension => ids::CODE_UNRECOGNIZED_EXTENSION,
            DiagnosticKind::UnrecognizedSchemaVersion => ids::CODE_UNRECOGNIZED_SCHEMA_VERSION,
            DiagnosticKind::MalformedDocument => ids::CODE_MALFORMED_DOCUMENT,
            DiagnosticKind::NotImplemented => ids::CODE_NOT_IMPLEMENTED,
            DiagnosticKind::Io => ids::CODE_IO_ERROR,
            DiagnosticKind::MissingProperty => ids::CODE_MISSING_PROPERTY,
        }
    }
}

/// A failure with the context trace that was active when it was raised.
///
/// Built by [`crate::ContextStack::raise`] / [`crate::ContextStack::raise_at`]. The context is
/// a copy; later pushes and pops on the stack do not show up here.
#[derive(Debug)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    location: Option<Location>,
    context: Vec<ContextEntry>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Diagnostic {
    pub(crate) fn new(
        kind: DiagnosticKind,
        message: String,
        location: Option<Location>,
        context: Vec<ContextEntry>,
    ) -> Self {
        Self {
            kind,
            message,
            location,
            context,
            source: None,
        }
    }

    /// Attach the lower-level error this diagnostic was built from.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Context entries, innermost first.
    pub fn context(&self) -> &[ContextEntry] {
        &self.context
    }

    /// Render the header line followed by one indented line per context entry.
    ///
    /// The output depends only on the diagnostic's contents: no colours, no terminal probing.
    pub fn render(&self) -> String {
        let mut out = match &self.location {
            Some(location) => format!("{location}: error: {}", self.message),
            None => format!("error: {}", self.message),
        };
        for entry in &self.context {
            out.push_str("\n    ");
            out.push_str(&entry.to_string());
        }
        out
    }

    pub fn to_report(&self) -> DiagnosticReport {
        DiagnosticReport {
            code: self.code().to_string(),
            message: self.message.clone(),
            location: self.location.clone(),
            context: self.context.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl StdError for Diagnostic {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Serializable form of a [`Diagnostic`] for JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub context: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContextStack;

    #[test]
    fn unlocated_renders_plain_header() {
        let stack = ContextStack::new();
        let diag = stack.raise(DiagnosticKind::NotImplemented, "not supported");
        assert_eq!(diag.render(), "error: not supported");
    }

    #[test]
    fn located_renders_location_prefix() {
        let stack = ContextStack::new();
        let diag = stack.raise_at(
            DiagnosticKind::MalformedDocument,
            "bad tag",
            Some(Location::at("bar.vcxproj", 3, 5)),
        );
        assert_eq!(diag.render(), "bar.vcxproj:3:5: error: bad tag");
    }

    #[test]
    fn located_without_location_falls_back() {
        let stack = ContextStack::new();
        let diag = stack.raise_at(DiagnosticKind::MalformedDocument, "bad tag", None);
        assert_eq!(diag.render(), "error: bad tag");
    }

    #[test]
    fn context_lines_are_indented_innermost_first() {
        let mut stack = ContextStack::new();
        stack.push("while describing targets");
        stack.push(Location::new("file=foo.vcproj"));
        let diag = stack.raise(DiagnosticKind::UnrecognizedSchemaVersion, "bad version");

        assert_eq!(
            diag.render(),
            "error: bad version\n    at file=foo.vcproj\n    while describing targets"
        );
        assert_eq!(diag.to_string(), diag.render());
    }

    #[test]
    fn source_is_exposed_through_error_trait() {
        let stack = ContextStack::new();
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let diag = stack.raise(DiagnosticKind::Io, "cannot read").with_source(io);

        let source = diag.source().expect("source attached");
        assert_eq!(source.to_string(), "gone");
    }

    #[test]
    fn report_carries_code_and_rendered_context() {
        let mut stack = ContextStack::new();
        stack.push("outer");
        let diag = stack.raise(DiagnosticKind::UnrecognizedExtension, "no handler");
        let report = diag.to_report();

        assert_eq!(report.code, "unrecognized_extension");
        assert_eq!(report.context, vec!["outer".to_string()]);
        let json = serde_json::to_value(&report).expect("serialize");
        assert!(json.get("location").is_none());
    }
}
