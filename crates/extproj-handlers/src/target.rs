use extproj_diagnostics::{ContextStack, Diagnostic, DiagnosticKind};
use extproj_types::{ProjectPath, ids};
use std::collections::BTreeMap;

/// The toolset a target is being processed for, e.g. `vs2010`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolsetContext {
    pub name: String,
}

impl ToolsetContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Path,
    String,
}

/// Declaration of a property a target type accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub required: bool,
    pub inheritable: bool,
    pub doc: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    Path(ProjectPath),
    String(String),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Path(_) => PropertyKind::Path,
            PropertyValue::String(_) => PropertyKind::String,
        }
    }
}

/// A named target with its property values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    name: String,
    properties: BTreeMap<String, PropertyValue>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Shorthand for a target whose `file` property is `path`.
    pub fn with_file(name: impl Into<String>, path: impl Into<ProjectPath>) -> Self {
        Self::new(name).with_property(ids::PROPERTY_FILE, PropertyValue::Path(path.into()))
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// The `file` property, or a `MissingProperty` diagnostic if it is absent or not a path.
    pub fn file(&self, stack: &ContextStack) -> Result<&ProjectPath, Diagnostic> {
        match self.property(ids::PROPERTY_FILE) {
            Some(PropertyValue::Path(path)) => Ok(path),
            Some(PropertyValue::String(_)) => Err(stack.raise(
                DiagnosticKind::MissingProperty,
                format!(
                    "property `{}` of target `{}` must be a path",
                    ids::PROPERTY_FILE,
                    self.name
                ),
            )),
            None => Err(stack.raise(
                DiagnosticKind::MissingProperty,
                format!(
                    "target `{}` is missing required property `{}`",
                    self.name,
                    ids::PROPERTY_FILE
                ),
            )),
        }
    }
}
