use crate::xml::{self, MSBUILD_NS, XmlElement, XmlError};
use extproj_types::{Locatable, Location, ProjectDescriptor, ProjectPath, VsVersion};
use thiserror::Error;

/// Extension of MSBuild-based (Visual Studio 2010+) project files.
pub const MODERN_EXTENSION: &str = "vcxproj";
/// Extension of Visual Studio 2003-2008 project files.
pub const LEGACY_EXTENSION: &str = "vcproj";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: ProjectPath,
        source: std::io::Error,
    },
    #[error("{source}")]
    Xml { path: ProjectPath, source: XmlError },
    #[error("unrecognized version of Visual Studio project {path}: {attribute}=\"{value}\"")]
    UnrecognizedVersion {
        path: ProjectPath,
        attribute: &'static str,
        value: String,
    },
    #[error("unrecognized version of Visual Studio project {path}: {attribute} attribute is missing")]
    MissingVersion {
        path: ProjectPath,
        attribute: &'static str,
    },
}

impl SchemaError {
    pub fn path(&self) -> &ProjectPath {
        match self {
            SchemaError::Io { path, .. }
            | SchemaError::Xml { path, .. }
            | SchemaError::UnrecognizedVersion { path, .. }
            | SchemaError::MissingVersion { path, .. } => path,
        }
    }

    /// Where parsing stopped, for documents the XML reader rejected.
    pub fn location(&self) -> Option<Location> {
        match self {
            SchemaError::Xml { path, source } => match source.position() {
                Some((line, col)) => Some(Location::at(path.as_str(), line, col)),
                None => Some(Location::new(path.as_str())),
            },
            _ => None,
        }
    }
}

/// Which project file layout a document follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaFamily {
    /// Visual Studio 2003/2005/2008: everything on root attributes.
    Legacy,
    /// Visual Studio 2010 MSBuild: `ToolsVersion` on the root, the rest in property groups.
    Modern,
}

impl SchemaFamily {
    /// `vcxproj` selects the MSBuild layout; anything else is read as the legacy layout.
    pub fn for_extension(extension: Option<&str>) -> Self {
        match extension {
            Some(MODERN_EXTENSION) => SchemaFamily::Modern,
            _ => SchemaFamily::Legacy,
        }
    }

    pub fn version_attribute(self) -> &'static str {
        match self {
            SchemaFamily::Legacy => "Version",
            SchemaFamily::Modern => "ToolsVersion",
        }
    }

    fn map_version(self, raw: &str) -> Option<VsVersion> {
        match (self, raw) {
            (SchemaFamily::Legacy, "7.10") => Some(VsVersion::Vs2003),
            (SchemaFamily::Legacy, "8.00") => Some(VsVersion::Vs2005),
            (SchemaFamily::Legacy, "9.00") => Some(VsVersion::Vs2008),
            (SchemaFamily::Modern, "4.0") => Some(VsVersion::Vs2010),
            _ => None,
        }
    }
}

const MODERN_NAME_PATH: [(Option<&str>, &str); 2] = [
    (Some(MSBUILD_NS), "PropertyGroup"),
    (Some(MSBUILD_NS), "RootNamespace"),
];
const MODERN_GUID_PATH: [(Option<&str>, &str); 2] = [
    (Some(MSBUILD_NS), "PropertyGroup"),
    (Some(MSBUILD_NS), "ProjectGuid"),
];

/// A parsed Visual Studio project file.
///
/// The document is read and parsed once, up front. `version`, `name` and `guid` are computed
/// from the tree on every call.
#[derive(Clone, Debug)]
pub struct VsProject {
    family: SchemaFamily,
    path: ProjectPath,
    root: XmlElement,
}

impl VsProject {
    /// Read and parse `path`; the schema family comes from its extension.
    pub fn open(path: &ProjectPath) -> Result<Self, SchemaError> {
        tracing::debug!(path = %path, "reading project file");
        let bytes = std::fs::read(path.as_native_path()).map_err(|source| SchemaError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse_bytes(path.clone(), &bytes)
    }

    /// Parse raw file contents, decoding them per their byte order mark or XML declaration.
    pub fn parse_bytes(path: ProjectPath, bytes: &[u8]) -> Result<Self, SchemaError> {
        match xml::decode_document(bytes) {
            Ok(text) => Self::parse(path, &text),
            Err(source) => Err(SchemaError::Xml { path, source }),
        }
    }

    /// Parse already-loaded text. No filesystem access.
    pub fn parse(path: ProjectPath, text: &str) -> Result<Self, SchemaError> {
        let family = SchemaFamily::for_extension(path.extension());
        let root = match xml::parse_document(text) {
            Ok(root) => root,
            Err(source) => return Err(SchemaError::Xml { path, source }),
        };
        tracing::trace!(path = %path, ?family, "parsed project file");
        Ok(Self { family, path, root })
    }

    pub fn family(&self) -> SchemaFamily {
        self.family
    }

    pub fn path(&self) -> &ProjectPath {
        &self.path
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn version(&self) -> Result<VsVersion, SchemaError> {
        let attribute = self.family.version_attribute();
        let Some(raw) = self.root.attribute(attribute) else {
            return Err(SchemaError::MissingVersion {
                path: self.path.clone(),
                attribute,
            });
        };
        self.family
            .map_version(raw)
            .ok_or_else(|| SchemaError::UnrecognizedVersion {
                path: self.path.clone(),
                attribute,
                value: raw.to_string(),
            })
    }

    pub fn name(&self) -> Option<&str> {
        match self.family {
            SchemaFamily::Legacy => self.root.attribute("Name"),
            SchemaFamily::Modern => self.root.find_text(&MODERN_NAME_PATH),
        }
    }

    pub fn guid(&self) -> Option<&str> {
        match self.family {
            SchemaFamily::Legacy => self.root.attribute("ProjectGUID"),
            SchemaFamily::Modern => self.root.find_text(&MODERN_GUID_PATH),
        }
    }

    pub fn descriptor(&self) -> Result<ProjectDescriptor, SchemaError> {
        Ok(ProjectDescriptor {
            version: self.version()?,
            name: self.name().map(str::to_string),
            guid: self.guid().map(str::to_string),
            source: self.path.clone(),
        })
    }
}

impl Locatable for VsProject {
    fn location(&self) -> Location {
        Location::at(self.path.as_str(), self.root.line, self.root.col)
    }
}
