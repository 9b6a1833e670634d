//! Visual Studio project file adapters.
//!
//! Two layouts are understood and presented through one [`VsProject`] type:
//! - `.vcproj` (Visual Studio 2003/2005/2008): `Version`, `Name`, `ProjectGUID` on the root
//! - `.vcxproj` (Visual Studio 2010): `ToolsVersion` on the root, `RootNamespace` and
//!   `ProjectGuid` inside an MSBuild-namespaced `PropertyGroup`
//!
//! This crate reads files but knows nothing about handlers, targets, or the context stack.

#![forbid(unsafe_code)]

mod project;
pub mod xml;

pub use project::{LEGACY_EXTENSION, MODERN_EXTENSION, SchemaError, SchemaFamily, VsProject};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;
    use extproj_types::ProjectPath;

    /// Parse arbitrary text as a legacy project and derive its descriptor.
    ///
    /// **Never panics** on any input.
    pub fn describe_legacy(text: &str) -> Result<(), SchemaError> {
        let project = VsProject::parse(ProjectPath::new("fuzz.vcproj"), text)?;
        let _ = project.descriptor()?;
        Ok(())
    }

    /// Parse arbitrary text as an MSBuild project and derive its descriptor.
    ///
    /// **Never panics** on any input.
    pub fn describe_modern(text: &str) -> Result<(), SchemaError> {
        let project = VsProject::parse(ProjectPath::new("fuzz.vcxproj"), text)?;
        let _ = project.descriptor()?;
        Ok(())
    }

    /// Decode arbitrary bytes per their BOM or declaration, then describe them as a legacy project.
    ///
    /// **Never panics** on any input.
    pub fn describe_legacy_bytes(bytes: &[u8]) -> Result<(), SchemaError> {
        let project = VsProject::parse_bytes(ProjectPath::new("fuzz.vcproj"), bytes)?;
        let _ = project.descriptor()?;
        Ok(())
    }
}
