use crate::handler::ExternalBuildHandler;
use crate::registry::HandlerRegistration;
use crate::target::{Target, ToolsetContext};
use extproj_diagnostics::{ContextEntry, ContextStack, Diagnostic, DiagnosticKind};
use extproj_types::{ProjectDescriptor, ProjectPath, ids};
use extproj_vsproj::{LEGACY_EXTENSION, MODERN_EXTENSION, SchemaError, VsProject};

/// Visual Studio 2003-2010 C++ projects.
///
/// Only describing projects is supported; building them keeps the trait's default.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisualStudioHandler;

const EXTENSIONS: &[&str] = &[LEGACY_EXTENSION, MODERN_EXTENSION];

impl VisualStudioHandler {
    pub fn registration() -> HandlerRegistration {
        HandlerRegistration {
            name: ids::HANDLER_VISUAL_STUDIO,
            extensions: EXTENSIONS,
            factory: create,
        }
    }

    /// Open `path` and derive its descriptor, reporting failures against `stack`.
    pub fn describe(
        &self,
        stack: &mut ContextStack,
        path: &ProjectPath,
    ) -> Result<ProjectDescriptor, Diagnostic> {
        let project = VsProject::open(path).map_err(|err| schema_diagnostic(stack, err))?;
        let guard = stack.enter(ContextEntry::at(&project));
        project
            .descriptor()
            .map_err(|err| schema_diagnostic(&guard, err))
    }
}

impl ExternalBuildHandler for VisualStudioHandler {
    fn name(&self) -> &'static str {
        ids::HANDLER_VISUAL_STUDIO
    }

    fn project_descriptor(
        &self,
        stack: &mut ContextStack,
        _toolset: &ToolsetContext,
        target: &Target,
    ) -> Result<ProjectDescriptor, Diagnostic> {
        let path = target.file(stack)?.clone();
        self.describe(stack, &path)
    }
}

fn create() -> Box<dyn ExternalBuildHandler> {
    Box::new(VisualStudioHandler)
}

fn schema_diagnostic(stack: &ContextStack, err: SchemaError) -> Diagnostic {
    let kind = match &err {
        SchemaError::Io { .. } => DiagnosticKind::Io,
        SchemaError::Xml { .. } => DiagnosticKind::MalformedDocument,
        SchemaError::UnrecognizedVersion { .. } | SchemaError::MissingVersion { .. } => {
            DiagnosticKind::UnrecognizedSchemaVersion
        }
    };
    stack
        .raise_at(kind, err.to_string(), err.location())
        .with_source(err)
}
