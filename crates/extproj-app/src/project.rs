use camino::Utf8Path;
use extproj_diagnostics::{ContextStack, Diagnostic};
use extproj_handlers::{
    BuildSubgraph, ExtensionRegistry, ExternalTargetType, Target, ToolsetContext,
};
use extproj_types::{ProjectDescriptor, ProjectPath};

/// Toolset assumed when the caller does not name one.
pub const DEFAULT_TOOLSET: &str = "vs2010";

fn external_target(path: &Utf8Path) -> Target {
    let name = path.file_stem().unwrap_or("external");
    Target::with_file(name, ProjectPath::from(path))
}

/// Describe a single project file through the `external` target type.
pub fn describe_project(
    registry: &ExtensionRegistry,
    stack: &mut ContextStack,
    toolset: &ToolsetContext,
    path: &Utf8Path,
) -> Result<ProjectDescriptor, Diagnostic> {
    ExternalTargetType::new(registry).project_descriptor(stack, toolset, &external_target(path))
}

/// Request the build subgraph of a single project file.
pub fn project_subgraph(
    registry: &ExtensionRegistry,
    stack: &mut ContextStack,
    toolset: &ToolsetContext,
    path: &Utf8Path,
) -> Result<BuildSubgraph, Diagnostic> {
    ExternalTargetType::new(registry).build_subgraph(stack, toolset, &external_target(path))
}
