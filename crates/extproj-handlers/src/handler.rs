use crate::subgraph::BuildSubgraph;
use crate::target::{Target, ToolsetContext};
use extproj_diagnostics::{ContextStack, Diagnostic, DiagnosticKind};
use extproj_types::ProjectDescriptor;

/// Handler for one family of external project files.
///
/// Implementations are stateless; the registry creates a fresh instance per resolution.
pub trait ExternalBuildHandler {
    /// Stable handler name, as used in configuration and listings.
    fn name(&self) -> &'static str;

    /// Describe the project named by the target's `file` property.
    fn project_descriptor(
        &self,
        stack: &mut ContextStack,
        toolset: &ToolsetContext,
        target: &Target,
    ) -> Result<ProjectDescriptor, Diagnostic>;

    /// Build-graph contribution of the target. Not supported unless overridden.
    fn build_subgraph(
        &self,
        stack: &mut ContextStack,
        _toolset: &ToolsetContext,
        _target: &Target,
    ) -> Result<BuildSubgraph, Diagnostic> {
        Err(stack.raise(
            DiagnosticKind::NotImplemented,
            format!(
                "building external projects with the `{}` handler is not implemented",
                self.name()
            ),
        ))
    }
}
