use crate::handler::ExternalBuildHandler;
use crate::registry::ExtensionRegistry;
use crate::subgraph::BuildSubgraph;
use crate::target::{PropertyDecl, PropertyKind, Target, ToolsetContext};
use extproj_diagnostics::{ContextStack, Diagnostic};
use extproj_types::{Location, ProjectDescriptor, ids};

const PROPERTIES: &[PropertyDecl] = &[PropertyDecl {
    name: ids::PROPERTY_FILE,
    kind: PropertyKind::Path,
    required: true,
    inheritable: false,
    doc: "File name of the external makefile or project.",
}];

/// Target type for projects built by some other build system.
///
/// Both operations pick a handler from the target's `file` extension and delegate to it with
/// `at file=<path>` on the context stack.
#[derive(Clone, Copy, Debug)]
pub struct ExternalTargetType<'r> {
    registry: &'r ExtensionRegistry,
}

impl<'r> ExternalTargetType<'r> {
    pub const NAME: &'static str = ids::TARGET_TYPE_EXTERNAL;

    pub fn new(registry: &'r ExtensionRegistry) -> Self {
        Self { registry }
    }

    pub fn properties() -> &'static [PropertyDecl] {
        PROPERTIES
    }

    pub fn project_descriptor(
        &self,
        stack: &mut ContextStack,
        toolset: &ToolsetContext,
        target: &Target,
    ) -> Result<ProjectDescriptor, Diagnostic> {
        self.delegate(stack, target, |stack, handler| {
            handler.project_descriptor(stack, toolset, target)
        })
    }

    pub fn build_subgraph(
        &self,
        stack: &mut ContextStack,
        toolset: &ToolsetContext,
        target: &Target,
    ) -> Result<BuildSubgraph, Diagnostic> {
        self.delegate(stack, target, |stack, handler| {
            handler.build_subgraph(stack, toolset, target)
        })
    }

    fn delegate<R>(
        &self,
        stack: &mut ContextStack,
        target: &Target,
        f: impl FnOnce(&mut ContextStack, &dyn ExternalBuildHandler) -> Result<R, Diagnostic>,
    ) -> Result<R, Diagnostic> {
        let file = target.file(stack)?;
        let mut guard = stack.enter(Location::new(format!("{}={file}", ids::PROPERTY_FILE)));
        let handler = self.registry.resolve(&guard, file)?;
        f(&mut guard, handler.as_ref())
    }
}
