use extproj_types::ProjectPath;
use serde::Serialize;

/// One step of a build graph: run `commands`, reading `inputs` and producing `outputs`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildNode {
    pub name: String,
    pub commands: Vec<String>,
    pub inputs: Vec<ProjectPath>,
    pub outputs: Vec<ProjectPath>,
}

/// The part of the build graph contributed by one external project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildSubgraph {
    pub nodes: Vec<BuildNode>,
}

impl BuildSubgraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
