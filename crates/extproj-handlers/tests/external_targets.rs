use extproj_diagnostics::{ContextStack, DiagnosticKind};
use extproj_handlers::{
    CollisionPolicy, ExtensionRegistry, ExternalTargetType, Target, ToolsetContext,
};
use extproj_test_util::{legacy_project_xml, modern_project_xml, write_file};
use extproj_types::{ProjectPath, VsVersion};
use tempfile::TempDir;

struct Fixture {
    tmp: TempDir,
    registry: ExtensionRegistry,
    toolset: ToolsetContext,
}

impl Fixture {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("temp dir"),
            registry: ExtensionRegistry::with_builtin_handlers(CollisionPolicy::FirstWins)
                .expect("registry"),
            toolset: ToolsetContext::new("vs2010"),
        }
    }

    fn target(&self, name: &str, contents: &str) -> (Target, ProjectPath) {
        let path = self.tmp.path().join(name);
        write_file(&path, contents);
        let path = ProjectPath::new(path.to_str().expect("utf8 temp path"));
        (Target::with_file("ext", path.clone()), path)
    }
}

#[test]
fn legacy_project_is_described_through_the_external_target() {
    let fx = Fixture::new();
    let (target, path) = fx.target(
        "foo.vcproj",
        &legacy_project_xml(Some("9.00"), Some("Foo"), Some("{ABC}")),
    );
    let mut stack = ContextStack::new();

    let d = ExternalTargetType::new(&fx.registry)
        .project_descriptor(&mut stack, &fx.toolset, &target)
        .expect("descriptor");

    assert_eq!(d.version, VsVersion::Vs2008);
    assert_eq!(d.name.as_deref(), Some("Foo"));
    assert_eq!(d.guid.as_deref(), Some("{ABC}"));
    assert_eq!(d.source, path);
    assert!(stack.is_empty());
}

#[test]
fn modern_project_is_described_through_the_external_target() {
    let fx = Fixture::new();
    let (target, _) = fx.target(
        "bar.vcxproj",
        &modern_project_xml(Some("4.0"), Some("Bar"), None),
    );

    let d = ExternalTargetType::new(&fx.registry)
        .project_descriptor(&mut ContextStack::new(), &fx.toolset, &target)
        .expect("descriptor");

    assert_eq!(d.version, VsVersion::Vs2010);
    assert_eq!(d.name.as_deref(), Some("Bar"));
}

#[test]
fn unknown_version_renders_with_file_and_element_context() {
    let fx = Fixture::new();
    let (target, path) = fx.target(
        "broken.vcproj",
        &legacy_project_xml(Some("6.00"), Some("Broken"), None),
    );
    let mut stack = ContextStack::new();
    stack.push("while describing external targets");

    let err = ExternalTargetType::new(&fx.registry)
        .project_descriptor(&mut stack, &fx.toolset, &target)
        .expect_err("6.00 is unknown");

    assert_eq!(err.kind(), DiagnosticKind::UnrecognizedSchemaVersion);
    let p = path.as_str();
    assert_eq!(
        err.render(),
        format!(
            "error: unrecognized version of Visual Studio project {p}: Version=\"6.00\"\n    \
             at {p}:2:1\n    \
             at file={p}\n    \
             while describing external targets"
        )
    );
    assert_eq!(stack.depth(), 1);
}

#[test]
fn build_subgraph_is_not_implemented_for_visual_studio() {
    let fx = Fixture::new();
    let (target, path) = fx.target(
        "bar.vcxproj",
        &modern_project_xml(Some("4.0"), Some("Bar"), None),
    );

    let err = ExternalTargetType::new(&fx.registry)
        .build_subgraph(&mut ContextStack::new(), &fx.toolset, &target)
        .expect_err("not implemented");

    assert_eq!(err.kind(), DiagnosticKind::NotImplemented);
    assert_eq!(
        err.context()[0].to_string(),
        format!("at file={}", path.as_str())
    );
}

#[test]
fn disabled_registry_reports_every_extension_as_unrecognized() {
    let fx = Fixture::new();
    let empty = ExtensionRegistry::new(CollisionPolicy::FirstWins);
    let (target, _) = fx.target(
        "foo.vcproj",
        &legacy_project_xml(Some("9.00"), Some("Foo"), None),
    );

    let err = ExternalTargetType::new(&empty)
        .project_descriptor(&mut ContextStack::new(), &fx.toolset, &target)
        .expect_err("no handlers");
    assert_eq!(err.kind(), DiagnosticKind::UnrecognizedExtension);
}
