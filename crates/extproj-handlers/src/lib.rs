//! External build handlers and their dispatch.
//!
//! An [`ExternalBuildHandler`] knows how to describe (and eventually build) one family of
//! external project files. The [`ExtensionRegistry`] maps file extensions to handlers, and the
//! [`ExternalTargetType`] ties a target's `file` property to the right handler while keeping an
//! `at file=<path>` entry on the context stack.

#![forbid(unsafe_code)]

mod external;
mod handler;
mod registry;
mod subgraph;
mod target;
mod visual_studio;

pub use external::ExternalTargetType;
pub use handler::ExternalBuildHandler;
pub use registry::{
    Collision, CollisionPolicy, ExtensionRegistry, HandlerRegistration, RegistryError,
    builtin_registrations,
};
pub use subgraph::{BuildNode, BuildSubgraph};
pub use target::{PropertyDecl, PropertyKind, PropertyValue, Target, ToolsetContext};
pub use visual_studio::VisualStudioHandler;
