//! Stable value types used across the extproj workspace.
//!
//! This crate is intentionally boring:
//! - path-like values with a native path and an extension
//! - source locations and the `Locatable` capability
//! - the normalized project descriptor
//! - stable string IDs and codes

#![forbid(unsafe_code)]

pub mod descriptor;
pub mod ids;
pub mod location;
pub mod path;

pub use descriptor::{ProjectDescriptor, UnknownVsVersion, VsVersion};
pub use location::{Locatable, Location};
pub use path::ProjectPath;
