//! Use case orchestration for extproj.
//!
//! This crate provides the application layer: use cases that wire configuration, the handler
//! registry, and rendering together. It is intentionally thin.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod config;
mod handlers;
mod project;
mod render;
mod scan;

pub use config::{build_registry, load_config};
pub use handlers::{HandlerInfo, HandlersReport, list_handlers};
pub use project::{DEFAULT_TOOLSET, describe_project, project_subgraph};
pub use render::{
    render_descriptor_text, render_handlers_text, render_scan_text, scan_json, to_json_pretty,
    write_text_file,
};
pub use scan::{ScanEntry, ScanInput, ScanOutput, ScanStatus, run_scan};
