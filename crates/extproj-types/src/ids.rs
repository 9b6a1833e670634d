//! Stable identifiers for handlers, target types, properties, and diagnostic codes.
//!
//! Codes are short snake_case discriminators; they show up in JSON output.

// Handlers
pub const HANDLER_VISUAL_STUDIO: &str = "visual-studio";

// Target types and their properties
pub const TARGET_TYPE_EXTERNAL: &str = "external";
pub const PROPERTY_FILE: &str = "file";

// Diagnostic codes
pub const CODE_UNRECOGNIZED_EXTENSION: &str = "unrecognized_extension";
pub const CODE_UNRECOGNIZED_SCHEMA_VERSION: &str = "unrecognized_schema_version";
pub const CODE_MALFORMED_DOCUMENT: &str = "malformed_document";
pub const CODE_NOT_IMPLEMENTED: &str = "not_implemented";
pub const CODE_IO_ERROR: &str = "io_error";
pub const CODE_MISSING_PROPERTY: &str = "missing_property";

// Config
pub const SCHEMA_CONFIG_V1: &str = "extproj.config.v1";
