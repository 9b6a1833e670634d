//! Context stack and diagnostics.
//!
//! A [`ContextStack`] holds breadcrumbs describing the nested operations in progress.
//! When something fails, [`ContextStack::raise`] captures a copy of those breadcrumbs into a
//! [`Diagnostic`], so the rendered error says what was being done, innermost first.
//!
//! The stack is passed explicitly; there is no global state. Use [`ContextStack::enter`] (or
//! [`ContextStack::scope`]) so every push is matched by a pop on every exit path.

#![forbid(unsafe_code)]

mod context;
mod diagnostic;

pub use context::{ContextEntry, ContextGuard, ContextStack};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticReport};
