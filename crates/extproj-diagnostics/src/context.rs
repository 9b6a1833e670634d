use crate::diagnostic::{Diagnostic, DiagnosticKind};
use extproj_types::{Locatable, Location};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// One breadcrumb on the context stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextEntry {
    /// Free-form description of the operation in progress.
    Description(String),
    /// A located element; renders as `at <location>`.
    At(Location),
}

impl ContextEntry {
    pub fn at<L: Locatable + ?Sized>(item: &L) -> Self {
        ContextEntry::At(item.location())
    }
}

impl fmt::Display for ContextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextEntry::Description(desc) => f.write_str(desc),
            ContextEntry::At(location) => write!(f, "at {location}"),
        }
    }
}

impl From<&str> for ContextEntry {
    fn from(value: &str) -> Self {
        ContextEntry::Description(value.to_string())
    }
}

impl From<String> for ContextEntry {
    fn from(value: String) -> Self {
        ContextEntry::Description(value)
    }
}

impl From<Location> for ContextEntry {
    fn from(value: Location) -> Self {
        ContextEntry::At(value)
    }
}

/// Ordered breadcrumbs for one logical chain of operations.
///
/// Entries are pushed in call order and popped strictly LIFO. One stack per chain of work;
/// sharing a stack between interleaved operations breaks the pairing.
#[derive(Clone, Debug, Default)]
pub struct ContextStack {
    entries: Vec<ContextEntry>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<ContextEntry>) {
        let entry = entry.into();
        tracing::trace!(depth = self.entries.len() + 1, context = %entry, "push context");
        self.entries.push(entry);
    }

    /// Remove the most recently pushed entry.
    ///
    /// # Panics
    ///
    /// Popping an empty stack means a caller broke the push/pop pairing. That is a bug in the
    /// caller, not a condition to report to the user, so it panics.
    pub fn pop(&mut self) -> ContextEntry {
        match self.entries.pop() {
            Some(entry) => {
                tracing::trace!(depth = self.entries.len(), context = %entry, "pop context");
                entry
            }
            None => panic!("context stack underflow: pop() without a matching push()"),
        }
    }

    /// Push `entry` and return a guard that pops it when dropped.
    ///
    /// The guard dereferences to the stack, so nested work goes through the guard and the
    /// borrow checker keeps nesting LIFO.
    pub fn enter(&mut self, entry: impl Into<ContextEntry>) -> ContextGuard<'_> {
        self.push(entry);
        let depth = self.entries.len();
        ContextGuard { stack: self, depth }
    }

    /// Run `f` with `entry` pushed; the entry is popped however `f` exits.
    pub fn scope<R>(
        &mut self,
        entry: impl Into<ContextEntry>,
        f: impl FnOnce(&mut ContextStack) -> R,
    ) -> R {
        let mut guard = self.enter(entry);
        f(&mut guard)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the current entries, most recently pushed first.
    pub fn snapshot(&self) -> Vec<ContextEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Build an unlocated diagnostic carrying the current context.
    pub fn raise(&self, kind: DiagnosticKind, message: impl Into<String>) -> Diagnostic {
        self.raise_at(kind, message, None)
    }

    /// Build a diagnostic pointing at `location` (if known) carrying the current context.
    pub fn raise_at(
        &self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        location: Option<Location>,
    ) -> Diagnostic {
        let diag = Diagnostic::new(kind, message.into(), location, self.snapshot());
        tracing::debug!(code = kind.code(), depth = self.depth(), "raised diagnostic");
        diag
    }
}

/// Scoped context entry; pops on drop.
pub struct ContextGuard<'a> {
    stack: &'a mut ContextStack,
    depth: usize,
}

impl Deref for ContextGuard<'_> {
    type Target = ContextStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for ContextGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        let depth = self.stack.depth();
        if depth != self.depth && !std::thread::panicking() {
            panic!(
                "context stack imbalance: guard expected depth {}, found {}",
                self.depth, depth
            );
        }
        self.stack.entries.truncate(self.depth - 1);
    }
}
