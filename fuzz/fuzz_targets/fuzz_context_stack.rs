//! Fuzz target for context stack pairing and diagnostic rendering.
//!
//! Goal: Any sequence of scoped pushes and raises leaves the stack at its starting depth, and
//! rendering never panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_context_stack
//! ```

#![no_main]

use arbitrary::Arbitrary;
use extproj_diagnostics::{ContextStack, DiagnosticKind};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    /// Open a scope and run the nested ops inside it.
    Scope(String, Vec<Op>),
    Raise(String),
}

fn run(stack: &mut ContextStack, ops: &[Op], budget: &mut usize) {
    for op in ops {
        if *budget == 0 {
            return;
        }
        *budget -= 1;
        match op {
            Op::Scope(entry, nested) => {
                let depth = stack.depth();
                {
                    let mut guard = stack.enter(entry.as_str());
                    run(&mut guard, nested, budget);
                }
                assert_eq!(stack.depth(), depth);
            }
            Op::Raise(message) => {
                let diag = stack.raise(DiagnosticKind::NotImplemented, message.as_str());
                assert_eq!(diag.context().len(), stack.depth());
                let _ = diag.render();
            }
        }
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut stack = ContextStack::new();
    let mut budget = 1024;
    run(&mut stack, &ops, &mut budget);
    assert!(stack.is_empty());
});
