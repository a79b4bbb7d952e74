//! Peephole rewrites over the decompiled AST.
//!
//! These passes run after control flow is structured and improve output
//! quality expression by expression. They never change tree structure,
//! only expression payloads, so they compose freely with the flow core.

mod constants;

pub use constants::insert_constant_references;
