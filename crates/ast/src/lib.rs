//! Bytecode-level AST for decompiled JVM method bodies.
//!
//! The AST is a tree of arena-allocated nodes addressed by `NodeId`.
//! Labels and the branch operands that point at them overlay a control
//! flow graph on that tree; the flow passes resolve the overlay back
//! into structured constructs. Nodes are owned by the arena and mutated
//! in place, so ids stay valid across rewrites.

pub mod arena;
pub mod node;
pub mod expr;
pub mod code;
pub mod matching;
