//! Control-flow cleanup for decompiled method bodies.
//!
//! Two passes over the structured AST working to a joint fixpoint:
//!
//! - **Goto elimination** rewrites synthetic jumps into fall-through,
//!   `break`, or `continue` wherever the enter/exit walker proves the
//!   rewrite preserves the path control takes.
//! - **Dead-code sweeping** removes the scaffolding the rewrites leave
//!   behind: orphaned labels, nops, redundant terminators, empty switch
//!   arms, and unreachable returns.
//!
//! Both mutate the caller's arena in place. The walker is the delicate
//! part: it has to refuse jumps that would enter a try region sideways,
//! because the finally frames on such a path would differ from the ones
//! the region was lowered against.

mod error;
mod goto_removal;
mod sweep;

pub use error::FlowError;
pub use goto_removal::remove_gotos;
pub use sweep::remove_redundant_code;
