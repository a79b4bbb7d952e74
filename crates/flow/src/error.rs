use girder_ast::arena::NodeId;
use thiserror::Error;

/// Fatal structural failures of the control-flow passes.
///
/// Everything recoverable (unresolvable gotos, cyclic walks, absent
/// labels) is handled locally by the walker; these two mean the tree
/// itself is malformed and the pass cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A node was reached through two distinct parents while building
    /// the parent map, which leaves the map ill-defined.
    #[error("node {0:?} is linked from multiple locations")]
    MultiplyLinkedNode(NodeId),

    /// The walker reached a node it has no rule for.
    #[error("walker cannot handle node {0:?}")]
    UnsupportedNode(NodeId),
}
