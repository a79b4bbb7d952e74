use crate::expr::Expression;
use crate::node::{AstNode, Block};

/// Opaque node identifier. Index into NodeArena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Flat arena storing all AST nodes of a method body.
///
/// Nodes reference each other by NodeId, not by nesting. Ids are stable
/// for the life of the arena, so maps keyed by NodeId compare by node
/// identity and never by shape; two structurally equal expressions stay
/// distinguishable.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<AstNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a new node, returns its id.
    pub fn alloc(&mut self, node: AstNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> &mut AstNode {
        &mut self.nodes[id.0 as usize]
    }

    /// The expression at `id`. Panics if the node is not an expression.
    pub fn expr(&self, id: NodeId) -> &Expression {
        match self.get(id) {
            AstNode::Expression(e) => e,
            other => panic!("expression expected at {:?}, found {:?}", id, other),
        }
    }

    /// The expression at `id`, mutable. Panics if the node is not an
    /// expression.
    pub fn expr_mut(&mut self, id: NodeId) -> &mut Expression {
        match self.get_mut(id) {
            AstNode::Expression(e) => e,
            other => panic!("expression expected at {:?}, found {:?}", id, other),
        }
    }

    /// The block at `id`. Panics if the node is not a block.
    pub fn block(&self, id: NodeId) -> &Block {
        match self.get(id) {
            AstNode::Block(block) => block,
            other => panic!("block expected at {:?}, found {:?}", id, other),
        }
    }

    /// The block at `id`, mutable. Panics if the node is not a block.
    pub fn block_mut(&mut self, id: NodeId) -> &mut Block {
        match self.get_mut(id) {
            AstNode::Block(block) => block,
            other => panic!("block expected at {:?}, found {:?}", id, other),
        }
    }

    /// Number of nodes allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `id` and every node reachable from it through child links, in
    /// preorder.
    ///
    /// Detached nodes left behind by structural edits are not visited;
    /// passes traverse from the method root, never the raw arena storage.
    pub fn self_and_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];

        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children = self.get(node).children();
            children.reverse();
            stack.extend(children);
        }

        out
    }
}
