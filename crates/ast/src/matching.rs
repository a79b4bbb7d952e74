//! Pattern helpers shared by the rewrite passes.

use crate::arena::{NodeArena, NodeId};
use crate::code::AstCode;
use crate::expr::Operand;
use crate::node::{AstNode, Block};

/// Whether `node` is an expression with the given code.
pub fn match_code(arena: &NodeArena, node: NodeId, code: AstCode) -> bool {
    matches!(arena.get(node), AstNode::Expression(e) if e.code == code)
}

/// If `node` is a goto, its target label.
pub fn match_goto_target(arena: &NodeArena, node: NodeId) -> Option<NodeId> {
    match arena.get(node) {
        AstNode::Expression(e) if e.code == AstCode::Goto => match e.operand {
            Operand::Label(label) => Some(label),
            _ => None,
        },
        _ => None,
    }
}

/// Whether the last statement of `block` is an expression with the given
/// code.
pub fn match_last(arena: &NodeArena, block: &Block, code: AstCode) -> bool {
    block
        .body
        .last()
        .is_some_and(|&last| match_code(arena, last, code))
}

/// Whether `node` is an expression that never falls through.
pub fn is_unconditional_control_flow(arena: &NodeArena, node: NodeId) -> bool {
    matches!(
        arena.get(node),
        AstNode::Expression(e) if e.code.is_unconditional_control_flow()
    )
}
