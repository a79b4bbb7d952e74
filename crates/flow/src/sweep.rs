//! Dead scaffolding removal.
//!
//! After the jump simplifier stabilizes, the tree is littered with nops,
//! leaves, labels nothing branches to anymore, breaks that restate what
//! the structure already says, and returns control can never reach.
//! This pass removes all of it, and re-runs the whole core when a
//! removal may have exposed new simplifications.

use girder_ast::arena::{NodeArena, NodeId};
use girder_ast::code::AstCode;
use girder_ast::matching::{
    is_unconditional_control_flow, match_code, match_goto_target, match_last,
};
use girder_ast::node::AstNode;
use rustc_hash::FxHashSet;

use crate::error::FlowError;
use crate::goto_removal::remove_gotos;

/// Remove dead labels, nops, leaves, redundant terminators, empty switch
/// arms, and unreachable returns from a method body, in place.
///
/// Re-invokes `remove_gotos` when unreachable returns were removed;
/// their removal can make further jump simplifications possible. Every
/// step strictly shrinks the tree, so the mutual recursion terminates.
pub fn remove_redundant_code(arena: &mut NodeArena, method: NodeId) -> Result<(), FlowError> {
    let all = arena.self_and_descendants(method);

    // Labels still targeted by a branch. Gotos aimed at the head of a
    // finally block do not count: a later lowering deletes those jumps,
    // and keeping their labels alive would block that cleanup.
    let finally_blocks: Vec<NodeId> = all
        .iter()
        .filter_map(|&n| match arena.get(n) {
            AstNode::TryCatch(t) => t.finally_block,
            _ => None,
        })
        .collect();

    let mut live_labels: FxHashSet<NodeId> = FxHashSet::default();

    'expressions: for &node in &all {
        let AstNode::Expression(e) = arena.get(node) else {
            continue;
        };
        if !e.is_branch() {
            continue;
        }

        if let Some(target) = match_goto_target(arena, node) {
            for &finally_block in &finally_blocks {
                if arena.block(finally_block).body.first() == Some(&target) {
                    continue 'expressions;
                }
            }
        }

        live_labels.extend(e.branch_targets());
    }

    // Purge nops, leaves, and dead labels from every body.
    let holders: Vec<NodeId> = all
        .iter()
        .copied()
        .filter(|&n| matches!(arena.get(n), AstNode::Block(_) | AstNode::Case(_)))
        .collect();

    for &holder in &holders {
        let mut body = take_body(arena, holder);
        body.retain(|&n| {
            !(match_code(arena, n, AstCode::Nop)
                || match_code(arena, n, AstCode::Leave)
                || (matches!(arena.get(n), AstNode::Label(_)) && !live_labels.contains(&n)))
        });
        put_body(arena, holder, body);
    }

    // A loop body never needs to end with an explicit continue.
    let loops: Vec<NodeId> = all
        .iter()
        .copied()
        .filter(|&n| matches!(arena.get(n), AstNode::Loop(_)))
        .collect();

    for &loop_node in &loops {
        let body = match arena.get(loop_node) {
            AstNode::Loop(l) => l.body,
            _ => continue,
        };
        if match_last(arena, arena.block(body), AstCode::LoopContinue) {
            arena.block_mut(body).body.pop();
        }
    }

    // Drop breaks no control flow reaches, then drop case bodies that
    // only break. Removing such a case redirects its values to the
    // default, so it is only safe when the default does nothing either.
    let switches: Vec<NodeId> = all
        .iter()
        .copied()
        .filter(|&n| matches!(arena.get(n), AstNode::Switch(_)))
        .collect();

    for &switch_node in &switches {
        let cases: Vec<NodeId> = match arena.get(switch_node) {
            AstNode::Switch(s) => s.cases.clone(),
            _ => continue,
        };

        let mut default_case = None;

        for &case in &cases {
            let (is_default, drop_trailing_break) = match arena.get(case) {
                AstNode::Case(c) => {
                    let size = c.body.len();
                    let drop_trailing_break = size >= 2
                        && is_unconditional_control_flow(arena, c.body[size - 2])
                        && match_code(arena, c.body[size - 1], AstCode::LoopOrSwitchBreak);
                    (c.values.is_empty(), drop_trailing_break)
                }
                _ => (false, false),
            };

            if is_default {
                default_case = Some(case);
            }
            if drop_trailing_break {
                if let AstNode::Case(c) = arena.get_mut(case) {
                    c.body.pop();
                }
            }
        }

        let default_removable = match default_case {
            None => true,
            Some(default_case) => is_single_break(arena, default_case),
        };

        if default_removable {
            let retained: Vec<NodeId> = cases
                .iter()
                .copied()
                .filter(|&case| !is_single_break(arena, case))
                .collect();
            if let AstNode::Switch(s) = arena.get_mut(switch_node) {
                s.cases = retained;
            }
        }
    }

    // A bare return at the end of the method is implied.
    let last = arena.block(method).body.last().copied();
    if let Some(last) = last {
        if match_code(arena, last, AstCode::Return) && arena.expr(last).arguments.is_empty() {
            arena.block_mut(method).body.pop();
        }
    }

    // Returns that directly follow unconditional control flow can never
    // execute.
    let mut modified = false;

    let holders: Vec<NodeId> = arena
        .self_and_descendants(method)
        .into_iter()
        .filter(|&n| matches!(arena.get(n), AstNode::Block(_) | AstNode::Case(_)))
        .collect();

    for &holder in &holders {
        let mut body = take_body(arena, holder);
        let mut i = 0;
        while i + 1 < body.len() {
            if is_unconditional_control_flow(arena, body[i])
                && match_code(arena, body[i + 1], AstCode::Return)
            {
                body.remove(i + 1);
                modified = true;
            } else {
                i += 1;
            }
        }
        put_body(arena, holder, body);
    }

    if modified {
        // More removals might be possible.
        return remove_gotos(arena, method);
    }

    Ok(())
}

fn take_body(arena: &mut NodeArena, holder: NodeId) -> Vec<NodeId> {
    match arena.get_mut(holder) {
        AstNode::Block(block) => std::mem::take(&mut block.body),
        AstNode::Case(case) => std::mem::take(&mut case.body),
        other => panic!("statement holder expected, found {:?}", other),
    }
}

fn put_body(arena: &mut NodeArena, holder: NodeId, body: Vec<NodeId>) {
    match arena.get_mut(holder) {
        AstNode::Block(block) => block.body = body,
        AstNode::Case(case) => case.body = body,
        other => panic!("statement holder expected, found {:?}", other),
    }
}

fn is_single_break(arena: &NodeArena, case: NodeId) -> bool {
    match arena.get(case) {
        AstNode::Case(c) => {
            c.body.len() == 1 && match_code(arena, c.body[0], AstCode::LoopOrSwitchBreak)
        }
        _ => false,
    }
}
