//! Goto elimination.
//!
//! Scans every `Goto` expression and tries to rewrite it to a cheaper
//! equivalent: `Nop` when the target is exactly where control would fall
//! anyway, `LoopOrSwitchBreak` or `LoopContinue` when the jump matches
//! the innermost loop/switch exit or head. Runs to fixpoint, then hands
//! the tree to the dead-code sweeper.

use girder_ast::arena::{NodeArena, NodeId};
use girder_ast::code::AstCode;
use girder_ast::expr::Operand;
use girder_ast::matching::match_code;
use girder_ast::node::AstNode;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::FlowError;
use crate::sweep::remove_redundant_code;

/// Remove redundant gotos from a method body, in place.
///
/// Builds the structural indices, simplifies jumps until a full sweep
/// changes nothing, then sweeps out the dead scaffolding. The sweeper
/// re-invokes this entry point when its own removals may have exposed
/// new simplifications.
pub fn remove_gotos(arena: &mut NodeArena, method: NodeId) -> Result<(), FlowError> {
    let pass = GotoRemoval::build(arena, method)?;

    loop {
        let mut modified = false;

        for node in arena.self_and_descendants(method) {
            if match_code(arena, node, AstCode::Goto) {
                modified |= pass.try_simplify_goto(arena, node)?;
            }
        }

        if !modified {
            break;
        }
    }

    remove_redundant_code(arena, method)
}

/// Structural indices over one method body.
///
/// Built once per run and valid until the tree's structure changes. The
/// simplifier only rewrites expression payloads in place, so the indices
/// survive its whole fixpoint loop; the sweeper's structural edits are
/// followed by a fresh run with fresh indices.
pub(crate) struct GotoRemoval {
    /// Parent of each node; the method root maps to None.
    parents: FxHashMap<NodeId, Option<NodeId>>,
    /// Next sibling inside ordered child lists; None for the last child.
    next_sibling: FxHashMap<NodeId, Option<NodeId>>,
    /// For a statement directly preceded by a label, that label.
    labels: FxHashMap<NodeId, NodeId>,
}

impl GotoRemoval {
    /// Walk the tree once, recording parents, sibling links, and label
    /// attachment. Fails fast if any node is reachable through two
    /// distinct parents.
    pub(crate) fn build(arena: &NodeArena, method: NodeId) -> Result<Self, FlowError> {
        let mut pass = GotoRemoval {
            parents: FxHashMap::default(),
            next_sibling: FxHashMap::default(),
            labels: FxHashMap::default(),
        };

        pass.parents.insert(method, None);

        let mut stack = vec![method];

        while let Some(node) = stack.pop() {
            let children = arena.get(node).children();
            let mut previous: Option<NodeId> = None;

            for &child in &children {
                if pass.parents.contains_key(&child) {
                    return Err(FlowError::MultiplyLinkedNode(child));
                }
                pass.parents.insert(child, Some(node));

                if let Some(prev) = previous {
                    pass.next_sibling.insert(prev, Some(child));
                    if matches!(arena.get(prev), AstNode::Label(_)) {
                        pass.labels.insert(child, prev);
                    }
                }
                previous = Some(child);
            }

            if let Some(last) = previous {
                pass.next_sibling.insert(last, None);
            }

            stack.extend(children.into_iter().rev());
        }

        // A label and the statement it marks always share a parent.
        debug_assert!(pass
            .labels
            .iter()
            .all(|(stmt, label)| pass.parents.get(stmt) == pass.parents.get(label)));

        Ok(pass)
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied().flatten()
    }

    /// Lazy walk up the parent chain, nearest first.
    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_of(node), move |&n| self.parent_of(n))
    }

    /// Enclosing try/catch regions of `node`, nearest first.
    fn try_ancestors<'a>(
        &'a self,
        arena: &'a NodeArena,
        node: NodeId,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.ancestors(node)
            .filter(|&n| matches!(arena.get(n), AstNode::TryCatch(_)))
    }

    /// Try to rewrite one goto. The rules are ordered strongest first:
    /// fall-through, jump-to-finally-head, break, continue. Each rule
    /// walks with a fresh visited set seeded with the goto itself, so
    /// the walker never traverses the node about to be rewritten, and
    /// every simulated path starts inside the goto's own try nesting.
    pub(crate) fn try_simplify_goto(
        &self,
        arena: &mut NodeArena,
        goto: NodeId,
    ) -> Result<bool, FlowError> {
        let mut visited = FxHashSet::default();

        let Some(target) = self.enter(arena, goto, &mut visited)? else {
            return Ok(false);
        };

        let mut visited = FxHashSet::default();
        visited.insert(goto);

        if self.exit(arena, goto, &mut visited)? == Some(target) {
            let e = arena.expr_mut(goto);
            e.code = AstCode::Nop;
            e.operand = Operand::None;
            let ranges = std::mem::take(&mut e.ranges);
            if let AstNode::Expression(successor) = arena.get_mut(target) {
                successor.ranges.extend(ranges);
            }
            return Ok(true);
        }

        // Jumping to the head of an enclosing finally block is the same
        // as falling off the end of the try: control reaches the finally
        // either way.
        let mut visited = FxHashSet::default();
        visited.insert(goto);

        let finally_blocks: Vec<NodeId> = self
            .try_ancestors(arena, goto)
            .filter_map(|tc| match arena.get(tc) {
                AstNode::TryCatch(t) => t.finally_block,
                _ => None,
            })
            .collect();

        for finally_block in finally_blocks {
            if self.enter(arena, finally_block, &mut visited)? == Some(target) {
                let e = arena.expr_mut(goto);
                e.code = AstCode::Nop;
                e.operand = Operand::None;
                e.ranges.clear();
                return Ok(true);
            }
        }

        let break_block = self
            .ancestors(goto)
            .find(|&n| matches!(arena.get(n), AstNode::Loop(_) | AstNode::Switch(_)));

        let mut visited = FxHashSet::default();
        visited.insert(goto);

        if let Some(break_block) = break_block {
            if self.exit(arena, break_block, &mut visited)? == Some(target) {
                let e = arena.expr_mut(goto);
                e.code = AstCode::LoopOrSwitchBreak;
                e.operand = Operand::None;
                return Ok(true);
            }
        }

        let continue_block = self
            .ancestors(goto)
            .find(|&n| matches!(arena.get(n), AstNode::Loop(_)));

        let mut visited = FxHashSet::default();
        visited.insert(goto);

        if let Some(continue_block) = continue_block {
            if self.enter(arena, continue_block, &mut visited)? == Some(target) {
                let e = arena.expr_mut(goto);
                e.code = AstCode::LoopContinue;
                e.operand = Operand::None;
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// The first node that would execute when control arrives at `node`.
    ///
    /// Pure with respect to the tree. `visited` breaks cycles: a repeated
    /// entry means the walk ran into an infinite goto cycle, which
    /// resolves to None.
    fn enter(
        &self,
        arena: &NodeArena,
        node: NodeId,
        visited: &mut FxHashSet<NodeId>,
    ) -> Result<Option<NodeId>, FlowError> {
        if !visited.insert(node) {
            // Infinite loop.
            return Ok(None);
        }

        match arena.get(node) {
            // Labels are transparent markers.
            AstNode::Label(_) => self.exit(arena, node, visited),

            AstNode::Expression(e) => match e.code {
                AstCode::Goto => match e.operand {
                    Operand::Label(target) => self.enter_goto(arena, node, target, visited),
                    _ => Err(FlowError::UnsupportedNode(node)),
                },
                _ => Ok(Some(node)),
            },

            AstNode::Block(block) => {
                if let Some(entry_goto) = block.entry_goto {
                    self.enter(arena, entry_goto, visited)
                } else if let Some(&first) = block.body.first() {
                    self.enter(arena, first, visited)
                } else {
                    self.exit(arena, node, visited)
                }
            }

            AstNode::Case(case) => {
                if let Some(&first) = case.body.first() {
                    self.enter(arena, first, visited)
                } else {
                    self.exit(arena, node, visited)
                }
            }

            AstNode::Condition(condition) => Ok(Some(condition.condition)),

            AstNode::Loop(l) => match l.condition {
                Some(condition) => Ok(Some(condition)),
                None => self.enter(arena, l.body, visited),
            },

            // Opaque from the outside: a jump cannot enter a protected
            // region, so arriving here means arriving at the region head.
            AstNode::TryCatch(_) => Ok(Some(node)),

            AstNode::Switch(switch) => Ok(Some(switch.condition)),
        }
    }

    /// Resolve a goto's target, refusing to enter a try region sideways.
    ///
    /// Control may only ever enter a try region at its head; a jump from
    /// outside to anywhere else would reach the body with a different
    /// stack of tried frames than the one the finally lowering assumed.
    fn enter_goto(
        &self,
        arena: &NodeArena,
        goto: NodeId,
        target: NodeId,
        visited: &mut FxHashSet<NodeId>,
    ) -> Result<Option<NodeId>, FlowError> {
        // Early exit: same try region on both ends.
        if self.try_ancestors(arena, goto).next() == self.try_ancestors(arena, target).next() {
            return self.enter(arena, target, visited);
        }

        let mut source_chain: Vec<NodeId> = self.try_ancestors(arena, goto).collect();
        let mut target_chain: Vec<NodeId> = self.try_ancestors(arena, target).collect();

        source_chain.reverse();
        target_chain.reverse();

        // Skip the try regions the goto is already inside.
        let mut common = 0;
        while common < source_chain.len()
            && common < target_chain.len()
            && source_chain[common] == target_chain[common]
        {
            common += 1;
        }

        if common == target_chain.len() {
            // The target is only inside try regions the source is in too.
            return self.enter(arena, target, visited);
        }

        let target_try = target_chain[common];

        // The jump enters `target_try` from outside. Permissible only if
        // the label sits at the entry position of the try body; descend
        // through nested trys, skipping nops, stopping at the first real
        // statement.
        let mut current = Some(target_try);

        while let Some(try_catch) = current {
            current = None;

            let AstNode::TryCatch(t) = arena.get(try_catch) else {
                break;
            };

            for &n in &arena.block(t.try_block).body {
                match arena.get(n) {
                    AstNode::Label(_) => {
                        if n == target {
                            return Ok(Some(target_try));
                        }
                    }
                    AstNode::Expression(e) if e.code == AstCode::Nop => {}
                    AstNode::TryCatch(_) => {
                        current = Some(n);
                        break;
                    }
                    _ => break,
                }
            }
        }

        Ok(None)
    }

    /// The next node executed after `node` completes.
    fn exit(
        &self,
        arena: &NodeArena,
        node: NodeId,
        visited: &mut FxHashSet<NodeId>,
    ) -> Result<Option<NodeId>, FlowError> {
        let Some(parent) = self.parent_of(node) else {
            // Exited the method body.
            return Ok(None);
        };

        match arena.get(parent) {
            AstNode::Block(_) | AstNode::Case(_) => {
                match self.next_sibling.get(&node).copied().flatten() {
                    Some(next) => self.enter(arena, next, visited),
                    None => self.exit(arena, parent, visited),
                }
            }

            // Both arms converge after the condition.
            AstNode::Condition(_) => self.exit(arena, parent, visited),

            // Finally blocks are ignored here. Try regions cannot be
            // entered sideways, so a walk leaving one has executed its
            // finally no matter which path it took.
            AstNode::TryCatch(_) => self.exit(arena, parent, visited),

            // Falling off the end of a case is not permitted; it must be
            // broken explicitly.
            AstNode::Switch(_) => Ok(None),

            // Iterate: re-enter the loop head.
            AstNode::Loop(_) => self.enter(arena, parent, visited),

            AstNode::Expression(_) | AstNode::Label(_) => Err(FlowError::UnsupportedNode(parent)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use girder_ast::expr::{Expression, OffsetRange};
    use girder_ast::node::{Block, Case, Condition, Label, Loop, Switch, TryCatch};

    fn expr(arena: &mut NodeArena, code: AstCode) -> NodeId {
        arena.alloc(AstNode::Expression(Expression::new(code, Operand::None)))
    }

    fn goto(arena: &mut NodeArena, label: NodeId) -> NodeId {
        arena.alloc(AstNode::Expression(Expression::new(
            AstCode::Goto,
            Operand::Label(label),
        )))
    }

    fn label(arena: &mut NodeArena, name: &str) -> NodeId {
        arena.alloc(AstNode::Label(Label {
            name: name.to_string(),
        }))
    }

    fn block(arena: &mut NodeArena, body: Vec<NodeId>) -> NodeId {
        arena.alloc(AstNode::Block(Block {
            entry_goto: None,
            body,
        }))
    }

    fn dump(arena: &NodeArena, node: NodeId) -> String {
        match arena.get(node) {
            AstNode::Block(b) => {
                let body: Vec<String> = b.body.iter().map(|&n| dump(arena, n)).collect();
                format!("[{}]", body.join(" "))
            }
            AstNode::Expression(e) => format!("{:?}", e.code),
            AstNode::Label(l) => format!("{}:", l.name),
            AstNode::Condition(c) => format!(
                "if({}){}else{}",
                dump(arena, c.condition),
                dump(arena, c.then_block),
                dump(arena, c.else_block)
            ),
            AstNode::Loop(l) => match l.condition {
                Some(condition) => {
                    format!("while({}){}", dump(arena, condition), dump(arena, l.body))
                }
                None => format!("loop{}", dump(arena, l.body)),
            },
            AstNode::Switch(s) => {
                let cases: Vec<String> = s.cases.iter().map(|&c| dump(arena, c)).collect();
                format!("switch({}){{{}}}", dump(arena, s.condition), cases.join(" "))
            }
            AstNode::Case(c) => {
                let body: Vec<String> = c.body.iter().map(|&n| dump(arena, n)).collect();
                format!("case{:?}[{}]", c.values, body.join(" "))
            }
            AstNode::TryCatch(t) => {
                let mut out = format!("try{}", dump(arena, t.try_block));
                for &handler in &t.catch_handlers {
                    out.push_str(&format!("catch{}", dump(arena, handler)));
                }
                if let Some(finally_block) = t.finally_block {
                    out.push_str(&format!("finally{}", dump(arena, finally_block)));
                }
                out
            }
        }
    }

    #[test]
    fn test_goto_to_next_statement_folds_away() {
        let mut arena = NodeArena::new();
        let l0 = label(&mut arena, "L0");
        let g = goto(&mut arena, l0);
        let a = expr(&mut arena, AstCode::Store);
        let method = block(&mut arena, vec![g, l0, a]);

        remove_gotos(&mut arena, method).unwrap();

        assert_eq!(arena.block(method).body, vec![a]);
    }

    #[test]
    fn test_folded_goto_ranges_move_to_target() {
        let mut arena = NodeArena::new();
        let l0 = label(&mut arena, "L0");
        let g = goto(&mut arena, l0);
        let a = expr(&mut arena, AstCode::Store);
        arena.expr_mut(g).ranges.push(OffsetRange { start: 4, end: 7 });
        arena.expr_mut(a).ranges.push(OffsetRange { start: 8, end: 10 });
        let method = block(&mut arena, vec![g, l0, a]);

        remove_gotos(&mut arena, method).unwrap();

        assert_eq!(
            arena.expr(a).ranges,
            vec![
                OffsetRange { start: 8, end: 10 },
                OffsetRange { start: 4, end: 7 }
            ]
        );
    }

    #[test]
    fn test_goto_out_of_loop_becomes_break() {
        let mut arena = NodeArena::new();
        let l1 = label(&mut arena, "L1");
        let g = goto(&mut arena, l1);
        let cond_value = expr(&mut arena, AstCode::Load);
        let then_block = block(&mut arena, vec![g]);
        let else_block = block(&mut arena, vec![]);
        let cond = arena.alloc(AstNode::Condition(Condition {
            condition: cond_value,
            then_block,
            else_block,
        }));
        let a = expr(&mut arena, AstCode::Store);
        let loop_body = block(&mut arena, vec![cond, a]);
        let lp = arena.alloc(AstNode::Loop(Loop {
            condition: None,
            body: loop_body,
        }));
        let b = expr(&mut arena, AstCode::InvokeVirtual);
        let method = block(&mut arena, vec![lp, l1, b]);

        remove_gotos(&mut arena, method).unwrap();

        assert_eq!(arena.expr(g).code, AstCode::LoopOrSwitchBreak);
        assert_eq!(arena.expr(g).operand, Operand::None);
        // Nothing branches to L1 anymore, so it gets swept.
        assert_eq!(arena.block(method).body, vec![lp, b]);
    }

    #[test]
    fn test_goto_to_loop_head_at_body_tail_folds_away() {
        let mut arena = NodeArena::new();
        let cond_value = expr(&mut arena, AstCode::Load);
        let a = expr(&mut arena, AstCode::Store);
        let l_head = label(&mut arena, "L_head");
        let g = goto(&mut arena, l_head);
        let loop_body = block(&mut arena, vec![a, g]);
        let lp = arena.alloc(AstNode::Loop(Loop {
            condition: Some(cond_value),
            body: loop_body,
        }));
        let method = block(&mut arena, vec![l_head, lp]);

        remove_gotos(&mut arena, method).unwrap();

        // The jump restated what iteration does anyway.
        assert_eq!(arena.block(loop_body).body, vec![a]);
        assert_eq!(arena.block(method).body, vec![lp]);
    }

    #[test]
    fn test_goto_to_loop_head_inside_branch_becomes_continue() {
        let mut arena = NodeArena::new();
        let loop_cond = expr(&mut arena, AstCode::Load);
        let l_head = label(&mut arena, "L_head");
        let g = goto(&mut arena, l_head);
        let branch_cond = expr(&mut arena, AstCode::Load);
        let then_block = block(&mut arena, vec![g]);
        let else_block = block(&mut arena, vec![]);
        let cond = arena.alloc(AstNode::Condition(Condition {
            condition: branch_cond,
            then_block,
            else_block,
        }));
        let payload = expr(&mut arena, AstCode::Store);
        let loop_body = block(&mut arena, vec![cond, payload]);
        let lp = arena.alloc(AstNode::Loop(Loop {
            condition: Some(loop_cond),
            body: loop_body,
        }));
        let method = block(&mut arena, vec![l_head, lp]);

        remove_gotos(&mut arena, method).unwrap();

        assert_eq!(arena.expr(g).code, AstCode::LoopContinue);
        assert_eq!(arena.block(loop_body).body, vec![cond, payload]);
        assert_eq!(arena.block(method).body, vec![lp]);
    }

    #[test]
    fn test_goto_into_try_body_is_refused() {
        let mut arena = NodeArena::new();
        let a = expr(&mut arena, AstCode::Store);
        let l_inside = label(&mut arena, "L_inside");
        let b = expr(&mut arena, AstCode::Store);
        let try_block = block(&mut arena, vec![a, l_inside, b]);
        let handler_body = expr(&mut arena, AstCode::InvokeVirtual);
        let handler = block(&mut arena, vec![handler_body]);
        let tc = arena.alloc(AstNode::TryCatch(TryCatch {
            try_block,
            catch_handlers: vec![handler],
            finally_block: None,
        }));
        let g = goto(&mut arena, l_inside);
        let method = block(&mut arena, vec![g, tc]);

        remove_gotos(&mut arena, method).unwrap();

        // Unresolvable: the label is not at the try's entry position.
        assert_eq!(arena.expr(g).code, AstCode::Goto);
        assert_eq!(arena.block(method).body, vec![g, tc]);
        assert_eq!(arena.block(try_block).body, vec![a, l_inside, b]);
    }

    #[test]
    fn test_goto_to_try_entry_label_folds_into_fall_through() {
        let mut arena = NodeArena::new();
        let l0 = label(&mut arena, "L0");
        let a = expr(&mut arena, AstCode::Store);
        let try_block = block(&mut arena, vec![l0, a]);
        let handler_body = expr(&mut arena, AstCode::InvokeVirtual);
        let handler = block(&mut arena, vec![handler_body]);
        let tc = arena.alloc(AstNode::TryCatch(TryCatch {
            try_block,
            catch_handlers: vec![handler],
            finally_block: None,
        }));
        let g = goto(&mut arena, l0);
        let method = block(&mut arena, vec![g, tc]);

        remove_gotos(&mut arena, method).unwrap();

        // The jump resolves to the try region itself, which is exactly
        // where control falls next.
        assert_eq!(arena.block(method).body, vec![tc]);
        assert_eq!(arena.block(try_block).body, vec![a]);
    }

    #[test]
    fn test_goto_to_finally_head_is_dropped() {
        let mut arena = NodeArena::new();
        let a = expr(&mut arena, AstCode::Store);
        let l_finally = label(&mut arena, "L_finally");
        let g = goto(&mut arena, l_finally);
        let try_block = block(&mut arena, vec![a, g]);
        let cleanup = expr(&mut arena, AstCode::InvokeVirtual);
        let finally_block = block(&mut arena, vec![l_finally, cleanup]);
        let tc = arena.alloc(AstNode::TryCatch(TryCatch {
            try_block,
            catch_handlers: vec![],
            finally_block: Some(finally_block),
        }));
        let method = block(&mut arena, vec![tc]);

        remove_gotos(&mut arena, method).unwrap();

        // Control reaches the finally head by falling off the try end,
        // so the explicit jump is noise.
        assert_eq!(arena.block(try_block).body, vec![a]);
        assert_eq!(arena.block(finally_block).body, vec![cleanup]);
    }

    #[test]
    fn test_cyclic_goto_chain_is_left_alone() {
        let mut arena = NodeArena::new();
        let l0 = label(&mut arena, "L0");
        let l1 = label(&mut arena, "L1");
        let g0 = goto(&mut arena, l1);
        let g1 = goto(&mut arena, l0);
        let method = block(&mut arena, vec![l0, g0, l1, g1]);

        remove_gotos(&mut arena, method).unwrap();

        // The jumps chase each other forever; the walker gives up on
        // both and the sweeper keeps the labels they still reference.
        assert_eq!(arena.block(method).body, vec![l0, g0, l1, g1]);
        assert_eq!(arena.expr(g0).code, AstCode::Goto);
        assert_eq!(arena.expr(g1).code, AstCode::Goto);
    }

    #[test]
    fn test_shared_node_is_rejected() {
        let mut arena = NodeArena::new();
        let a = expr(&mut arena, AstCode::Store);
        let inner = block(&mut arena, vec![a]);
        let method = block(&mut arena, vec![a, inner]);

        assert_eq!(
            remove_gotos(&mut arena, method),
            Err(FlowError::MultiplyLinkedNode(a))
        );
    }

    #[test]
    fn test_goto_nested_in_expression_arguments_is_unsupported() {
        let mut arena = NodeArena::new();
        let l0 = label(&mut arena, "L0");
        let g = goto(&mut arena, l0);
        let mut call = Expression::new(AstCode::InvokeVirtual, Operand::None);
        call.arguments.push(g);
        let call = arena.alloc(AstNode::Expression(call));
        let a = expr(&mut arena, AstCode::Store);
        let method = block(&mut arena, vec![call, l0, a]);

        assert!(matches!(
            remove_gotos(&mut arena, method),
            Err(FlowError::UnsupportedNode(_))
        ));
    }

    #[test]
    fn test_remove_gotos_is_idempotent() {
        let mut arena = NodeArena::new();
        let l1 = label(&mut arena, "L1");
        let g = goto(&mut arena, l1);
        let cond_value = expr(&mut arena, AstCode::Load);
        let then_block = block(&mut arena, vec![g]);
        let else_block = block(&mut arena, vec![]);
        let cond = arena.alloc(AstNode::Condition(Condition {
            condition: cond_value,
            then_block,
            else_block,
        }));
        let a = expr(&mut arena, AstCode::Store);
        let loop_body = block(&mut arena, vec![cond, a]);
        let lp = arena.alloc(AstNode::Loop(Loop {
            condition: None,
            body: loop_body,
        }));
        let b = expr(&mut arena, AstCode::InvokeVirtual);
        let ret = expr(&mut arena, AstCode::Return);
        let method = block(&mut arena, vec![lp, l1, b, ret]);

        remove_gotos(&mut arena, method).unwrap();
        let first = dump(&arena, method);

        remove_gotos(&mut arena, method).unwrap();
        let second = dump(&arena, method);

        assert_eq!(first, second);
    }

    #[test]
    fn test_label_index_records_preceding_labels() {
        let mut arena = NodeArena::new();
        let l0 = label(&mut arena, "L0");
        let a = expr(&mut arena, AstCode::Store);
        let l1 = label(&mut arena, "L1");
        let b = expr(&mut arena, AstCode::Store);
        let method = block(&mut arena, vec![l0, a, l1, b]);

        let pass = GotoRemoval::build(&arena, method).unwrap();

        assert_eq!(pass.labels.get(&a), Some(&l0));
        assert_eq!(pass.labels.get(&b), Some(&l1));
        assert_eq!(pass.labels.get(&l1), None);
        assert_eq!(pass.parent_of(a), Some(method));
        assert_eq!(pass.parent_of(method), None);
        assert_eq!(pass.next_sibling.get(&l0), Some(&Some(a)));
        assert_eq!(pass.next_sibling.get(&b), Some(&None));
    }

    #[test]
    fn test_switch_case_goto_past_switch_becomes_break() {
        let mut arena = NodeArena::new();
        let l_end = label(&mut arena, "L_end");
        let selector = expr(&mut arena, AstCode::Load);
        let a = expr(&mut arena, AstCode::Store);
        let g = goto(&mut arena, l_end);
        let case1 = arena.alloc(AstNode::Case(Case {
            values: vec![1],
            body: vec![a, g],
        }));
        let b = expr(&mut arena, AstCode::Store);
        let default_case = arena.alloc(AstNode::Case(Case {
            values: vec![],
            body: vec![b],
        }));
        let sw = arena.alloc(AstNode::Switch(Switch {
            condition: selector,
            cases: vec![case1, default_case],
        }));
        let after = expr(&mut arena, AstCode::InvokeVirtual);
        let method = block(&mut arena, vec![sw, l_end, after]);

        remove_gotos(&mut arena, method).unwrap();

        assert_eq!(arena.expr(g).code, AstCode::LoopOrSwitchBreak);
        assert_eq!(arena.block(method).body, vec![sw, after]);
    }
}
