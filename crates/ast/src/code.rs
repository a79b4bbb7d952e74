/// Opcodes of the bytecode-level AST.
///
/// Most of the instruction set is opaque to the flow passes; this enum
/// carries the synthetic control-flow codes the passes rewrite plus the
/// handful of real codes they and the peephole transforms touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstCode {
    /// No operation. What a goto folds into when it matches fall-through.
    Nop,
    /// Exit a protected region. Scaffolding from exception-table lowering.
    Leave,
    /// Synthetic unconditional jump to a label.
    Goto,
    /// Conditional branch, taken when the argument is true.
    IfTrue,
    /// Multi-way branch over label targets (tableswitch/lookupswitch).
    Switch,
    /// Return from the method, optionally with an argument.
    Return,
    /// Throw the argument.
    Throw,
    /// Push a constant-pool value.
    LoadConstant,
    /// Read a local slot.
    Load,
    /// Write a local slot.
    Store,
    /// Invoke an instance method.
    InvokeVirtual,
    /// Read a static field.
    GetStatic,
    /// Structured break out of the innermost loop or switch.
    LoopOrSwitchBreak,
    /// Structured continue of the innermost loop.
    LoopContinue,
}

impl AstCode {
    /// Whether an expression with this code transfers control and never
    /// falls through to its textual successor.
    pub fn is_unconditional_control_flow(self) -> bool {
        matches!(
            self,
            AstCode::Goto
                | AstCode::Switch
                | AstCode::Return
                | AstCode::Throw
                | AstCode::Leave
                | AstCode::LoopOrSwitchBreak
                | AstCode::LoopContinue
        )
    }
}
