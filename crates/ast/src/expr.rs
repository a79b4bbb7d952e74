use crate::arena::NodeId;
use crate::code::AstCode;

/// A bytecode offset range `[start, end)` an expression was lifted from.
///
/// Expressions carry a set of these; when a rewrite folds one expression
/// into another, the survivor absorbs the ranges of the absorbed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    pub start: u32,
    pub end: u32,
}

/// A constant-pool value carried by a `LoadConstant` expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

/// A field reference, `declaring_type.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    /// Internal name of the declaring type, e.g. `java/lang/Double`.
    pub declaring_type: String,
    pub name: String,
}

/// Operand of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    /// Branch target (`Goto`, `IfTrue`).
    Label(NodeId),
    /// Multi-way branch targets (`Switch`).
    Labels(Vec<NodeId>),
    /// Local variable slot (`Load`, `Store`).
    Slot(u16),
    /// Constant-pool value (`LoadConstant`).
    Constant(ConstantValue),
    /// Field reference (`GetStatic`).
    Field(FieldReference),
}

/// An expression: an opcode, an operand, argument expressions, and the
/// bytecode ranges it covers.
#[derive(Debug, Clone)]
pub struct Expression {
    pub code: AstCode,
    pub operand: Operand,
    pub arguments: Vec<NodeId>,
    pub ranges: Vec<OffsetRange>,
}

impl Expression {
    pub fn new(code: AstCode, operand: Operand) -> Self {
        Self {
            code,
            operand,
            arguments: Vec::new(),
            ranges: Vec::new(),
        }
    }

    /// Whether this expression carries branch targets.
    pub fn is_branch(&self) -> bool {
        matches!(self.operand, Operand::Label(_) | Operand::Labels(_))
    }

    /// The labels this expression may branch to. Empty for non-branches.
    pub fn branch_targets(&self) -> Vec<NodeId> {
        match &self.operand {
            Operand::Label(label) => vec![*label],
            Operand::Labels(labels) => labels.clone(),
            _ => Vec::new(),
        }
    }
}
