//! Named-constant recovery.
//!
//! A load of a distinguished primitive limit reads much better as the
//! well-known field it came from: `Double.POSITIVE_INFINITY` instead of
//! a raw bit pattern the pretty-printer cannot even round-trip. Rewrites
//! such loads into static field references, in place; node identity and
//! ranges are preserved.

use girder_ast::arena::{NodeArena, NodeId};
use girder_ast::code::AstCode;
use girder_ast::expr::{ConstantValue, FieldReference, Operand};
use girder_ast::node::AstNode;

/// Rewrite `LoadConstant` expressions holding well-known primitive
/// limits into `GetStatic` references to the fields defining them.
pub fn insert_constant_references(arena: &mut NodeArena, method: NodeId) {
    for node in arena.self_and_descendants(method) {
        let value = match arena.get(node) {
            AstNode::Expression(e) if e.code == AstCode::LoadConstant => match e.operand {
                Operand::Constant(value) => value,
                _ => continue,
            },
            _ => continue,
        };

        let Some((declaring_type, name)) = well_known_field(value) else {
            continue;
        };

        let e = arena.expr_mut(node);
        e.code = AstCode::GetStatic;
        e.operand = Operand::Field(FieldReference {
            declaring_type: declaring_type.to_string(),
            name: name.to_string(),
        });
    }
}

/// The `java/lang` field a constant is a verbatim copy of, if any.
///
/// Short and byte limits have no counterpart here: by the time they
/// reach the constant pool they are plain ints.
fn well_known_field(value: ConstantValue) -> Option<(&'static str, &'static str)> {
    match value {
        ConstantValue::Double(d) => {
            let owner = "java/lang/Double";
            if d == f64::INFINITY {
                Some((owner, "POSITIVE_INFINITY"))
            } else if d == f64::NEG_INFINITY {
                Some((owner, "NEGATIVE_INFINITY"))
            } else if d.is_nan() {
                Some((owner, "NaN"))
            } else if d.to_bits() == 1 {
                // Smallest positive subnormal, Double.MIN_VALUE.
                Some((owner, "MIN_VALUE"))
            } else if d == f64::MAX {
                Some((owner, "MAX_VALUE"))
            } else if d == f64::MIN_POSITIVE {
                Some((owner, "MIN_NORMAL"))
            } else {
                None
            }
        }
        ConstantValue::Float(f) => {
            let owner = "java/lang/Float";
            if f == f32::INFINITY {
                Some((owner, "POSITIVE_INFINITY"))
            } else if f == f32::NEG_INFINITY {
                Some((owner, "NEGATIVE_INFINITY"))
            } else if f.is_nan() {
                Some((owner, "NaN"))
            } else if f.to_bits() == 1 {
                Some((owner, "MIN_VALUE"))
            } else if f == f32::MAX {
                Some((owner, "MAX_VALUE"))
            } else if f == f32::MIN_POSITIVE {
                Some((owner, "MIN_NORMAL"))
            } else {
                None
            }
        }
        ConstantValue::Long(l) => {
            let owner = "java/lang/Long";
            if l == i64::MIN {
                Some((owner, "MIN_VALUE"))
            } else if l == i64::MAX {
                Some((owner, "MAX_VALUE"))
            } else {
                None
            }
        }
        ConstantValue::Integer(i) => {
            let owner = "java/lang/Integer";
            if i == i32::MIN {
                Some((owner, "MIN_VALUE"))
            } else if i == i32::MAX {
                Some((owner, "MAX_VALUE"))
            } else {
                None
            }
        }
    }
}
