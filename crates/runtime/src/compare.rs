//! Relational commands: `>`, `>=`, `<`, `<=`, `==`, `!=`
//!
//! Each takes exactly two operands, compares them once, and yields 1 when the
//! relation holds and 0 otherwise.

use crate::error::CommandError;
use bignum_core::{Arith, BigInt, BigValue};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CmpOp {
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Ge => ordering != Ordering::Less,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Ne => ordering != Ordering::Equal,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }
}

/// Compare two operands; arity is checked before either is converted
pub fn compare(
    arith: &Arith,
    op: CmpOp,
    operands: &mut [BigValue],
) -> Result<BigInt, CommandError> {
    let [a, b] = operands else {
        return Err(CommandError::wrong_args(op.symbol(), "bignum bignum"));
    };
    let a = a.get_typed()?;
    let b = b.get_typed()?;
    let ordering = arith.cmp(a, b);
    Ok(BigInt::from(u8::from(op.holds(ordering))))
}
