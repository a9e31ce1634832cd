//! Variadic arithmetic and power
//!
//! # Fold policy
//!
//! `+` and `*` fold their seed (0 and 1) against every operand. `-`, `/` and
//! `%` instead let the first operand seed the accumulator and fold the rest:
//!
//! | command | no operands | `[a]` | `[a, b, c]`       |
//! |---------|-------------|-------|-------------------|
//! | `+`     | 0           | a     | 0 + a + b + c     |
//! | `*`     | 1           | a     | 1 * a * b * c     |
//! | `-`     | 0           | -a    | a - b - c         |
//! | `/`     | 1           | a     | a / b / c         |
//! | `%`     | 0           | a     | a % b % c         |
//!
//! Unary `-` flips the sign of a copy instead of subtracting from zero.
//! Division truncates toward zero and `%` is the matching remainder.
//!
//! Any operand that fails to parse, or any primitive failure, aborts the
//! whole fold; the partial accumulator is dropped. Running out of memory
//! inside a fold reports `FoldOutOfMemory`, while `**` reports the plain
//! `OutOfMemory`.

use crate::error::CommandError;
use bignum_core::{Arith, BigInt, BigValue};
use num_traits::{One, Zero};

/// Operator for a variadic fold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl FoldOp {
    /// Accumulator value before any operand is applied
    pub fn seed(self) -> BigInt {
        match self {
            FoldOp::Add | FoldOp::Sub | FoldOp::Mod => BigInt::zero(),
            FoldOp::Mul | FoldOp::Div => BigInt::one(),
        }
    }

    /// Whether the first operand replaces the seed instead of folding into it
    pub fn first_operand_seeds(self) -> bool {
        matches!(self, FoldOp::Sub | FoldOp::Div | FoldOp::Mod)
    }

    fn apply(self, arith: &Arith, acc: &mut BigInt, operand: &BigInt) -> Result<(), CommandError> {
        match self {
            FoldOp::Add => arith.add(acc, operand)?,
            FoldOp::Sub => arith.sub(acc, operand)?,
            FoldOp::Mul => arith.mul(acc, operand)?,
            FoldOp::Div => arith.tdiv_q(acc, operand)?,
            FoldOp::Mod => arith.tdiv_r(acc, operand)?,
        }
        Ok(())
    }
}

/// Fold `op` over the operands left to right
pub fn fold(
    arith: &Arith,
    op: FoldOp,
    operands: &mut [BigValue],
) -> Result<BigInt, CommandError> {
    fold_operands(arith, op, operands).map_err(|e| match e {
        CommandError::OutOfMemory => CommandError::FoldOutOfMemory,
        other => other,
    })
}

fn fold_operands(
    arith: &Arith,
    op: FoldOp,
    operands: &mut [BigValue],
) -> Result<BigInt, CommandError> {
    let mut acc = op.seed();
    let mut skip = 0;

    if op.first_operand_seeds()
        && let Some(first) = operands.first_mut()
    {
        acc = arith.copy(first.get_typed()?)?;
        if op == FoldOp::Sub && operands.len() == 1 {
            acc = -acc;
        }
        skip = 1;
    }

    for operand in &mut operands[skip..] {
        op.apply(arith, &mut acc, operand.get_typed()?)?;
    }
    Ok(acc)
}

/// `** base exponent ?modulus?`
pub fn power(arith: &Arith, operands: &mut [BigValue]) -> Result<BigInt, CommandError> {
    match operands {
        [base, exponent] => {
            let base = base.get_typed()?;
            let exponent = exponent.get_typed()?;
            Ok(arith.pow(base, exponent)?)
        }
        [base, exponent, modulus] => {
            let base = base.get_typed()?;
            let exponent = exponent.get_typed()?;
            let modulus = modulus.get_typed()?;
            Ok(arith.powm(base, exponent, modulus)?)
        }
        _ => Err(CommandError::wrong_args("**", "base exponent ?modulo?")),
    }
}
