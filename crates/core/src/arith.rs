//! Arbitrary-precision primitives with explicit failure
//!
//! Thin wrapper over `num-bigint` that turns every operation into one that
//! reports failure instead of aborting. The allocator is modelled by a bit
//! ceiling: an operation whose result could exceed `max_bits` fails with
//! `ArithError::OutOfMemory` before anything is allocated. The size checks
//! are upper bounds, so an operation near the ceiling may be refused even if
//! its exact result would have fit.
//!
//! Mutating operations take the accumulator by `&mut` and leave it unchanged
//! on failure.

use crate::error::ArithError;
use num_bigint::{BigInt, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::Rng;
use std::cmp::Ordering;

/// Bits per random atom
pub const ATOM_BITS: u64 = 32;

/// Default result ceiling: 16 Mi bits (2 MiB of magnitude)
pub const DEFAULT_MAX_BITS: u64 = 1 << 24;

const NEGATIVE_EXPONENT: &str = "Negative exponent";
const DIVISION_BY_ZERO: &str = "Division by zero";

/// Primitive operations bound to an allocation ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arith {
    max_bits: u64,
}

impl Default for Arith {
    fn default() -> Self {
        Arith::new(DEFAULT_MAX_BITS)
    }
}

impl Arith {
    pub fn new(max_bits: u64) -> Self {
        Arith { max_bits }
    }

    pub fn max_bits(&self) -> u64 {
        self.max_bits
    }

    fn reserve(&self, bits: u64) -> Result<(), ArithError> {
        if bits > self.max_bits {
            Err(ArithError::OutOfMemory)
        } else {
            Ok(())
        }
    }

    /// Copy a value into a fresh accumulator
    pub fn copy(&self, value: &BigInt) -> Result<BigInt, ArithError> {
        self.reserve(value.bits())?;
        Ok(value.clone())
    }

    pub fn add(&self, acc: &mut BigInt, value: &BigInt) -> Result<(), ArithError> {
        self.reserve(acc.bits().max(value.bits()) + 1)?;
        *acc += value;
        Ok(())
    }

    pub fn sub(&self, acc: &mut BigInt, value: &BigInt) -> Result<(), ArithError> {
        self.reserve(acc.bits().max(value.bits()) + 1)?;
        *acc -= value;
        Ok(())
    }

    pub fn mul(&self, acc: &mut BigInt, value: &BigInt) -> Result<(), ArithError> {
        self.reserve(acc.bits() + value.bits())?;
        *acc *= value;
        Ok(())
    }

    /// Quotient truncated toward zero
    pub fn tdiv_q(&self, acc: &mut BigInt, divisor: &BigInt) -> Result<(), ArithError> {
        if divisor.is_zero() {
            return Err(ArithError::InvalidArgument(DIVISION_BY_ZERO));
        }
        *acc = &*acc / divisor;
        Ok(())
    }

    /// Remainder matching `tdiv_q`: takes the sign of the dividend
    pub fn tdiv_r(&self, acc: &mut BigInt, divisor: &BigInt) -> Result<(), ArithError> {
        if divisor.is_zero() {
            return Err(ArithError::InvalidArgument(DIVISION_BY_ZERO));
        }
        *acc = &*acc % divisor;
        Ok(())
    }

    /// Unbounded power. `pow(x, 0) == 1` for every `x`, including zero.
    pub fn pow(&self, base: &BigInt, exponent: &BigInt) -> Result<BigInt, ArithError> {
        if exponent.is_negative() {
            return Err(ArithError::InvalidArgument(NEGATIVE_EXPONENT));
        }
        if exponent.is_zero() {
            return Ok(BigInt::one());
        }
        if base.is_zero() {
            return Ok(BigInt::zero());
        }
        if base.magnitude().is_one() {
            // ±1 never grows, whatever the exponent
            return Ok(if base.is_negative() && exponent.is_odd() {
                -BigInt::one()
            } else {
                BigInt::one()
            });
        }
        let exp = exponent.to_u32().ok_or(ArithError::OutOfMemory)?;
        let bits = base
            .bits()
            .checked_mul(u64::from(exp))
            .ok_or(ArithError::OutOfMemory)?;
        self.reserve(bits)?;
        Ok(base.pow(exp))
    }

    /// Modular power, reduced the same way as `tdiv_r`: the result takes the
    /// sign of `base^exponent` and its magnitude is below `|modulus|`
    pub fn powm(
        &self,
        base: &BigInt,
        exponent: &BigInt,
        modulus: &BigInt,
    ) -> Result<BigInt, ArithError> {
        if exponent.is_negative() {
            return Err(ArithError::InvalidArgument(NEGATIVE_EXPONENT));
        }
        if modulus.is_zero() {
            return Err(ArithError::InvalidArgument(DIVISION_BY_ZERO));
        }
        self.reserve(modulus.bits().max(base.bits()))?;
        let magnitude = base
            .magnitude()
            .modpow(exponent.magnitude(), modulus.magnitude());
        let sign = if base.is_negative() && exponent.is_odd() {
            Sign::Minus
        } else {
            Sign::Plus
        };
        Ok(BigInt::from_biguint(sign, magnitude))
    }

    /// Three-way comparison, sign first then magnitude
    pub fn cmp(&self, a: &BigInt, b: &BigInt) -> Ordering {
        a.cmp(b)
    }

    /// Uniform random value in `[0, 2^(32 * atoms))`
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R, atoms: u64) -> Result<BigInt, ArithError> {
        let bits = atoms
            .checked_mul(ATOM_BITS)
            .ok_or(ArithError::OutOfMemory)?;
        self.reserve(bits)?;
        Ok(BigInt::from(rng.gen_biguint(bits)))
    }
}
