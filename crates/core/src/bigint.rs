//! The arbitrary-precision integer type
//!
//! Canonical text is base 10 with an optional leading `-` and no leading
//! zeros. Parsing additionally accepts the usual integer literal prefixes:
//!
//! | prefix        | base |
//! |---------------|------|
//! | `0x` / `0X`   | 16   |
//! | `0b` / `0B`   | 2    |
//! | `0` + digits  | 8    |
//! | none          | 10   |
//!
//! A `-` may precede the prefix. Whitespace, `+`, `_` separators and empty
//! digit strings are rejected.

use crate::error::ValueError;
use crate::objtype::ObjType;
use crate::value::Value;
use num_bigint::{BigInt, BigUint, Sign};

/// Type descriptor for `num_bigint::BigInt` values
#[derive(Debug, Clone, Copy)]
pub struct BigIntType;

/// Handle to a value cell holding (or convertible to) a big integer
pub type BigValue = Value<BigIntType>;

impl ObjType for BigIntType {
    type Internal = BigInt;
    const NAME: &'static str = "bignum";

    fn set_from_any(text: &str) -> Result<BigInt, ValueError> {
        parse_integer(text).ok_or_else(|| ValueError::Parse {
            text: text.to_string(),
            message: format!(
                "Invalid big number: \"{}\" must be a relative integer number",
                text
            ),
        })
    }

    fn update_string(rep: &BigInt) -> String {
        rep.to_str_radix(10)
    }

    fn dup(rep: &BigInt) -> Result<BigInt, ValueError> {
        Ok(rep.clone())
    }
}

/// Parse integer text, auto-detecting the base from its prefix
pub fn parse_integer(text: &str) -> Option<BigInt> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, text),
    };
    let (radix, digits) = split_radix(body);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix)?;
    // from_biguint normalizes -0 to zero
    Some(BigInt::from_biguint(sign, magnitude))
}

fn split_radix(body: &str) -> (u32, &str) {
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, bin)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    }
}
