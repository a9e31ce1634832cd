//! Bignum Core: dual-representation values for an embedding interpreter
//!
//! This crate provides the value model that the command layer builds on:
//!
//! - Value cells: a text form and a cached typed form of one logical value,
//!   converted lazily and kept consistent
//! - Handles: reference-counted, copy-on-write access to cells
//! - Type descriptors: the parse/format/dup/free hooks for a typed form
//! - The big-integer type and its failure-reporting primitives
//!
//! # Modules
//!
//! - `value`: `ValueCell` and the `Value` handle
//! - `objtype`: the `ObjType` descriptor trait
//! - `bigint`: the `BigIntType` descriptor and integer text parsing
//! - `arith`: arbitrary-precision primitives with an allocation ceiling
//! - `error`: `ValueError` and `ArithError`

pub mod arith;
pub mod bigint;
pub mod error;
pub mod objtype;
pub mod value;

pub use arith::{ATOM_BITS, Arith, DEFAULT_MAX_BITS};
pub use bigint::{BigIntType, BigValue, parse_integer};
pub use error::{ArithError, ValueError};
pub use objtype::ObjType;
pub use value::{RepState, Value, ValueCell};

// The typed representation, re-exported so downstream crates agree on versions
pub use num_bigint::BigInt;
