//! Bignum Runtime: variadic big-integer commands for an embedding interpreter
//!
//! Key design principles:
//! - Operands arrive as value handles; the runtime converts them lazily and
//!   never writes through a shared handle
//! - Every command yields a fresh big integer (or nothing, for `srand`),
//!   stored in the interpreter's result handle
//! - Failures are `CommandError`s carrying the message shown to users
//!
//! # Commands
//!
//! | name                       | operands                 |
//! |----------------------------|--------------------------|
//! | `+ - * / %`                | any number               |
//! | `> >= < <= == !=`          | exactly two              |
//! | `**`                       | base exponent ?modulo?   |
//! | `rand`                     | ?atoms?                  |
//! | `srand`                    | seed-string              |

pub mod arithmetic;
pub mod compare;
pub mod config;
pub mod error;
pub mod interp;
pub mod random;

pub use arithmetic::{FoldOp, fold, power};
pub use compare::{CmpOp, compare};
pub use config::RuntimeConfig;
pub use error::{CommandError, ErrorKind};
pub use interp::{COMMANDS, Command, Interp};
pub use random::RandomSource;

// Handle types, so hosts need only this crate
pub use bignum_core::{BigInt, BigValue};
