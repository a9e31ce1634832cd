//! Command error handling
//!
//! Every command either returns a value or one `CommandError`. The variants
//! map onto distinct recovery postures:
//!
//! - `Parse`: an operand is not a valid number; the operand is unchanged
//! - `OutOfMemory` / `FoldOutOfMemory`: a primitive hit the allocation
//!   ceiling, inside `**`/`rand` or inside a variadic fold
//! - `InvalidArgument`: a valid number violates a precondition
//! - `WrongNumArgs` / `Usage`: rejected before any arithmetic runs
//! - `Internal`: an invariant was broken inside the runtime itself
//!
//! # Usage
//!
//! ```ignore
//! match interp.invoke("**", &mut args) {
//!     Ok(value) => println!("{}", value),
//!     Err(e) if e.kind() == ErrorKind::Usage => eprintln!("usage: {}", e),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use bignum_core::{ArithError, ValueError};
use std::fmt;

/// Coarse classification of a `CommandError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    OutOfMemory,
    InvalidArgument,
    Usage,
    Internal,
}

/// Error returned by a command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Operand text is not a number; carries the full user-facing message
    Parse(String),
    /// A primitive hit the allocation ceiling
    OutOfMemory,
    /// Same, inside one of the variadic arithmetic folds
    FoldOutOfMemory,
    /// A numeric precondition failed (negative exponent, zero divisor)
    InvalidArgument(String),
    /// Wrong operand count
    WrongNumArgs {
        command: String,
        usage: &'static str,
    },
    /// Malformed non-numeric argument
    Usage(String),
    /// No command registered under this name
    UnknownCommand(String),
    /// Broken runtime invariant (shared value mutated in place)
    Internal(String),
}

impl CommandError {
    pub fn wrong_args(command: &str, usage: &'static str) -> Self {
        CommandError::WrongNumArgs {
            command: command.to_string(),
            usage,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::Parse(_) => ErrorKind::Parse,
            CommandError::OutOfMemory | CommandError::FoldOutOfMemory => ErrorKind::OutOfMemory,
            CommandError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CommandError::WrongNumArgs { .. }
            | CommandError::Usage(_)
            | CommandError::UnknownCommand(_) => ErrorKind::Usage,
            CommandError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Parse(msg) => write!(f, "{}", msg),
            CommandError::OutOfMemory => write!(f, "Out of memory"),
            CommandError::FoldOutOfMemory => write!(f, "Out of memory doing multiprecision math"),
            CommandError::InvalidArgument(msg) => write!(f, "{}", msg),
            CommandError::WrongNumArgs { command, usage } if usage.is_empty() => {
                write!(f, "wrong # args: should be \"{}\"", command)
            }
            CommandError::WrongNumArgs { command, usage } => {
                write!(f, "wrong # args: should be \"{} {}\"", command, usage)
            }
            CommandError::Usage(msg) => write!(f, "{}", msg),
            CommandError::UnknownCommand(name) => write!(f, "invalid command name \"{}\"", name),
            CommandError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ValueError> for CommandError {
    fn from(e: ValueError) -> Self {
        match e {
            ValueError::Parse { .. } => CommandError::Parse(e.to_string()),
            ValueError::OutOfMemory => CommandError::OutOfMemory,
            ValueError::SharedMutation => CommandError::Internal(e.to_string()),
        }
    }
}

impl From<ArithError> for CommandError {
    fn from(e: ArithError) -> Self {
        match e {
            ArithError::OutOfMemory => CommandError::OutOfMemory,
            ArithError::InvalidArgument(msg) => CommandError::InvalidArgument(msg.to_string()),
        }
    }
}
