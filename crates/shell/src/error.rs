//! Error types for the shell
//!
//! Runtime command failures pass through unchanged; the shell adds its own
//! failures for variables, syntax, I/O and configuration.

use bignum_core::ValueError;
use bignum_runtime::CommandError;
use std::fmt;

#[derive(Debug)]
pub enum HostError {
    /// A dispatched or host command failed
    Command(CommandError),
    NoSuchVariable(String),
    Syntax(String),
    Io(std::io::Error),
    Config(String),
    /// Failure while running a script, tagged with its 1-based line number
    Script { line: usize, error: Box<HostError> },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Command(e) => write!(f, "{}", e),
            HostError::NoSuchVariable(name) => {
                write!(f, "can't read \"{}\": no such variable", name)
            }
            HostError::Syntax(msg) => write!(f, "{}", msg),
            HostError::Io(e) => write!(f, "I/O error: {}", e),
            HostError::Config(msg) => write!(f, "{}", msg),
            HostError::Script { line, error } => write!(f, "line {}: {}", line, error),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Command(e) => Some(e),
            HostError::Io(e) => Some(e),
            HostError::Script { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl From<CommandError> for HostError {
    fn from(e: CommandError) -> Self {
        HostError::Command(e)
    }
}

impl From<ValueError> for HostError {
    fn from(e: ValueError) -> Self {
        HostError::Command(CommandError::from(e))
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e)
    }
}
