//! Value and primitive error types
//!
//! Two layers report failures here:
//!
//! - `ValueError`: the representation protocol (text conversion, duplication,
//!   sharing violations)
//! - `ArithError`: the arbitrary-precision primitives (allocation ceiling,
//!   argument preconditions)
//!
//! Both are plain enums so callers can match on them and convert with `?`.

use std::fmt;

/// Error raised by the value-cell layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Text does not denote a value of the target type
    Parse {
        /// The offending text, verbatim
        text: String,
        /// User-facing message produced by the type descriptor
        message: String,
    },
    /// Duplicating a typed representation hit the allocation ceiling
    OutOfMemory,
    /// An in-place mutation was attempted through a shared handle.
    ///
    /// This is a programming error in the caller: the handle must be made
    /// exclusive first.
    SharedMutation,
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::Parse { message, .. } => write!(f, "{}", message),
            ValueError::OutOfMemory => write!(f, "Out of memory duplicating value"),
            ValueError::SharedMutation => {
                write!(f, "attempted to mutate a shared value in place")
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// Error raised by an arithmetic primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
    /// The result would exceed the configured allocation ceiling
    OutOfMemory,
    /// A well-typed argument violates the primitive's precondition
    InvalidArgument(&'static str),
}

impl fmt::Display for ArithError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithError::OutOfMemory => write!(f, "Out of memory"),
            ArithError::InvalidArgument(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ArithError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_displays_descriptor_message() {
        let err = ValueError::Parse {
            text: "12abc".to_string(),
            message: "bad value \"12abc\"".to_string(),
        };
        assert_eq!(err.to_string(), "bad value \"12abc\"");
    }

    #[test]
    fn test_arith_messages_are_distinct() {
        assert_eq!(ArithError::OutOfMemory.to_string(), "Out of memory");
        assert_eq!(
            ArithError::InvalidArgument("Negative exponent").to_string(),
            "Negative exponent"
        );
    }
}
