//! Command table and dispatch
//!
//! `Interp` is what a host embeds. It owns the allocation ceiling, the random
//! source and the interpreter result handle, and routes a command name plus
//! operand handles to the matching handler.
//!
//! # Result handle
//!
//! Successful commands store their value in `Interp`'s result handle and
//! return an alias of it. If the host has already dropped the previous
//! result, the cell is exclusive and is overwritten in place. Otherwise the
//! host still holds it, so a fresh cell is allocated and the host's copy is
//! left alone.

use crate::arithmetic::{self, FoldOp};
use crate::compare::{self, CmpOp};
use crate::config::RuntimeConfig;
use crate::error::CommandError;
use crate::random::{self, RandomSource};
use bignum_core::{Arith, BigInt, BigValue};
use tracing::{debug, trace};

/// A registered command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fold(FoldOp),
    Compare(CmpOp),
    Pow,
    Rand,
    Srand,
}

/// Registration table, in the order commands are listed to users
pub static COMMANDS: [(&str, Command); 14] = [
    ("+", Command::Fold(FoldOp::Add)),
    ("-", Command::Fold(FoldOp::Sub)),
    ("*", Command::Fold(FoldOp::Mul)),
    ("/", Command::Fold(FoldOp::Div)),
    ("%", Command::Fold(FoldOp::Mod)),
    (">", Command::Compare(CmpOp::Gt)),
    (">=", Command::Compare(CmpOp::Ge)),
    ("<", Command::Compare(CmpOp::Lt)),
    ("<=", Command::Compare(CmpOp::Le)),
    ("==", Command::Compare(CmpOp::Eq)),
    ("!=", Command::Compare(CmpOp::Ne)),
    ("rand", Command::Rand),
    ("srand", Command::Srand),
    ("**", Command::Pow),
];

impl Command {
    pub fn lookup(name: &str) -> Option<Command> {
        COMMANDS
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, command)| *command)
    }
}

/// Big-integer command interpreter state
#[derive(Debug)]
pub struct Interp {
    arith: Arith,
    random: RandomSource,
    result: BigValue,
}

impl Default for Interp {
    fn default() -> Self {
        Interp::new()
    }
}

impl Interp {
    /// Default ceiling, random source seeded from OS entropy
    pub fn new() -> Self {
        Interp::with_config(&RuntimeConfig::default())
    }

    pub fn with_config(config: &RuntimeConfig) -> Self {
        let random = match &config.seed {
            Some(seed) => RandomSource::from_seed_bytes(seed.as_bytes()),
            None => RandomSource::from_entropy(),
        };
        debug!(
            max_bits = config.max_bits,
            seeded = config.seed.is_some(),
            "interp created"
        );
        Interp {
            arith: Arith::new(config.max_bits),
            random,
            result: BigValue::from_text(""),
        }
    }

    /// Names of all registered commands
    pub fn command_names() -> impl Iterator<Item = &'static str> {
        COMMANDS.iter().map(|(name, _)| *name)
    }

    pub fn has_command(name: &str) -> bool {
        Command::lookup(name).is_some()
    }

    pub fn arith(&self) -> &Arith {
        &self.arith
    }

    /// The most recent result (empty text before the first command)
    pub fn result(&self) -> &BigValue {
        &self.result
    }

    /// Run `name` over `operands`.
    ///
    /// Operand handles may be moved onto private copies while their text is
    /// converted; the cells they alias are never modified.
    pub fn invoke(
        &mut self,
        name: &str,
        operands: &mut [BigValue],
    ) -> Result<BigValue, CommandError> {
        let command =
            Command::lookup(name).ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        debug!(command = name, argc = operands.len(), "invoke");

        let value = match command {
            Command::Fold(op) => Some(arithmetic::fold(&self.arith, op, operands)?),
            Command::Compare(op) => Some(compare::compare(&self.arith, op, operands)?),
            Command::Pow => Some(arithmetic::power(&self.arith, operands)?),
            Command::Rand => Some(random::rand_command(&self.arith, &mut self.random, operands)?),
            Command::Srand => {
                random::srand_command(&mut self.random, operands)?;
                None
            }
        };
        self.set_result(value)
    }

    fn set_result(&mut self, value: Option<BigInt>) -> Result<BigValue, CommandError> {
        if self.result.is_shared() {
            trace!("previous result still referenced, allocating a new cell");
            self.result = match value {
                Some(value) => BigValue::from_typed(value),
                None => BigValue::from_text(""),
            };
        } else {
            match value {
                Some(value) => self.result.set_typed(value)?,
                None => self.result.set_text("")?,
            }
        }
        Ok(self.result.clone())
    }
}
