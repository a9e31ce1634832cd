//! Line evaluation
//!
//! `Host` keeps script variables as value handles. `$name` passes an alias
//! of the variable's handle to the command. A variable assigned from a
//! command result already holds a number and is never parsed; one assigned
//! from text is converted on a private copy, leaving the variable as written.

use crate::error::HostError;
use crate::parser::{Word, parse_line};
use bignum_runtime::{BigValue, CommandError, Interp, RuntimeConfig};
use std::collections::HashMap;
use std::io::Write;
use tracing::debug;

pub struct Host<W: Write> {
    interp: Interp,
    vars: HashMap<String, BigValue>,
    out: W,
}

impl<W: Write> Host<W> {
    pub fn new(config: &RuntimeConfig, out: W) -> Self {
        Host {
            interp: Interp::with_config(config),
            vars: HashMap::new(),
            out,
        }
    }

    pub fn interp(&self) -> &Interp {
        &self.interp
    }

    /// Current handle of a variable
    pub fn var(&self, name: &str) -> Option<&BigValue> {
        self.vars.get(name)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Evaluate one line. Blank lines evaluate to `None`.
    pub fn eval_line(&mut self, line: &str) -> Result<Option<BigValue>, HostError> {
        let words = parse_line(line)?;
        if words.is_empty() {
            return Ok(None);
        }
        self.eval_words(&words).map(Some)
    }

    /// Run a script: one command per line, skipping blank lines and `#`
    /// comments. Stops at the first failure.
    pub fn run_script(&mut self, source: &str) -> Result<(), HostError> {
        for (index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            self.eval_line(trimmed).map_err(|error| HostError::Script {
                line: index + 1,
                error: Box::new(error),
            })?;
        }
        Ok(())
    }

    fn eval_words(&mut self, words: &[Word]) -> Result<BigValue, HostError> {
        let mut values = Vec::with_capacity(words.len());
        for word in words {
            values.push(self.eval_word(word)?);
        }
        let Some((head, args)) = values.split_first_mut() else {
            return Ok(BigValue::from_text(""));
        };
        let name = head.get_text()?.to_string();
        debug!(command = %name, argc = args.len(), "eval");

        match name.as_str() {
            "set" => self.set(args),
            "unset" => self.unset(args),
            "puts" => self.puts(args),
            _ => Ok(self.interp.invoke(&name, args)?),
        }
    }

    fn eval_word(&mut self, word: &Word) -> Result<BigValue, HostError> {
        match word {
            Word::Literal(text) => Ok(BigValue::from_text(text.as_str())),
            Word::Var(name) => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| HostError::NoSuchVariable(name.clone())),
            Word::Command(words) => self.eval_words(words),
        }
    }

    /// `set name ?value?`
    fn set(&mut self, args: &mut [BigValue]) -> Result<BigValue, HostError> {
        match args {
            [name] => {
                let name = name.get_text()?;
                self.vars
                    .get(name)
                    .cloned()
                    .ok_or_else(|| HostError::NoSuchVariable(name.to_string()))
            }
            [name, value] => {
                let name = name.get_text()?.to_string();
                self.vars.insert(name, value.clone());
                Ok(value.clone())
            }
            _ => Err(CommandError::wrong_args("set", "varName ?newValue?").into()),
        }
    }

    /// `unset name`
    fn unset(&mut self, args: &mut [BigValue]) -> Result<BigValue, HostError> {
        let [name] = args else {
            return Err(CommandError::wrong_args("unset", "varName").into());
        };
        let name = name.get_text()?;
        self.vars
            .remove(name)
            .ok_or_else(|| HostError::NoSuchVariable(name.to_string()))?;
        Ok(BigValue::from_text(""))
    }

    /// `puts value`
    fn puts(&mut self, args: &mut [BigValue]) -> Result<BigValue, HostError> {
        let [value] = args else {
            return Err(CommandError::wrong_args("puts", "string").into());
        };
        writeln!(self.out, "{}", value.get_text()?)?;
        Ok(BigValue::from_text(""))
    }
}
