//! Bignum Shell: a small line-oriented host for the big-integer commands
//!
//! # Modules
//!
//! - `parser`: splits a line into literal, variable and substitution words
//! - `host`: variables, host commands (`set`, `unset`, `puts`) and dispatch
//! - `config`: TOML configuration for the runtime and the REPL
//! - `error`: `HostError`

pub mod config;
pub mod error;
pub mod host;
pub mod parser;

pub use config::{CONFIG_ENV, Config, ShellConfig};
pub use error::HostError;
pub use host::Host;
pub use parser::{Word, parse_line};
