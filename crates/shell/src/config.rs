//! Shell configuration
//!
//! Loaded from TOML. Lookup order: an explicit path (`--config`), then the
//! file named by `BIGSH_CONFIG`, then built-in defaults.
//!
//! ```toml
//! [runtime]
//! max_bits = 1048576
//! seed = "reproducible"
//!
//! [shell]
//! prompt = "> "
//! log_filter = "bignum_runtime=debug"
//! history = "/home/me/.bigsh_history"
//! ```

use crate::error::HostError;
use bignum_runtime::RuntimeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "BIGSH_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub runtime: RuntimeConfig,
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// REPL prompt
    pub prompt: String,
    /// Default tracing directive, applied on top of `RUST_LOG`
    pub log_filter: String,
    /// REPL history file; history is kept in memory only when unset
    pub history: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            prompt: "bigsh> ".to_string(),
            log_filter: "warn".to_string(),
            history: None,
        }
    }
}

impl Config {
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, HostError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HostError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Config::from_toml(&content).map_err(HostError::Config)
    }

    /// Resolve configuration from `explicit`, then `BIGSH_CONFIG`, then defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, HostError> {
        if let Some(path) = explicit {
            return Config::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Config::from_file(Path::new(&path)),
            _ => Ok(Config::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn with_env<T>(value: Option<&Path>, f: impl FnOnce() -> T) -> T {
        let orig = std::env::var_os(CONFIG_ENV);
        // SAFETY: callers are #[serial], nothing else touches the environment concurrently
        unsafe {
            match value {
                Some(v) => std::env::set_var(CONFIG_ENV, v),
                None => std::env::remove_var(CONFIG_ENV),
            }
        }
        let result = f();
        // SAFETY: restoring the environment under the same serial guard
        unsafe {
            match orig {
                Some(v) => std::env::set_var(CONFIG_ENV, v),
                None => std::env::remove_var(CONFIG_ENV),
            }
        }
        result
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.shell.prompt, "bigsh> ");
        assert!(config.shell.history.is_none());
    }

    #[test]
    fn test_sections() {
        let text = "[runtime]\nmax_bits = 128\nseed = \"s\"\n\n\
                    [shell]\nprompt = \"% \"\nhistory = \"/tmp/h\"\n";
        let config = Config::from_toml(text).unwrap();
        assert_eq!(config.runtime.max_bits, 128);
        assert_eq!(config.runtime.seed.as_deref(), Some("s"));
        assert_eq!(config.shell.prompt, "% ");
        assert_eq!(config.shell.log_filter, "warn");
        assert_eq!(config.shell.history, Some(PathBuf::from("/tmp/h")));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml("[shell]\ncolour = true\n").is_err());
        assert!(Config::from_toml("[plugins]\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/bigsh.toml")).unwrap_err();
        assert!(matches!(err, HostError::Config(_)));
        assert!(err.to_string().contains("/nonexistent/bigsh.toml"));
    }

    #[test]
    #[serial]
    fn test_load_prefers_explicit_path() {
        let explicit = write_config("[runtime]\nmax_bits = 1\n");
        let from_env = write_config("[runtime]\nmax_bits = 2\n");
        let load = || Config::load(Some(explicit.path()));
        let config = with_env(Some(from_env.path()), load).unwrap();
        assert_eq!(config.runtime.max_bits, 1);
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        let from_env = write_config("[shell]\nprompt = \"env> \"\n");
        let config = with_env(Some(from_env.path()), || Config::load(None)).unwrap();
        assert_eq!(config.shell.prompt, "env> ");
    }

    #[test]
    #[serial]
    fn test_load_defaults_without_env() {
        let config = with_env(None, || Config::load(None)).unwrap();
        assert_eq!(config, Config::default());
    }
}
