//! Runtime configuration
//!
//! ```toml
//! # Largest result, in bits, any primitive may produce
//! max_bits = 16777216
//! # Fixed seed for `rand` (omit to seed from OS entropy)
//! seed = "reproducible"
//! ```

use bignum_core::DEFAULT_MAX_BITS;
use serde::Deserialize;

/// Settings for an `Interp`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Allocation ceiling for arithmetic results, in bits
    pub max_bits: u64,
    /// Initial seed for the random source
    pub seed: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_bits: DEFAULT_MAX_BITS,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Parse runtime configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse runtime config: {}", e))
    }

    pub fn with_max_bits(mut self, max_bits: u64) -> Self {
        self.max_bits = max_bits;
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }
}
