//! Random source for `rand` / `srand`
//!
//! The generator is ordinary state owned by the interpreter. It starts from
//! OS entropy unless a seed is configured, and `reseed` replaces it with a
//! generator derived from the SHA-256 digest of the seed bytes, so equal
//! seeds always produce equal sequences.
//!
//! - `rand ?atoms?` draws a value in `[0, 2^(32 * atoms))`, one atom by default
//! - `srand seed-string` resets the generator from the argument's text

use crate::error::CommandError;
use bignum_core::{Arith, BigInt, BigValue, parse_integer};
use num_traits::{Signed, ToPrimitive};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};
use tracing::info;

pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        RandomSource {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic source for the given seed bytes
    pub fn from_seed_bytes(seed: &[u8]) -> Self {
        RandomSource {
            rng: StdRng::from_seed(derive_seed(seed)),
        }
    }

    /// Reset the generator; subsequent output depends only on `seed`
    pub fn reseed(&mut self, seed: &[u8]) {
        info!(seed_len = seed.len(), "reseeding random source");
        self.rng = StdRng::from_seed(derive_seed(seed));
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}

fn derive_seed(seed: &[u8]) -> [u8; 32] {
    Sha256::digest(seed).into()
}

/// `rand ?atoms?`
pub fn rand_command(
    arith: &Arith,
    source: &mut RandomSource,
    operands: &mut [BigValue],
) -> Result<BigInt, CommandError> {
    let atoms = match operands {
        [] => 1,
        [size] => parse_size(size.get_text()?)?,
        _ => return Err(CommandError::wrong_args("rand", "?atoms?")),
    };
    Ok(arith.random(source.rng(), atoms)?)
}

/// `srand seed-string`
pub fn srand_command(
    source: &mut RandomSource,
    operands: &mut [BigValue],
) -> Result<(), CommandError> {
    let [seed] = operands else {
        return Err(CommandError::wrong_args("srand", "seed-string"));
    };
    source.reseed(seed.get_text()?.as_bytes());
    Ok(())
}

/// Size argument: a plain integer, read from text without caching a bignum
fn parse_size(text: &str) -> Result<u64, CommandError> {
    let size = parse_integer(text)
        .ok_or_else(|| CommandError::Usage(format!("expected integer but got \"{}\"", text)))?;
    if size.is_negative() {
        return Err(CommandError::Usage(format!(
            "expected non-negative integer but got \"{}\"",
            text
        )));
    }
    // too large to address is the same as too large to allocate
    size.to_u64().ok_or(CommandError::OutOfMemory)
}
