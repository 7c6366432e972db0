use crate::error::{CipherLabError, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// Source of random bytes for key generation.
/// Injected so tests can substitute deterministic sequences for the
/// ambient CSPRNG.
pub trait RandomSource {
    fn fill(&mut self, buf: &mut [u8]);
}

/// Production source backed by the thread-local CSPRNG
#[derive(Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) {
        rand::thread_rng().fill_bytes(buf);
    }
}

/// Key generation modes.
///
/// `Lattice` and `Neural` are illustrative reshapings of random bytes kept
/// for parity with the playground UI. They are NOT post-quantum or
/// machine-learning primitives and add no security over `Random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    #[default]
    Random,
    Lattice,
    Neural,
}

impl std::str::FromStr for KeyMode {
    type Err = CipherLabError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "lattice" | "quantum" => Ok(Self::Lattice),
            "neural" => Ok(Self::Neural),
            _ => Err(CipherLabError::UnsupportedAlgorithm(format!(
                "key mode: {}",
                s
            ))),
        }
    }
}

/// Requested key shape; `length` counts output characters
#[derive(Debug, Clone, Copy)]
pub struct KeyRecipe {
    pub mode: KeyMode,
    pub length: usize,
}

/// Printable charset for `Random` keys: letters, digits, symbols
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Generate key material for a recipe, drawing randomness from `source`
pub fn generate_key(recipe: &KeyRecipe, source: &mut dyn RandomSource) -> Result<String> {
    if recipe.length == 0 {
        return Err(CipherLabError::InvalidKey(
            "requested key length is zero".into(),
        ));
    }

    match recipe.mode {
        KeyMode::Random => Ok(charset_key(recipe.length, source)),
        KeyMode::Lattice => Ok(reshaped_key(recipe.length, source, b"cipherlab_lattice_v1", 1)),
        KeyMode::Neural => Ok(reshaped_key(recipe.length, source, b"cipherlab_neural_v1", 3)),
    }
}

fn charset_key(length: usize, source: &mut dyn RandomSource) -> String {
    let mut bytes = vec![0u8; length];
    source.fill(&mut bytes);
    bytes
        .iter()
        .map(|b| CHARSET[*b as usize % CHARSET.len()] as char)
        .collect()
}

/// Reshape a 32-byte random seed through `rounds` Keccak squeezes and emit
/// `length` lowercase hex characters. Deterministic given the seed.
fn reshaped_key(length: usize, source: &mut dyn RandomSource, domain: &[u8], rounds: u64) -> String {
    let mut seed = [0u8; 32];
    source.fill(&mut seed);

    let mut state = seed.to_vec();
    for round in 0..rounds {
        state = keccak_stream(domain, round, &state, (length + 1) / 2);
    }

    let mut key = hex::encode(&state);
    key.truncate(length);
    key
}

/// Squeeze an arbitrary-length stream out of Keccak:
/// absorb domain || round || seed || counter, emit digest bytes, repeat
fn keccak_stream(domain: &[u8], round: u64, seed: &[u8], length: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(length);
    let mut counter = 0u64;

    while stream.len() < length {
        let mut hasher = Keccak256::new();
        hasher.update(domain);
        hasher.update(round.to_le_bytes());
        hasher.update(seed);
        hasher.update(counter.to_le_bytes());
        let digest = hasher.finalize();

        for &byte in digest.iter() {
            if stream.len() >= length {
                break;
            }
            stream.push(byte);
        }
        counter += 1;
    }

    stream
}
