use crate::error::{CipherLabError, Result};
use serde::{Deserialize, Serialize};

/// Qualitative strength tier attached to an algorithm descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthTier {
    Low,
    Medium,
    High,
    QuantumResistant,
}

/// Supported stream cipher algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Rc4,
    #[default]
    ChaCha20,
}

impl std::str::FromStr for Algorithm {
    type Err = CipherLabError;
    fn from_str(s: &str) -> Result<Self> {
        match normalize_id(s).as_str() {
            "rc4" => Ok(Self::Rc4),
            "chacha20" | "chacha" => Ok(Self::ChaCha20),
            _ => Err(CipherLabError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Lowercase an algorithm id and strip separators, so "ChaCha-20",
/// "chacha_20", and "chacha20" all resolve to the same entry
pub fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| !matches!(*c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Static metadata for a supported algorithm
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub key_size_bits: usize,
    pub description: &'static str,
    pub strength: StrengthTier,
}

static RC4: AlgorithmDescriptor = AlgorithmDescriptor {
    id: "rc4",
    display_name: "RC4",
    key_size_bits: 256,
    description: "Variable key-size stream cipher",
    strength: StrengthTier::Medium,
};

static CHACHA20: AlgorithmDescriptor = AlgorithmDescriptor {
    id: "chacha20",
    display_name: "ChaCha20",
    key_size_bits: 256,
    description: "Modern stream cipher by Daniel J. Bernstein",
    strength: StrengthTier::High,
};

impl Algorithm {
    /// Every supported algorithm, in registry order
    pub fn all() -> &'static [Algorithm] {
        &[Algorithm::Rc4, Algorithm::ChaCha20]
    }

    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }

    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        match self {
            Algorithm::Rc4 => &RC4,
            Algorithm::ChaCha20 => &CHACHA20,
        }
    }
}

/// Resolve an algorithm id to its registry entry.
/// Fails with UnsupportedAlgorithm for ids the registry does not know.
pub fn resolve(id: &str) -> Result<Algorithm> {
    id.parse()
}
