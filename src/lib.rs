//! CipherLab - stream-cipher engine and text-statistics core
//!
//! The computational core of an educational cryptography playground:
//! deterministic stream ciphers behind a hex presentation boundary, plus the
//! statistics and heuristic scoring that drive the playground's security
//! charts. The UI layer is an external caller; this crate has no CLI, no
//! network access, and no persisted state.
//!
//! ## Transform pipeline
//!
//! ```text
//! Text → Keystream (RC4 | ChaCha20) → XOR → Hex
//! ```
//!
//! Decryption runs the same pipeline in reverse. XOR is self-inverse, so the
//! cipher pass is shared and only the hex boundary distinguishes directions.
//! Every operation derives a fresh keystream from the key; nothing is cached
//! between calls.
//!
//! ## Example
//!
//! ```
//! use cipherlab::{analyze, decrypt, encrypt};
//!
//! let ciphertext = encrypt("Hello, World!", "testkey123456789", "rc4").unwrap();
//! let plaintext = decrypt(&ciphertext, "testkey123456789", "rc4").unwrap();
//! assert_eq!(plaintext, "Hello, World!");
//!
//! let report = analyze(&ciphertext, "testkey123456789", "rc4");
//! assert!(report.overall <= 100);
//! ```

pub mod analysis;
pub mod cipher;
pub mod engine;
pub mod error;
pub mod keygen;
pub mod registry;

pub use analysis::score::{RiskPrediction, SecurityAssessment};
pub use analysis::stats::{analyze_text, EntropyReport, FrequencyEntry, PatternMatch};
pub use engine::{analyze, decrypt, encrypt};
pub use error::{CipherLabError, Result};
pub use keygen::{KeyMode, KeyRecipe, RandomSource};
pub use registry::{Algorithm, AlgorithmDescriptor};
