pub mod chacha;
pub mod rc4;
pub mod xor;

use crate::error::Result;
use crate::registry::Algorithm;

/// Derive `length` keystream bytes for `algorithm` from `key`.
///
/// Deterministic: identical key, algorithm, and length always yield identical
/// bytes, which is what lets decryption invert encryption. Each call seeds a
/// fresh generator; no stream state survives between operations.
pub fn derive_keystream(algorithm: Algorithm, key: &[u8], length: usize) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::Rc4 => rc4::derive_keystream(key, length),
        Algorithm::ChaCha20 => chacha::derive_keystream(key, length),
    }
}
