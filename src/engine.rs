use crate::analysis::score::{self, SecurityAssessment};
use crate::cipher::{self, xor};
use crate::error::{CipherLabError, Result};
use crate::registry::Algorithm;

/// Encrypt UTF-8 text with the named algorithm, returning lowercase hex
/// ciphertext (two digits per byte, no separators)
pub fn encrypt(text: &str, key: &str, algorithm_id: &str) -> Result<String> {
    let algorithm: Algorithm = algorithm_id.parse()?;
    check_inputs(text, key)?;

    let keystream = cipher::derive_keystream(algorithm, key.as_bytes(), text.len())?;
    Ok(hex::encode(xor::transform(text.as_bytes(), &keystream)))
}

/// Decrypt lowercase-hex ciphertext produced by `encrypt`.
/// Fails with MalformedCiphertext on odd-length or non-hex input, and when
/// the decrypted bytes are not valid UTF-8 (the usual sign of a wrong key).
pub fn decrypt(ciphertext: &str, key: &str, algorithm_id: &str) -> Result<String> {
    let algorithm: Algorithm = algorithm_id.parse()?;
    check_inputs(ciphertext, key)?;

    let bytes = hex::decode(ciphertext)
        .map_err(|e| CipherLabError::MalformedCiphertext(e.to_string()))?;

    let keystream = cipher::derive_keystream(algorithm, key.as_bytes(), bytes.len())?;
    let plaintext = xor::transform(&bytes, &keystream);

    String::from_utf8(plaintext).map_err(|_| {
        CipherLabError::MalformedCiphertext("decrypted bytes are not valid UTF-8".into())
    })
}

/// Score a text/key/algorithm triple. Unlike encrypt/decrypt this accepts
/// degenerate input (empty text or key, unknown algorithm id) and scores it
/// instead of failing, so the UI can show a report for anything typed in.
pub fn analyze(text: &str, key: &str, algorithm_id: &str) -> SecurityAssessment {
    score::assess(text, key, algorithm_id)
}

fn check_inputs(text: &str, key: &str) -> Result<()> {
    if text.is_empty() {
        return Err(CipherLabError::EmptyInput);
    }
    if key.is_empty() {
        return Err(CipherLabError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_produces_lowercase_hex() {
        let ciphertext = encrypt("Hello, World!", "testkey123456789", "rc4").unwrap();
        assert_eq!(ciphertext.len(), "Hello, World!".len() * 2);
        assert!(ciphertext
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }

    #[test]
    fn test_roundtrip_both_algorithms() {
        for algorithm in ["rc4", "chacha20"] {
            let ciphertext = encrypt("Hello, World!", "testkey123456789", algorithm).unwrap();
            let plaintext = decrypt(&ciphertext, "testkey123456789", algorithm).unwrap();
            assert_eq!(plaintext, "Hello, World!", "algorithm {}", algorithm);
        }
    }

    #[test]
    fn test_roundtrip_multibyte_text() {
        let text = "naïve · ∑ 暗号 🔐";
        let ciphertext = encrypt(text, "unicode key", "chacha20").unwrap();
        assert_eq!(decrypt(&ciphertext, "unicode key", "chacha20").unwrap(), text);
    }

    #[test]
    fn test_decrypt_odd_length_hex_fails() {
        let err = decrypt("abc", "somekey", "rc4").unwrap_err();
        assert!(matches!(err, CipherLabError::MalformedCiphertext(_)));
    }

    #[test]
    fn test_decrypt_non_hex_fails() {
        let err = decrypt("zzzz", "somekey", "rc4").unwrap_err();
        assert!(matches!(err, CipherLabError::MalformedCiphertext(_)));
    }

    #[test]
    fn test_unknown_algorithm_fails() {
        assert!(matches!(
            encrypt("text", "key", "enigma"),
            Err(CipherLabError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_empty_inputs_fail() {
        assert!(matches!(
            encrypt("", "key", "rc4"),
            Err(CipherLabError::EmptyInput)
        ));
        assert!(matches!(
            encrypt("text", "", "rc4"),
            Err(CipherLabError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_analyze_accepts_degenerate_input() {
        let report = analyze("", "", "unknown-cipher");
        assert_eq!(report.key_strength, 0);
        assert!(!report.predictions.is_empty());
    }
}
