use cipherlab::analysis::stats::{repeating_patterns, shannon_entropy};
use cipherlab::{analyze, decrypt, encrypt, Algorithm, CipherLabError};
use std::error::Error;

#[test]
fn encrypt_decrypt_end_to_end() -> Result<(), Box<dyn Error>> {
    let plaintext = "Hello, World!";
    let key = "testkey123456789";

    for algorithm in Algorithm::all() {
        let id = algorithm.id();
        let ciphertext = encrypt(plaintext, key, id)?;

        // hex boundary: two lowercase digits per plaintext byte
        assert_eq!(ciphertext.len(), plaintext.len() * 2);
        assert!(ciphertext
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));

        let recovered = decrypt(&ciphertext, key, id)?;
        assert_eq!(recovered, plaintext, "round-trip failed for {}", id);
    }

    Ok(())
}

#[test]
fn identical_calls_are_deterministic() -> Result<(), Box<dyn Error>> {
    let first = encrypt("determinism probe", "stable key", "chacha20")?;
    let second = encrypt("determinism probe", "stable key", "chacha20")?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn algorithms_disagree_on_ciphertext() -> Result<(), Box<dyn Error>> {
    let rc4 = encrypt("same input text", "same key", "rc4")?;
    let chacha = encrypt("same input text", "same key", "chacha20")?;
    assert_ne!(rc4, chacha);
    Ok(())
}

#[test]
fn wrong_key_does_not_recover_plaintext() -> Result<(), Box<dyn Error>> {
    let ciphertext = encrypt("attack at dawn", "correct horse battery", "rc4")?;

    // a wrong key either trips the UTF-8 check or yields different text
    match decrypt(&ciphertext, "wrong horse battery", "rc4") {
        Ok(text) => assert_ne!(text, "attack at dawn"),
        Err(CipherLabError::MalformedCiphertext(_)) => {}
        Err(other) => panic!("unexpected error: {}", other),
    }

    Ok(())
}

#[test]
fn malformed_ciphertext_is_rejected() {
    // odd length
    assert!(matches!(
        decrypt("abc", "somekey", "rc4"),
        Err(CipherLabError::MalformedCiphertext(_))
    ));
    // non-hex characters
    assert!(matches!(
        decrypt("abcx", "somekey", "rc4"),
        Err(CipherLabError::MalformedCiphertext(_))
    ));
}

#[test]
fn unknown_algorithm_and_empty_inputs_fail_loudly() {
    assert!(matches!(
        encrypt("text", "key", "vigenere"),
        Err(CipherLabError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        decrypt("00ff", "key", "vigenere"),
        Err(CipherLabError::UnsupportedAlgorithm(_))
    ));
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
fn analysis_report_covers_ciphertext() -> Result<(), Box<dyn Error>> {
    let ciphertext = encrypt("a longer message to give the statistics something to chew on",
        "testkey123456789", "chacha20")?;
    let report = analyze(&ciphertext, "testkey123456789", "chacha20");

    assert!(report.overall <= 100);
    assert!(report.key_strength <= 100);
    assert_eq!(report.algorithm_strength, 95);
    assert!(!report.predictions.is_empty());

    let json = report.to_json()?;
    assert!(json.contains("\"quantum_resistance\""));

    Ok(())
}

#[test]
fn statistics_match_published_expectations() {
    assert_eq!(shannon_entropy("aaaa"), 0.0);
    assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-12);

    let matches = repeating_patterns("abab", 2);
    assert_eq!(matches[0].pattern, "ab");
    assert_eq!(matches[0].count, 2);
    assert_eq!(matches[0].positions, vec![0, 2]);
}
