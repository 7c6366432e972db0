use crate::error::{CipherLabError, Result};

const BLOCK_WORDS: usize = 16;
const BLOCK_BYTES: usize = 64;
const KEY_BYTES: usize = 32;
const NONCE_BYTES: usize = 12;

/// "expand 32-byte k" as four little-endian words
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// ChaCha20 keystream generator over the 16-word block function.
///
/// Key material shorter than 32 bytes is zero-padded and longer material is
/// truncated, so arbitrary user passphrases always produce a well-formed
/// state. The block counter starts at 0 and advances one per 64-byte block.
pub struct ChaCha20 {
    key: [u32; 8],
    nonce: [u32; 3],
}

impl ChaCha20 {
    /// Construct with an all-zero nonce (the playground default: no session
    /// state survives between operations, so nonce reuse is not a concern)
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::with_nonce(key, &[0u8; NONCE_BYTES])
    }

    pub fn with_nonce(key: &[u8], nonce: &[u8; NONCE_BYTES]) -> Result<Self> {
        if key.is_empty() {
            return Err(CipherLabError::InvalidKey("key must not be empty".into()));
        }

        let mut padded = [0u8; KEY_BYTES];
        let take = key.len().min(KEY_BYTES);
        padded[..take].copy_from_slice(&key[..take]);

        let mut key_words = [0u32; 8];
        for (word, chunk) in key_words.iter_mut().zip(padded.chunks_exact(4)) {
            *word = u32::from_le_bytes(chunk.try_into().unwrap());
        }

        let mut nonce_words = [0u32; 3];
        for (word, chunk) in nonce_words.iter_mut().zip(nonce.chunks_exact(4)) {
            *word = u32::from_le_bytes(chunk.try_into().unwrap());
        }

        Ok(Self {
            key: key_words,
            nonce: nonce_words,
        })
    }

    /// Produce the 64-byte output block for one counter value:
    /// 10 double rounds over a working copy, then add back the input state
    /// word-wise and serialize little-endian
    fn block(&self, counter: u32) -> [u8; BLOCK_BYTES] {
        let mut state = [0u32; BLOCK_WORDS];
        state[..4].copy_from_slice(&CONSTANTS);
        state[4..12].copy_from_slice(&self.key);
        state[12] = counter;
        state[13..].copy_from_slice(&self.nonce);

        let mut working = state;
        for _ in 0..10 {
            // column rounds
            quarter_round(&mut working, 0, 4, 8, 12);
            quarter_round(&mut working, 1, 5, 9, 13);
            quarter_round(&mut working, 2, 6, 10, 14);
            quarter_round(&mut working, 3, 7, 11, 15);
            // diagonal rounds
            quarter_round(&mut working, 0, 5, 10, 15);
            quarter_round(&mut working, 1, 6, 11, 12);
            quarter_round(&mut working, 2, 7, 8, 13);
            quarter_round(&mut working, 3, 4, 9, 14);
        }

        let mut out = [0u8; BLOCK_BYTES];
        for (i, (mixed, original)) in working.iter().zip(state.iter()).enumerate() {
            let word = mixed.wrapping_add(*original);
            out[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Generate `length` keystream bytes: successive blocks with counter
    /// 0, 1, 2, ..., truncating the final block
    pub fn keystream(&self, length: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(length);
        let mut counter = 0u32;
        while out.len() < length {
            let block = self.block(counter);
            let take = (length - out.len()).min(BLOCK_BYTES);
            out.extend_from_slice(&block[..take]);
            counter = counter.wrapping_add(1);
        }
        out
    }
}

/// ARX quarter-round over the words at indices a, b, c, d
fn quarter_round(state: &mut [u32; BLOCK_WORDS], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// Derive a fresh ChaCha20 keystream of `length` bytes from `key`.
/// Deterministic: the same key always yields the same stream.
pub fn derive_keystream(key: &[u8], length: usize) -> Result<Vec<u8>> {
    Ok(ChaCha20::new(key)?.keystream(length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc8439_zero_key_block() {
        // RFC 8439 keystream for all-zero key/nonce at counter 0
        let ks = derive_keystream(&[0u8; 32], 32).unwrap();
        assert_eq!(
            hex::encode(ks),
            "76b8e0ada0f13d90405d6ae55386bd28bdd219b8a08ded1aa836efcc8b770dc7"
        );
    }

    #[test]
    fn test_quarter_round_rfc8439_vector() {
        // RFC 8439 section 2.1.1 test vector applied at indices 0..4
        let mut state = [0u32; BLOCK_WORDS];
        state[0] = 0x11111111;
        state[1] = 0x01020304;
        state[2] = 0x9b8d6f43;
        state[3] = 0x01234567;
        quarter_round(&mut state, 0, 1, 2, 3);
        assert_eq!(state[0], 0xea2a92f4);
        assert_eq!(state[1], 0xcb1cf8ce);
        assert_eq!(state[2], 0x4581472e);
        assert_eq!(state[3], 0x5881c4bb);
    }

    #[test]
    fn test_short_key_is_zero_padded() {
        let short = derive_keystream(b"abc", 64).unwrap();
        let mut padded = [0u8; 32];
        padded[..3].copy_from_slice(b"abc");
        let explicit = derive_keystream(&padded, 64).unwrap();
        assert_eq!(short, explicit);
    }

    #[test]
    fn test_long_key_is_truncated() {
        let long: Vec<u8> = (0u8..40).collect();
        let truncated: Vec<u8> = (0u8..32).collect();
        assert_eq!(
            derive_keystream(&long, 64).unwrap(),
            derive_keystream(&truncated, 64).unwrap()
        );
    }

    #[test]
    fn test_counter_advances_across_blocks() {
        // 128 bytes spans two blocks; the second must differ from the first
        let ks = derive_keystream(b"block counter key", 128).unwrap();
        assert_ne!(ks[..64], ks[64..]);
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            derive_keystream(b"", 16),
            Err(CipherLabError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_nonce_changes_stream() {
        let zero = ChaCha20::new(b"nonce test key").unwrap().keystream(64);
        let mut nonce = [0u8; NONCE_BYTES];
        nonce[0] = 1;
        let one = ChaCha20::with_nonce(b"nonce test key", &nonce)
            .unwrap()
            .keystream(64);
        assert_ne!(zero, one);
    }
}
