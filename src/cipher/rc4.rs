use crate::error::{CipherLabError, Result};

/// RC4 keystream generator: the S permutation plus the i/j cursors.
///
/// The PRGA mutates state per emitted byte, so one instance covers exactly
/// one encrypt or decrypt operation over the full message. Reusing an
/// instance across partial messages desynchronizes the stream.
pub struct Rc4 {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    /// Run the key-scheduling algorithm: scramble S into a key-dependent
    /// permutation of 0..=255, cycling over the key bytes
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(CipherLabError::InvalidKey("key must not be empty".into()));
        }

        let mut s = [0u8; 256];
        for (i, slot) in s.iter_mut().enumerate() {
            *slot = i as u8;
        }

        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }

        Ok(Self { s, i: 0, j: 0 })
    }

    /// One PRGA step: advance the cursors, swap, emit S[(S[i]+S[j]) mod 256]
    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.s[self.i as usize]);
        self.s.swap(self.i as usize, self.j as usize);
        let idx = self.s[self.i as usize].wrapping_add(self.s[self.j as usize]);
        self.s[idx as usize]
    }

    /// Emit the next `length` keystream bytes
    pub fn keystream(&mut self, length: usize) -> Vec<u8> {
        (0..length).map(|_| self.next_byte()).collect()
    }
}

/// Derive a fresh RC4 keystream of `length` bytes from `key`.
/// Deterministic: the same key always yields the same stream.
pub fn derive_keystream(key: &[u8], length: usize) -> Result<Vec<u8>> {
    Ok(Rc4::new(key)?.keystream(length))
}
