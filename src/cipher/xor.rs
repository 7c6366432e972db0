/// XOR `data` against `keystream`, which must be at least as long.
///
/// Self-inverse: `transform(transform(x, ks), ks) == x`, so encryption and
/// decryption share this one pass and only the hex boundary differs.
pub fn transform(data: &[u8], keystream: &[u8]) -> Vec<u8> {
    debug_assert!(
        keystream.len() >= data.len(),
        "keystream shorter than data"
    );
    data.iter()
        .zip(keystream.iter())
        .map(|(byte, mask)| byte ^ mask)
        .collect()
}
