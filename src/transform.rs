//! Byte-level primitives and the keyed round transform (C4 + C5).
//!
//! [`xor_bytes`], [`rotate_left`], and [`rotate_right`] treat a byte slice
//! as one large big-endian integer and operate on it as a whole, carrying
//! bits across byte boundaries rather than rotating each byte in
//! isolation. [`forward`]/[`reverse`] compose these primitives into the
//! keyed, chunk-index-parameterized schedule that the codec applies to
//! each chunk.

/// XORs `data` with `key`, repeating `key` as many times as needed.
///
/// A zero-length key leaves `data` unchanged.
pub fn xor_bytes(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, &b)| b ^ key[i % key.len()])
        .collect()
}

/// Rotates `data`, treated as one big-endian integer, left by `bits` bits.
///
/// Whole-byte rotation is done first (a cyclic `Vec` rotation), then any
/// remaining sub-byte shift is folded across byte boundaries by carrying
/// the high bits of each byte into the low bits of its predecessor.
pub fn rotate_left(data: &[u8], bits: usize) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let total_bits = data.len() * 8;
    let bits = bits % total_bits;
    let byte_shift = bits / 8;
    let bit_shift = bits % 8;

    let mut out = data.to_vec();
    out.rotate_left(byte_shift);

    if bit_shift == 0 {
        return out;
    }

    let len = out.len();
    let mut result = vec![0u8; len];
    for i in 0..len {
        let cur = out[i];
        let next = out[(i + 1) % len];
        result[i] = (cur << bit_shift) | (next >> (8 - bit_shift));
    }
    result
}

/// Rotates `data`, treated as one big-endian integer, right by `bits` bits.
pub fn rotate_right(data: &[u8], bits: usize) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let total_bits = data.len() * 8;
    let bits = bits % total_bits;
    rotate_left(data, total_bits - bits)
}

/// Applies the forward (encrypting) round transform to one chunk.
///
/// `key` is the user's raw password bytes; `chunk_index` selects the
/// round count so that consecutive chunks of the same plaintext diverge.
/// Each of the `iter` rounds rotates left by a distance that advances
/// with the round number, then XORs with the key. Keys shorter than 6
/// bytes make this a no-op, matching the reference construction's
/// degenerate case.
pub fn forward(data: &[u8], key: &[u8], chunk_index: u64) -> Vec<u8> {
    if key.len() < 6 {
        return data.to_vec();
    }
    let iterations = 10 + (chunk_index as usize % 6);
    let n = schedule_rotation(key);

    let mut buf = data.to_vec();
    for i in 0..iterations {
        let shift = 1 + ((n + i) % 7);
        buf = rotate_left(&buf, shift);
        buf = xor_bytes(&buf, key);
    }
    buf
}

/// Applies the reverse (decrypting) round transform to one chunk.
///
/// Exactly undoes [`forward`] given the same `key` and `chunk_index`,
/// running the same rounds in reverse order.
pub fn reverse(data: &[u8], key: &[u8], chunk_index: u64) -> Vec<u8> {
    if key.len() < 6 {
        return data.to_vec();
    }
    let iterations = 10 + (chunk_index as usize % 6);
    let n = schedule_rotation(key);

    let mut buf = data.to_vec();
    for i in (0..iterations).rev() {
        buf = xor_bytes(&buf, key);
        let shift = 1 + ((n + i) % 7);
        buf = rotate_right(&buf, shift);
    }
    buf
}

/// `n = K[(K[1] + K[2]) mod (len(K) - 5)] mod 7`.
fn schedule_rotation(key: &[u8]) -> usize {
    (key[(key[1] as usize + key[2] as usize) % (key.len() - 5)] as usize) % 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_bytes_is_its_own_inverse() {
        let data = b"hello, world!";
        let key = b"key";
        let encrypted = xor_bytes(data, key);
        let decrypted = xor_bytes(&encrypted, key);
        assert_eq!(decrypted, data);
    }

    #[test]
    fn xor_bytes_with_empty_key_is_identity() {
        let data = b"hello";
        assert_eq!(xor_bytes(data, b""), data);
    }

    #[test]
    fn rotate_left_then_right_is_identity() {
        let data = b"the quick brown fox jumps";
        for bits in [0, 1, 3, 7, 8, 9, 15, 16, 17, 100] {
            let rotated = rotate_left(data, bits);
            let back = rotate_right(&rotated, bits);
            assert_eq!(back, data, "bits={bits}");
        }
    }

    #[test]
    fn rotate_left_full_width_is_identity() {
        let data = b"abcdefgh";
        let total_bits = data.len() * 8;
        assert_eq!(rotate_left(data, total_bits), data);
        assert_eq!(rotate_left(data, 0), data);
    }

    #[test]
    fn rotate_left_matches_manual_bit_shift_single_byte() {
        // 0b1000_0001 rotated left by 1 bit is 0b0000_0011.
        let data = [0b1000_0001u8];
        assert_eq!(rotate_left(&data, 1), [0b0000_0011]);
    }

    #[test]
    fn rotate_crosses_byte_boundaries() {
        let data = [0b0000_0001u8, 0b0000_0000u8];
        // Rotating left by 1 should carry the lone set bit from byte 0
        // into the top bit of byte 1.
        assert_eq!(rotate_left(&data, 1), [0b0000_0010, 0b0000_0000]);
    }

    #[test]
    fn rotate_empty_is_empty() {
        assert_eq!(rotate_left(&[], 5), Vec::<u8>::new());
        assert_eq!(rotate_right(&[], 5), Vec::<u8>::new());
    }

    #[test]
    fn forward_then_reverse_roundtrips() {
        let data = b"some plaintext chunk of data";
        let key = b"a reasonably long password";
        for idx in 0..12u64 {
            let enc = forward(data, key, idx);
            let dec = reverse(&enc, key, idx);
            assert_eq!(dec, data, "chunk_index={idx}");
        }
    }

    #[test]
    fn short_key_is_a_no_op() {
        let data = b"unchanged";
        for key in [b"".as_slice(), b"a", b"ab", b"abc", b"abcd", b"abcde"] {
            assert_eq!(forward(data, key, 0), data);
            assert_eq!(reverse(data, key, 0), data);
        }
    }

    #[test]
    fn different_chunk_indices_produce_different_ciphertext() {
        let data = b"identical plaintext in every chunk!";
        let key = b"a reasonably long password";
        let c0 = forward(data, key, 0);
        let c1 = forward(data, key, 1);
        assert_ne!(c0, c1);
    }
}
