//! One round of the internal hash transform (C2).
//!
//! This is the non-cryptographic core the rest of [`super`] iterates:
//! given a password, a salt, and the memo table accumulated so far, it
//! derives six byte strings from a single running accumulator. The
//! arithmetic mirrors a handwritten 8-bit hash mixing function rather
//! than any standard construction — every constant here is load-bearing
//! and must match bit-for-bit across implementations.

/// The six byte strings produced by one hash round.
///
/// `t0` is the externally visible hash string for this round (consumed
/// by the password hasher as the next round's input password and, on the
/// final round, as the output of [`crate::hash::hash_password`]). `t1..t5`
/// are folded into the memo table.
pub struct RoundOutput {
    pub t0: Vec<u8>,
    pub t1: Vec<u8>,
    pub t2: Vec<u8>,
    pub t3: Vec<u8>,
    pub t4: Vec<u8>,
    pub t5: Vec<u8>,
}

/// Runs one round of the internal hash transform.
///
/// `password` and `salt` are arbitrary byte strings; `memo` is the
/// append-only table built by previous rounds (empty on the very first
/// round of the very first call).
pub fn internal_hash_round(password: &[u8], salt: &[u8], memo: &[Vec<u8>]) -> RoundOutput {
    let mut combined = Vec::with_capacity(salt.len() + 1 + password.len());
    combined.extend_from_slice(salt);
    combined.push(b'$');
    combined.extend_from_slice(password);

    let m = memo.len();

    // Step A: initial accumulator.
    let (mut acc, h4_seed): (i32, Vec<u8>) = if m == 0 {
        let idx = combined[0] as i32 % 90;
        (idx + 37, Vec::new())
    } else {
        let h4_seed = memo[m - 1].clone();
        let string_memo_index = ((combined[combined.len() - 2] as i32 * 97) % m as i32) as usize;
        let string_memo = &memo[string_memo_index];
        let byte_index =
            (combined[combined.len() - 7] as i32 * 113) % string_memo.len() as i32;
        let acc = string_memo[byte_index as usize] as i32;
        (acc, h4_seed)
    };
    if acc > 96 {
        acc -= 70;
    } else {
        acc -= 64;
    }

    // Step B: build h1.
    let mut h1 = Vec::with_capacity(combined.len());
    for &b in &combined {
        let hv = acc * 113 + b as i32;
        acc += 2;
        if acc > 48 {
            acc -= 23;
        }
        let part1 = hv % 90;
        let part2 = (hv / 90) % 90 + 37;
        h1.push((part1 & part2) as u8);
    }

    // Step C: reorder via UTF-8 expansion then nth-element shuffle.
    let h1_bytes = latin1_to_utf8_bytes(&h1);
    let n = (acc as i64) % 5;
    let sorted_bytes = nth_element_shuffle(&h1_bytes, n);

    // Step D: build h2.
    let mut hv: i32 = 0;
    let mut h2 = Vec::new();
    for &byte_val in &sorted_bytes {
        hv = hv * 71 + byte_val as i32;
        while hv > 128 {
            h2.push(((hv % 90) + 37) as u8);
            hv /= 90;
        }
    }
    h2.push(((hv % 90) + 37) as u8);

    // Step E: build h3, continuing the running accumulator from Step D.
    let mut h3 = Vec::new();
    for &byte_val in &sorted_bytes {
        hv = hv * 997 + byte_val as i32;
        while hv > 128 {
            h3.push(((hv % 90) + 37) as u8);
            hv /= 90;
        }
    }
    h3.push(((hv % 90) + 37) as u8);

    // Step F: build h4.
    let (mut h4, h4_input): (Vec<u8>, Vec<u8>) = if m > 0 {
        (h4_seed.clone(), h4_seed)
    } else {
        (Vec::new(), sorted_bytes.clone())
    };
    let multiplier = if m > 73 { 1997 } else { 23 };
    for &byte_val in &h4_input {
        hv = hv * multiplier + byte_val as i32;
        while hv > 128 {
            h4.push(((hv % 90) + 37) as u8);
            hv /= 90;
        }
    }

    // Step G: emit, with the slot-4/slot-5 repeat determined by memo depth.
    let mut t0 = Vec::with_capacity(salt.len() + h2.len() + h4.len() + 8);
    t0.push(b'$');
    t0.extend_from_slice(salt);
    t0.extend_from_slice(b"$/$");
    t0.extend_from_slice(&h2);

    if m > 47 {
        let t5 = h3.clone();
        RoundOutput {
            t0,
            t1: h1,
            t2: h2,
            t3: h3,
            t4: h4,
            t5,
        }
    } else {
        t0.push(b'$');
        t0.extend_from_slice(&h4);
        let t4 = h3.clone();
        RoundOutput {
            t0,
            t1: h1,
            t2: h2,
            t3: h3,
            t4,
            t5: h4,
        }
    }
}

/// Expands a sequence of latin-1 code points (stored as raw bytes 0..=255)
/// into their UTF-8 byte representation.
fn latin1_to_utf8_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for &uc in data {
        if uc < 0x80 {
            out.push(uc);
        } else if uc < 0xC0 {
            out.push(0xC2);
            out.push(uc);
        } else {
            out.push(0xC3);
            out.push(uc.wrapping_sub(0x40));
        }
    }
    out
}

/// The "nth-element shuffle": repeatedly pick out the element `n - 1`
/// positions ahead of the last pick (mod the shrinking working length)
/// and move it to the output.
fn nth_element_shuffle(data: &[u8], n: i64) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let mut working: Vec<u8> = data.to_vec();
    let mut result = Vec::with_capacity(data.len());
    let mut index: i64 = 0;
    for _ in 0..data.len() {
        let len = working.len() as i64;
        let mut idx = (index + n - 1) % len;
        if idx < 0 {
            idx += len;
        }
        index = idx;
        result.push(working.remove(index as usize));
    }
    result
}
