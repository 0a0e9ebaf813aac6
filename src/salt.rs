//! Salt generation (C1).
//!
//! Produces 16-character salts over a fixed printable alphabet, drawn from
//! the platform's cryptographic random source.

use rand::RngCore;
use rand::rngs::OsRng;

/// Number of characters in a generated salt.
pub const SALT_LEN: usize = 16;

const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generates a fresh 16-byte salt.
///
/// Character 0 is drawn from the 52-letter ASCII alphabet. Characters
/// 1..15 land in `chr(37)..chr(125)` inclusive (`r % 89 + 37` for a random
/// byte `r`).
pub fn generate() -> Vec<u8> {
    let mut random_bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut random_bytes);
    generate_from(&random_bytes)
}

/// Builds a salt deterministically from 16 already-sourced random bytes.
///
/// Split out from [`generate`] so the character-mapping logic can be
/// exercised without depending on the platform RNG.
fn generate_from(random_bytes: &[u8; SALT_LEN]) -> Vec<u8> {
    let mut salt = Vec::with_capacity(SALT_LEN);
    salt.push(LETTERS[(random_bytes[0] as usize) % LETTERS.len()]);
    for &r in &random_bytes[1..SALT_LEN] {
        salt.push((r % 89) + 37);
    }
    salt
}
