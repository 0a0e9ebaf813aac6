//! The iterated password hash construction (C2 + C3).
//!
//! [`hash_password`] drives [`round::internal_hash_round`] for `2^cost`
//! iterations over a growing, append-only memo table, feeding each
//! round's primary output back in as the next round's password. The
//! construction is deliberately self-referential: later rounds read
//! earlier rounds' byte strings out of the memo table via modular
//! indexing derived from the password/salt bytes themselves.

mod round;

use crate::salt;
use round::internal_hash_round;

/// Number of memo slots populated per hash iteration.
const MEMO_BLOCK: usize = 16;

/// Runs the password hasher (C3) for `2^cost` iterations.
///
/// If `salt` is `Some`, every iteration uses that fixed salt — this is
/// the normal mode, used for both key derivation and verifier checking.
/// If `salt` is `None`, a fresh random salt (via [`crate::salt::generate`])
/// is drawn on *every* iteration, matching the reference construction's
/// behavior when no explicit salt is supplied.
///
/// Returns the final round's primary output string.
pub fn hash_password(password: &[u8], cost: u32, salt: Option<&[u8]>) -> Vec<u8> {
    let iterations = 1usize << cost;
    let mut memo: Vec<Vec<u8>> = Vec::new();
    let mut current = password.to_vec();

    for i in 0..iterations {
        let local_salt = match salt {
            Some(s) => s.to_vec(),
            None => self::salt::generate(),
        };

        let t = internal_hash_round(&current, &local_salt, &memo);

        let base = MEMO_BLOCK * i;
        if memo.len() < base + MEMO_BLOCK {
            memo.resize(base + MEMO_BLOCK, Vec::new());
        }
        memo[base] = t.t0.clone();
        memo[base + 1] = t.t1.clone();
        memo[base + 2] = t.t2.clone();
        memo[base + 3] = t.t3.clone();
        memo[base + 4] = t.t4.clone();
        memo[base + 15] = t.t5.clone();
        memo[base + 6] = concat(&t.t5, &t.t2);
        memo[base + 7] = concat(&t.t5, &t.t3);
        memo[base + 8] = concat(&t.t5, &t.t4);
        memo[base + 9] = concat(&t.t5, &t.t1);
        memo[base + 10] = concat(&t.t5, &t.t0);
        memo[base + 11] = concat(&t.t5, &t.t2);
        memo[base + 12] = concat(&t.t2, &t.t3);
        memo[base + 13] = concat(&t.t2, &t.t4);
        memo[base + 14] = concat(&t.t0, &t.t1);
        memo[base + 5] = concat(&t.t0, &t.t3);

        current = t.t0;
    }

    current
}

fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}
