//! # rotoxor
//!
//! Password-based file encryption via a custom iterated hash construction
//! and a keyed rotate-and-XOR chunk cipher, packaged inside a ZIP
//! container.
//!
//! This is **not** a cryptographically secure scheme: there is no
//! authenticated encryption and no integrity MAC beyond the stored
//! verifier comparison. The properties it provides are functional —
//! determinism, reversibility, and password verification — not
//! confidentiality against a capable adversary.
//!
//! ## Quick Start
//!
//! ### Encrypting a file
//!
//! ```rust,no_run
//! use rotoxor::{Password, Result};
//!
//! fn main() -> Result<()> {
//!     rotoxor::encrypt_file("plain.txt", Password::new("hunter2"), "plain.txt.enc")?;
//!     Ok(())
//! }
//! ```
//!
//! ### Decrypting a file
//!
//! ```rust,no_run
//! use rotoxor::{Password, Result};
//!
//! fn main() -> Result<()> {
//!     rotoxor::decrypt_file("plain.txt.enc", Password::new("hunter2"), "plain.txt")?;
//!     Ok(())
//! }
//! ```
//!
//! ### Hashing a password directly
//!
//! ```rust
//! use rotoxor::hash_password;
//!
//! let hash = hash_password(b"hunter2", 8, Some(b"aFixedSaltOf16Ch"));
//! assert!(hash.starts_with(b"$"));
//! ```

mod codec;
mod container;
mod error;
mod flows;
mod hash;
mod password;
mod salt;
mod transform;

pub use error::{Error, Result};
pub use flows::{DEFAULT_COST, decrypt_bytes, decrypt_file, encrypt_bytes, encrypt_file, encrypt_file_with_cost};
pub use hash::hash_password;
pub use password::Password;

/// Byte-level primitives and the keyed round transform (C4 + C5),
/// exposed for callers who want to drive the cipher directly rather
/// than through [`encrypt_file`]/[`decrypt_file`].
pub mod transform_internals {
    pub use crate::transform::{forward, reverse, rotate_left, rotate_right, xor_bytes};
}

/// Salt generation (C1), exposed for callers who want a fresh salt
/// without driving the full hasher.
pub mod salt_internals {
    pub use crate::salt::{SALT_LEN, generate};
}
