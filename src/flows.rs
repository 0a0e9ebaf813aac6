//! Top-level encrypt/decrypt flows (C8).
//!
//! Wires the salt generator, password hasher, round transform, chunked
//! codec, and container format together end-to-end. This is the thin
//! facade most callers should use instead of reaching into the
//! individual modules directly, the way `zesven::Archive`/`Writer`
//! front the crate's lower-level codec and format modules.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::container;
use crate::error::Result;
use crate::hash;
use crate::password::Password;

/// Cost the reference CLI always uses for new encryptions; decrypt's
/// cost is taken from the container's metadata instead.
pub const DEFAULT_COST: u32 = 10;

/// Encrypts the file at `input_path` with `password`, writing the
/// resulting container to `output_path`.
///
/// A fresh random salt (C1) is generated for this call; encrypting the
/// same file with the same password twice produces different container
/// bytes each time.
pub fn encrypt_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    password: Password,
    output_path: Q,
) -> Result<()> {
    encrypt_file_with_cost(input_path, password, output_path, DEFAULT_COST)
}

/// As [`encrypt_file`], but with an explicit cost instead of
/// [`DEFAULT_COST`].
pub fn encrypt_file_with_cost<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    password: Password,
    output_path: Q,
    cost: u32,
) -> Result<()> {
    let input_path = input_path.as_ref();
    let payload = fs::read(input_path)?;
    let original_name = container::basename_of(input_path);
    log::debug!("encrypting {} ({} bytes) at cost {cost}", input_path.display(), payload.len());

    let chunk_salt = container::generate_chunk_salt();
    let password_key = hash::hash_password(password.as_bytes(), cost, Some(&chunk_salt));

    let output_file = fs::File::create(output_path)?;
    container::write_container(output_file, &original_name, &payload, &password_key, cost, &chunk_salt)?;
    Ok(())
}

/// Decrypts the container at `input_path` with `password`, writing the
/// recovered plaintext to `output_path`.
///
/// The cost used is whatever was stored in the container's metadata at
/// encryption time, not a caller-supplied value. Returns
/// [`crate::Error::WrongPassword`] (and writes nothing) if the password
/// doesn't match.
pub fn decrypt_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    password: Password,
    output_path: Q,
) -> Result<()> {
    let input_path = input_path.as_ref();
    log::debug!("decrypting {}", input_path.display());
    let input_file = fs::File::open(input_path)?;
    let password_bytes = password.as_bytes().to_vec();
    let (_metadata, plaintext) = container::read_container(input_file, move |salt, cost| {
        hash::hash_password(&password_bytes, cost, Some(salt))
    })?;

    fs::write(output_path, plaintext)?;
    Ok(())
}

/// Encrypts `payload` in memory, returning the full container bytes.
///
/// Useful for tests and for callers that don't want to touch the
/// filesystem directly.
pub fn encrypt_bytes(original_name: &str, payload: &[u8], password: &Password, cost: u32) -> Result<Vec<u8>> {
    let chunk_salt = container::generate_chunk_salt();
    let password_key = hash::hash_password(password.as_bytes(), cost, Some(&chunk_salt));

    let mut buf = Cursor::new(Vec::new());
    container::write_container(&mut buf, original_name, payload, &password_key, cost, &chunk_salt)?;
    Ok(buf.into_inner())
}

/// Decrypts a container held in memory, returning the recovered payload.
pub fn decrypt_bytes(container_bytes: &[u8], password: &Password) -> Result<Vec<u8>> {
    let password_bytes = password.as_bytes().to_vec();
    let (_metadata, plaintext) = container::read_container(Cursor::new(container_bytes), move |salt, cost| {
        hash::hash_password(&password_bytes, cost, Some(salt))
    })?;
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_in_memory() {
        let password = Password::new("password123");
        let payload = b"Hello, World!".to_vec();
        let container_bytes = encrypt_bytes("greeting.txt", &payload, &password, 4).unwrap();
        let decrypted = decrypt_bytes(&container_bytes, &password).unwrap();
        assert_eq!(decrypted, payload);
    }

    #[test]
    fn roundtrip_empty_payload() {
        let password = Password::new("pass");
        let payload: Vec<u8> = Vec::new();
        let container_bytes = encrypt_bytes("empty.bin", &payload, &password, 4).unwrap();
        let decrypted = decrypt_bytes(&container_bytes, &password).unwrap();
        assert_eq!(decrypted, payload);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let password = Password::new("intpass");
        let payload = b"Integrity test".to_vec();
        let container_bytes = encrypt_bytes("f.txt", &payload, &password, 4).unwrap();

        let wrong = Password::new("wrongpass");
        let result = decrypt_bytes(&container_bytes, &wrong);
        assert!(matches!(result, Err(crate::Error::WrongPassword)));
    }

    #[test]
    fn two_encryptions_of_same_input_differ_but_both_decrypt() {
        let password = Password::new("samepass");
        let payload = b"same content".to_vec();
        let a = encrypt_bytes("f.txt", &payload, &password, 4).unwrap();
        let b = encrypt_bytes("f.txt", &payload, &password, 4).unwrap();
        assert_ne!(a, b);
        assert_eq!(decrypt_bytes(&a, &password).unwrap(), payload);
        assert_eq!(decrypt_bytes(&b, &password).unwrap(), payload);
    }

    #[test]
    fn cost_is_read_from_metadata_not_caller() {
        let password = Password::new("Cost test");
        let payload = b"Cost test".to_vec();
        let low_cost = encrypt_bytes("f.txt", &payload, &password, 4).unwrap();
        let high_cost = encrypt_bytes("f.txt", &payload, &password, 6).unwrap();
        assert_eq!(decrypt_bytes(&low_cost, &password).unwrap(), payload);
        assert_eq!(decrypt_bytes(&high_cost, &password).unwrap(), payload);
    }

    #[test]
    fn binary_patterns_roundtrip() {
        let password = Password::new("binpass");
        for byte in [0x00u8, 0xFFu8] {
            let payload = vec![byte; 5000];
            let container_bytes = encrypt_bytes("bin.dat", &payload, &password, 4).unwrap();
            let decrypted = decrypt_bytes(&container_bytes, &password).unwrap();
            assert_eq!(decrypted, payload);
        }
    }
}
