//! Error types for rotoxor encrypt/decrypt operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when hashing passwords, transforming bytes, or reading
//! and writing encrypted containers, along with a convenient [`Result<T>`]
//! type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`. Handle
//! errors with the `?` operator or by matching on specific variants:
//!
//! ```rust,no_run
//! use rotoxor::{Error, Password};
//!
//! fn decrypt(path: &str, password: &str) -> rotoxor::Result<()> {
//!     match rotoxor::decrypt_file(path, Password::new(password), "out.bin") {
//!         Ok(()) => Ok(()),
//!         Err(e @ Error::WrongPassword) => {
//!             eprintln!("incorrect password");
//!             Err(e)
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::io;

/// The main error type for rotoxor operations.
///
/// Each variant corresponds to one of the failure kinds described by the
/// container format: I/O failure, a rejected password, or a container that
/// doesn't have the shape this crate expects.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file or container operations.
    ///
    /// This wraps [`std::io::Error`] and covers file-not-found, permission
    /// errors, disk-full conditions, and failures reading or writing the
    /// ZIP container itself.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The supplied password does not match the container's verifier.
    ///
    /// Returned both when the double-hashed verifier comparison fails and
    /// when the decrypted `filedata_enc.crypt` entry does not reproduce the
    /// plaintext metadata record.
    #[error("Wrong password")]
    WrongPassword,

    /// The container is missing required entries or its entries don't form
    /// a well-formed chunk sequence.
    ///
    /// This covers a missing `filedata.crypt`/`filedata_enc.crypt` entry, a
    /// metadata record that doesn't parse as four `key : value` lines, or
    /// chunk entries whose indices aren't a contiguous range starting at 0.
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// The ZIP container itself could not be opened or is not a valid ZIP.
    #[error("Invalid ZIP archive: {0}")]
    InvalidZip(#[from] zip::result::ZipError),
}

/// A specialized [`Result`] type for rotoxor operations.
pub type Result<T> = std::result::Result<T, Error>;
