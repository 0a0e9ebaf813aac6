//! Password handling for rotoxor encryption.

use zeroize::Zeroizing;

/// A password for file encryption/decryption.
///
/// Unlike text passwords in most schemes, the password hash construction
/// this crate implements treats the password as an arbitrary byte string
/// (see [`crate::hash::hash_password`]), so this type stores raw bytes
/// rather than a `String`.
#[derive(Clone)]
pub struct Password {
    inner: Zeroizing<Vec<u8>>,
}

impl Password {
    /// Creates a new password from anything convertible to a byte vector.
    pub fn new<B: Into<Vec<u8>>>(password: B) -> Self {
        Self {
            inner: Zeroizing::new(password.into()),
        }
    }

    /// Returns the password as raw bytes, as consumed by the hash construction.
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Returns true if the password is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the length of the password in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't expose the actual password in debug output.
        f.debug_struct("Password")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&[u8]> for Password {
    fn from(b: &[u8]) -> Self {
        Self::new(b.to_vec())
    }
}
