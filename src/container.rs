//! Container format and metadata record (C7).
//!
//! Reads and writes the ZIP-embedded layout: a plaintext metadata
//! record (`filedata.crypt`), its verifier ciphertext
//! (`filedata_enc.crypt`), and the chunked payload
//! (`filedata_chunk_<N>.crypt`). Grounded on the teacher's
//! `format`/`write`/`read` entry-naming conventions, using the `zip`
//! crate in place of 7z framing.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Error, Result};
use crate::hash;
use crate::salt;
use crate::transform;

const ENTRY_PLAIN: &str = "filedata.crypt";
const ENTRY_VERIFY: &str = "filedata_enc.crypt";

/// A parsed metadata record: original basename, salt, cost, and verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub file: String,
    pub salt: Vec<u8>,
    pub cost: u32,
    pub hash_verify: Vec<u8>,
}

impl Metadata {
    /// Serializes the record into its four-line ASCII form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(format!("file : {}\n", self.file).as_bytes());
        out.extend_from_slice(b"salt : ");
        out.extend_from_slice(&self.salt);
        out.push(b'\n');
        out.extend_from_slice(format!("cost : {}\n", self.cost).as_bytes());
        out.extend_from_slice(b"hash_verify : ");
        out.extend_from_slice(&self.hash_verify);
        out.push(b'\n');
        out
    }

    /// Parses the four-line `"<key> : <value>\n"` record.
    fn parse(bytes: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes);
        let mut file = None;
        let mut salt = None;
        let mut cost = None;
        let mut hash_verify = None;

        for line in text.lines() {
            let Some((key, value)) = line.split_once(" : ") else {
                continue;
            };
            match key {
                "file" => file = Some(value.to_string()),
                "salt" => salt = Some(value.as_bytes().to_vec()),
                "cost" => cost = value.parse::<u32>().ok(),
                "hash_verify" => hash_verify = Some(value.as_bytes().to_vec()),
                _ => {}
            }
        }

        Ok(Metadata {
            file: file.ok_or_else(|| Error::MalformedContainer("missing `file` field".into()))?,
            salt: salt.ok_or_else(|| Error::MalformedContainer("missing `salt` field".into()))?,
            cost: cost.ok_or_else(|| Error::MalformedContainer("missing or unparsable `cost` field".into()))?,
            hash_verify: hash_verify
                .ok_or_else(|| Error::MalformedContainer("missing `hash_verify` field".into()))?,
        })
    }
}

/// Writes a complete encrypted container to `writer`.
///
/// `key` is the derived password hash (`C3(password, cost, salt)`), used
/// both to compute the verifier and to key the chunk transform.
pub fn write_container<W: Write + std::io::Seek>(
    writer: W,
    original_name: &str,
    payload: &[u8],
    password_key: &[u8],
    cost: u32,
    chunk_salt: &[u8],
) -> Result<()> {
    let verifier = hash::hash_password(password_key, cost, Some(chunk_salt));

    let metadata = Metadata {
        file: original_name.to_string(),
        salt: chunk_salt.to_vec(),
        cost,
        hash_verify: verifier,
    };
    let metadata_bytes = metadata.to_bytes();
    let metadata_enc = transform::forward(&metadata_bytes, password_key, 0);

    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::<()>::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(ENTRY_PLAIN, options)?;
    zip.write_all(&metadata_bytes)?;

    zip.start_file(ENTRY_VERIFY, options)?;
    zip.write_all(&metadata_enc)?;

    let chunks = crate::codec::encrypt_chunks(payload, password_key);
    for (idx, chunk) in chunks.iter().enumerate() {
        zip.start_file(chunk_entry_name(idx as u64), options)?;
        zip.write_all(chunk)?;
    }

    zip.finish()?;
    Ok(())
}

/// Reads and verifies an encrypted container, returning the decrypted
/// payload bytes.
///
/// Fails with [`Error::WrongPassword`] if the verifier doesn't match or
/// the decrypted `filedata_enc.crypt` entry doesn't reproduce the
/// plaintext metadata record.
pub fn read_container<R: Read + std::io::Seek>(reader: R, password_key_of: impl Fn(&[u8], u32) -> Vec<u8>) -> Result<(Metadata, Vec<u8>)> {
    let mut zip = ZipArchive::new(reader)?;

    let metadata_bytes = read_entry(&mut zip, ENTRY_PLAIN)?;
    let metadata = Metadata::parse(&metadata_bytes)?;

    let password_key = password_key_of(&metadata.salt, metadata.cost);

    let expected_verifier = hash::hash_password(&password_key, metadata.cost, Some(&metadata.salt));
    if expected_verifier != metadata.hash_verify {
        log::warn!("password verifier mismatch for container entry `{ENTRY_PLAIN}`");
        return Err(Error::WrongPassword);
    }

    let metadata_enc = read_entry(&mut zip, ENTRY_VERIFY)?;
    let decoded = transform::reverse(&metadata_enc, &password_key, 0);
    if !decoded.starts_with(&metadata_bytes) {
        log::warn!("decrypted `{ENTRY_VERIFY}` does not reproduce the plaintext metadata record");
        return Err(Error::WrongPassword);
    }

    let mut indexed_chunks = Vec::new();
    for i in 0..zip.len() {
        let name = zip.by_index(i)?.name().to_string();
        if let Some(idx) = parse_chunk_index(&name) {
            indexed_chunks.push(idx);
        }
    }
    indexed_chunks.sort_unstable();
    validate_contiguous(&indexed_chunks).inspect_err(|e| log::warn!("malformed chunk sequence: {e}"))?;
    log::debug!("reading {} chunk(s) from container", indexed_chunks.len());

    let mut chunks = Vec::with_capacity(indexed_chunks.len());
    for idx in &indexed_chunks {
        let bytes = read_entry(&mut zip, &chunk_entry_name(*idx))?;
        chunks.push((*idx, bytes));
    }

    let payload = crate::codec::decrypt_chunks(&chunks, &password_key);
    Ok((metadata, payload))
}

fn read_entry<R: Read + std::io::Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = zip
        .by_name(name)
        .map_err(|_| Error::MalformedContainer(format!("missing entry `{name}`")))?;
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn chunk_entry_name(idx: u64) -> String {
    format!("filedata_chunk_{idx}.crypt")
}

fn parse_chunk_index(name: &str) -> Option<u64> {
    let rest = name.strip_prefix("filedata_chunk_")?;
    let digits = rest.strip_suffix(".crypt")?;
    if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
        return None;
    }
    digits.parse::<u64>().ok()
}

fn validate_contiguous(indices: &[u64]) -> Result<()> {
    for (i, &idx) in indices.iter().enumerate() {
        if idx != i as u64 {
            return Err(Error::MalformedContainer(
                "chunk indices are not a contiguous range starting at 0".into(),
            ));
        }
    }
    Ok(())
}

/// Derives the basename used for the `file` metadata field.
pub fn basename_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Generates a fresh salt for a new encryption. Exposed here because C7
/// always needs one up front; see spec §9(b) for why this calls C1
/// directly rather than indirecting through C3("", 8, None).
pub fn generate_chunk_salt() -> Vec<u8> {
    salt::generate()
}
