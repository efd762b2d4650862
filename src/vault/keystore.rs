// Lockbox — Identity Key Store
//
// Maps an opaque identity token to a durable symmetric key/IV pair.
// The storage address is a one-way hash of the token, sanitized to a
// filesystem-safe alphabet. Records are claimed with an atomic
// create-if-absent open: concurrent creators race safely, the loser
// sees `KeyExists`, and existing key material is never overwritten.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::VaultError;

// ─── Constants ───────────────────────────────────────────────────────────────

/// Symmetric key length in bytes (128-bit AES).
pub const KEY_LEN: usize = 16;

/// Initialization vector length in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Separator between the key and IV fields of a stored record.
const RECORD_SEPARATOR: char = ',';

/// Replacement for storage-address characters outside `[A-Za-z0-9._-]`.
const ADDRESS_PLACEHOLDER: char = 'a';

// ─── Key pair ────────────────────────────────────────────────────────────────

/// A decoded key/IV pair for one identity.
pub struct KeyPair {
    /// Raw AES-128 key bytes. Zeroized on drop.
    pub key: Zeroizing<[u8; KEY_LEN]>,
    /// Counter-mode initialization vector, stored and handled alongside
    /// the key.
    pub iv: [u8; IV_LEN],
}

/// Custom Debug implementation that NEVER reveals key material.
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over per-identity key storage, enabling the filesystem
/// backend and an in-memory implementation for testing.
pub trait KeyStore {
    /// Generate and durably store a fresh key/IV pair for the token.
    /// Fails with [`VaultError::KeyExists`] if a record already exists:
    /// overwriting a key would strand every credential sealed under it.
    fn create_key(&self, token: &str) -> Result<(), VaultError>;

    /// Look up the key/IV pair for the token.
    fn key_pair(&self, token: &str) -> Result<KeyPair, VaultError>;

    /// Remove the token's key record. Returns whether a record existed.
    /// WARNING: deleting a key permanently strands every credential
    /// sealed under it.
    fn delete_key(&self, token: &str) -> Result<bool, VaultError>;

    /// Check whether a key record exists for the token.
    fn contains(&self, token: &str) -> Result<bool, VaultError>;
}

// ─── Filesystem Implementation ───────────────────────────────────────────────

/// Key store backed by one file per identity under a root directory.
///
/// Each operation opens, reads or writes, and closes its record
/// independently; no lock or cache is held between calls.
pub struct FsKeyStore {
    root: PathBuf,
}

impl FsKeyStore {
    /// Create a store rooted at `root`. The directory itself is created
    /// lazily by the first `create_key` call.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the storage address for a token: base64 of SHA-256(token),
    /// with every character outside `[A-Za-z0-9._-]` replaced so the
    /// result is a valid file name on all platforms. Collisions across
    /// distinct tokens are cryptographically negligible.
    fn address(&self, token: &str) -> PathBuf {
        let digest = Sha256::digest(token.as_bytes());
        let sanitized: String = STANDARD
            .encode(digest)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    ADDRESS_PLACEHOLDER
                }
            })
            .collect();
        self.root.join(sanitized)
    }

    /// Parse a stored record line into a decoded key pair.
    /// Anything that does not split into exactly two well-formed fields
    /// is `Corrupt` — a torn read of an in-flight record must never
    /// surface as partial success.
    fn parse_record(raw: &str) -> Result<KeyPair, VaultError> {
        let line = raw.lines().next().unwrap_or("");
        let mut fields = line.split(RECORD_SEPARATOR);
        let (key_b64, iv_b64) = match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(iv), None) => (key, iv),
            _ => {
                return Err(VaultError::Corrupt(
                    "record does not split into exactly two fields".to_string(),
                ))
            }
        };

        let key_bytes = STANDARD
            .decode(key_b64)
            .map_err(|_| VaultError::Corrupt("key field is not valid base64".to_string()))?;
        let iv_bytes = STANDARD
            .decode(iv_b64)
            .map_err(|_| VaultError::Corrupt("iv field is not valid base64".to_string()))?;

        let key: [u8; KEY_LEN] = key_bytes
            .try_into()
            .map_err(|_| VaultError::Corrupt(format!("key field is not {} bytes", KEY_LEN)))?;
        let iv: [u8; IV_LEN] = iv_bytes
            .try_into()
            .map_err(|_| VaultError::Corrupt(format!("iv field is not {} bytes", IV_LEN)))?;

        Ok(KeyPair {
            key: Zeroizing::new(key),
            iv,
        })
    }
}

impl KeyStore for FsKeyStore {
    fn create_key(&self, token: &str) -> Result<(), VaultError> {
        fs::create_dir_all(&self.root)?;
        let path = self.address(token);

        // Claim the address atomically. Losing a creation race, or a
        // second create call for the same token, must never replace
        // existing key material.
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(VaultError::KeyExists)
            }
            Err(e) => return Err(e.into()),
        };

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(key.as_mut_slice());
        OsRng.fill_bytes(&mut iv);

        let record = format!(
            "{}{}{}",
            STANDARD.encode(key.as_slice()),
            RECORD_SEPARATOR,
            STANDARD.encode(iv)
        );
        file.write_all(record.as_bytes())?;
        file.sync_all()?;

        tracing::info!("Identity key created");
        Ok(())
    }

    fn key_pair(&self, token: &str) -> Result<KeyPair, VaultError> {
        let raw = match fs::read_to_string(self.address(token)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(VaultError::NotFound),
            Err(e) => return Err(e.into()),
        };
        Self::parse_record(&raw)
    }

    fn delete_key(&self, token: &str) -> Result<bool, VaultError> {
        match fs::remove_file(self.address(token)) {
            Ok(()) => {
                tracing::info!("Identity key deleted — its sealed credentials are now unrecoverable");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, token: &str) -> Result<bool, VaultError> {
        Ok(self.address(token).exists())
    }
}

// ─── In-Memory Mock for Testing ──────────────────────────────────────────────

/// A mock store that keeps key pairs in memory.
/// Used by cipher unit tests so they don't touch the filesystem.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub struct MemoryKeyStore {
        records: Mutex<HashMap<String, ([u8; KEY_LEN], [u8; IV_LEN])>>,
    }

    impl MemoryKeyStore {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
            }
        }
    }

    impl KeyStore for MemoryKeyStore {
        fn create_key(&self, token: &str) -> Result<(), VaultError> {
            let mut guard = self.records.lock().unwrap();
            if guard.contains_key(token) {
                return Err(VaultError::KeyExists);
            }
            let mut key = [0u8; KEY_LEN];
            let mut iv = [0u8; IV_LEN];
            OsRng.fill_bytes(&mut key);
            OsRng.fill_bytes(&mut iv);
            guard.insert(token.to_string(), (key, iv));
            Ok(())
        }

        fn key_pair(&self, token: &str) -> Result<KeyPair, VaultError> {
            match self.records.lock().unwrap().get(token) {
                Some((key, iv)) => Ok(KeyPair {
                    key: Zeroizing::new(*key),
                    iv: *iv,
                }),
                None => Err(VaultError::NotFound),
            }
        }

        fn delete_key(&self, token: &str) -> Result<bool, VaultError> {
            Ok(self.records.lock().unwrap().remove(token).is_some())
        }

        fn contains(&self, token: &str) -> Result<bool, VaultError> {
            Ok(self.records.lock().unwrap().contains_key(token))
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
