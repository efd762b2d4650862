// Lockbox — Vault error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("No key record exists for this identity — create one first")]
    NotFound,

    #[error("Key record is corrupt: {0}")]
    Corrupt(String),

    #[error("A key record already exists for this identity")]
    KeyExists,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
