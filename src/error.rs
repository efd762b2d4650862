// Lockbox — Top-level error types
//
// Aggregates errors from the vault and cipher modules into a single
// error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all Lockbox operations.
#[derive(Debug, Error)]
pub enum LockboxError {
    #[error("Vault error: {0}")]
    Vault(#[from] crate::vault::VaultError),

    #[error("Cipher error: {0}")]
    Cipher(#[from] crate::cipher::CipherError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LockboxError>;
