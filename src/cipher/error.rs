// Lockbox — Cipher error types

use thiserror::Error;

use crate::vault::VaultError;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("No key exists for this identity — create one before sealing")]
    KeyNotFound,

    #[error("Ciphertext is not valid base64")]
    InvalidEncoding,

    #[error("Decrypted data is not valid UTF-8 — wrong key or corrupted ciphertext")]
    InvalidPlaintext,

    #[error("Vault error: {0}")]
    Vault(VaultError),
}
