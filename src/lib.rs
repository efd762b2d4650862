// Lockbox — Library root
//
// Re-exports the vault, cipher, generator, and CLI modules.

pub mod cipher;
pub mod cli;
pub mod error;
pub mod generator;
pub mod validation;
pub mod vault;

pub use cipher::{CipherService, SealedCredential};
pub use error::{LockboxError, Result};
pub use generator::generate_password;
pub use vault::{FsKeyStore, KeyStore};
