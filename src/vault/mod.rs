// Lockbox — Vault Module
//
// Durable per-identity key storage. Each identity token maps to exactly
// one symmetric key/IV pair, written to a file addressed by a one-way
// hash of the token so the token itself is never recoverable from the
// directory layout.

mod error;
mod keystore;

pub use error::VaultError;
pub use keystore::{FsKeyStore, KeyPair, KeyStore, IV_LEN, KEY_LEN};

#[cfg(test)]
pub use keystore::mock;
