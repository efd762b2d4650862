// Lockbox — Cipher Module
//
// Symmetric sealing/unsealing of credential fields under a per-identity
// key. Counter mode keeps ciphertexts deterministic for a given key/IV
// pair, which the stored format relies on; output is base64 text so it
// can travel through text-oriented transports and storage.

mod error;
mod service;

pub use error::CipherError;
pub use service::{CipherService, SealedCredential};
