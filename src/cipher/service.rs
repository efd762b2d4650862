// Lockbox — Cipher Service
//
// Seals and unseals credential fields (tail, password, scopes) with
// AES-128-CTR under the owning identity's key/IV pair. Every field is
// encrypted with a fresh keystream starting at the stored IV, so equal
// plaintexts under the same identity produce equal ciphertexts — the
// stored format depends on this, do not switch to a randomized mode.

use aes::Aes128;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::vault::{KeyPair, KeyStore, VaultError};

use super::CipherError;

type Aes128Ctr = Ctr128BE<Aes128>;

/// Placeholder sealed in place of an absent scopes value, so the stored
/// ciphertext is never empty.
const EMPTY_SCOPES_PLACEHOLDER: &str = " ";

/// The encrypted projection of a credential: three independently sealed,
/// base64-encoded fields. Decrypts correctly only under the exact
/// key/IV pair that sealed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedCredential {
    pub tail: String,
    pub password: String,
    pub scopes: String,
}

/// Seals and unseals credential fields against a borrowed key store.
pub struct CipherService<'a, S: KeyStore> {
    keystore: &'a S,
}

impl<'a, S: KeyStore> CipherService<'a, S> {
    pub fn new(keystore: &'a S) -> Self {
        Self { keystore }
    }

    /// Seal a credential triple under the token's key.
    ///
    /// A missing `scopes` value is normalized to a single-space
    /// placeholder before sealing. Creating the key on first use is the
    /// caller's responsibility, not this operation's: a missing key is
    /// [`CipherError::KeyNotFound`].
    pub fn seal_triple(
        &self,
        token: &str,
        tail: &str,
        password: &str,
        scopes: Option<&str>,
    ) -> Result<SealedCredential, CipherError> {
        let pair = self.key_pair(token)?;
        let scopes = scopes.unwrap_or(EMPTY_SCOPES_PLACEHOLDER);

        let sealed = SealedCredential {
            tail: Self::seal_field(&pair, tail),
            password: Self::seal_field(&pair, password),
            scopes: Self::seal_field(&pair, scopes),
        };

        tracing::debug!("Credential sealed");
        Ok(sealed)
    }

    /// Unseal a password/scopes pair.
    pub fn unseal_pair(
        &self,
        token: &str,
        password_ct: &str,
        scopes_ct: &str,
    ) -> Result<(Zeroizing<String>, String), CipherError> {
        let pair = self.key_pair(token)?;
        let password = Zeroizing::new(Self::unseal_field(&pair, password_ct)?);
        let scopes = Self::unseal_field(&pair, scopes_ct)?;
        Ok((password, scopes))
    }

    /// Unseal a full credential, tail included.
    pub fn unseal_triple(
        &self,
        token: &str,
        sealed: &SealedCredential,
    ) -> Result<(String, Zeroizing<String>, String), CipherError> {
        let pair = self.key_pair(token)?;
        let tail = Self::unseal_field(&pair, &sealed.tail)?;
        let password = Zeroizing::new(Self::unseal_field(&pair, &sealed.password)?);
        let scopes = Self::unseal_field(&pair, &sealed.scopes)?;
        Ok((tail, password, scopes))
    }

    /// Unseal a batch of password/scopes pairs with a single key lookup.
    /// Pairing and order are preserved; the first entry that fails to
    /// decode aborts the whole batch — decryption failures are never
    /// tolerated silently.
    pub fn unseal_many(
        &self,
        token: &str,
        entries: &[(String, String)],
    ) -> Result<Vec<(Zeroizing<String>, String)>, CipherError> {
        let pair = self.key_pair(token)?;

        let mut unsealed = Vec::with_capacity(entries.len());
        for (password_ct, scopes_ct) in entries {
            let password = Zeroizing::new(Self::unseal_field(&pair, password_ct)?);
            let scopes = Self::unseal_field(&pair, scopes_ct)?;
            unsealed.push((password, scopes));
        }

        tracing::debug!(count = unsealed.len(), "Credential batch unsealed");
        Ok(unsealed)
    }

    /// Fetch the identity's key pair, mapping a missing record to
    /// [`CipherError::KeyNotFound`].
    fn key_pair(&self, token: &str) -> Result<KeyPair, CipherError> {
        match self.keystore.key_pair(token) {
            Ok(pair) => Ok(pair),
            Err(VaultError::NotFound) => Err(CipherError::KeyNotFound),
            Err(e) => Err(CipherError::Vault(e)),
        }
    }

    fn seal_field(pair: &KeyPair, plaintext: &str) -> String {
        let mut buf = plaintext.as_bytes().to_vec();
        Self::apply_keystream(pair, &mut buf);
        STANDARD.encode(buf)
    }

    fn unseal_field(pair: &KeyPair, ciphertext: &str) -> Result<String, CipherError> {
        let mut buf = STANDARD
            .decode(ciphertext)
            .map_err(|_| CipherError::InvalidEncoding)?;
        Self::apply_keystream(pair, &mut buf);
        String::from_utf8(buf).map_err(|_| CipherError::InvalidPlaintext)
    }

    fn apply_keystream(pair: &KeyPair, data: &mut [u8]) {
        let mut cipher = Aes128Ctr::new((&*pair.key).into(), (&pair.iv).into());
        cipher.apply_keystream(data);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
