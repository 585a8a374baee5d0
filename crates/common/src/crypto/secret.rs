//! Content encryption using AES-256-GCM
//!
//! A `Secret` is the key every token of one draw is sealed under. It is never
//! generated at random: it always comes from [`super::Passphrase::derive_secret`],
//! so the same passphrase opens the tokens later.

use std::ops::Deref;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;
/// Size of the AES-256 key in bytes (256 bits)
pub const SECRET_SIZE: usize = 32;
/// Size of the GCM authentication tag appended to the ciphertext
pub const TAG_SIZE: usize = 16;

/// Errors that can occur during encryption/decryption
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("data too short for nonce: {0} bytes")]
    TooShort(usize),
    #[error("failed to generate nonce: {0}")]
    Rng(getrandom::Error),
    #[error("encrypt error")]
    Encrypt,
    #[error("decrypt error")]
    Decrypt,
}

/// A 256-bit symmetric key for AES-256-GCM
///
/// The encrypted format is: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
/// The nonce length is fixed, so no length prefix is needed to split it off.
///
/// # Examples
///
/// ```ignore
/// let secret = Passphrase::new("secret").derive_secret();
///
/// let ciphertext = secret.encrypt(b"sensitive data")?;
/// let recovered = secret.decrypt(&ciphertext)?;
/// assert_eq!(b"sensitive data", &recovered[..]);
/// ```
#[derive(PartialEq, Eq, Clone)]
pub struct Secret([u8; SECRET_SIZE]);

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(..)")
    }
}

impl Deref for Secret {
    type Target = [u8; SECRET_SIZE];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; SECRET_SIZE]> for Secret {
    fn from(bytes: [u8; SECRET_SIZE]) -> Self {
        Secret(bytes)
    }
}

impl Secret {
    /// Get a reference to the secret key bytes
    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.bytes()))
    }

    /// Encrypt data using AES-256-GCM
    ///
    /// A random nonce is generated for each call, so encrypting the same
    /// plaintext twice yields two different outputs.
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce_bytes).map_err(SecretError::Rng)?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher()
            .encrypt(nonce, data)
            .map_err(|_| SecretError::Encrypt)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(nonce.as_ref());
        out.extend_from_slice(ciphertext.as_ref());

        Ok(out)
    }

    /// Decrypt data using AES-256-GCM
    ///
    /// Expects input in the format: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Data is too short to contain a nonce
    /// - Authentication tag verification fails (data was tampered with or wrong key)
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecretError> {
        if data.len() < NONCE_SIZE {
            return Err(SecretError::TooShort(data.len()));
        }

        let (nonce, ciphertext) = data.split_at(NONCE_SIZE);
        self.cipher()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| SecretError::Decrypt)
    }
}
