use std::fmt;

use sha2::{Digest, Sha256};

use super::secret::{Secret, SECRET_SIZE};

/// The shared administrative passphrase
///
/// Every token of a draw is encrypted under a key derived from this value,
/// and the admin endpoint is gated on it. It is always passed in explicitly;
/// nothing in this crate reads it from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(passphrase.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive the AES-256-GCM key: SHA-256 over the UTF-8 bytes, no salt
    pub fn derive_secret(&self) -> Secret {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut bytes = [0u8; SECRET_SIZE];
        bytes.copy_from_slice(&digest);
        Secret::from(bytes)
    }

    /// Short hex tag identifying this passphrase in logs
    ///
    /// Hashes the derived key a second time so the tag is not the key prefix.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.derive_secret().bytes());
        hex::encode(&digest[..4])
    }

    /// Check an admin-supplied passphrase against this one
    pub fn verify(&self, candidate: &str) -> bool {
        let expected = Sha256::digest(self.0.as_bytes());
        let supplied = Sha256::digest(candidate.as_bytes());
        expected
            .iter()
            .zip(supplied.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Passphrase").field(&"<redacted>").finish()
    }
}

impl From<&str> for Passphrase {
    fn from(passphrase: &str) -> Self {
        Self::new(passphrase)
    }
}

impl From<String> for Passphrase {
    fn from(passphrase: String) -> Self {
        Self::new(passphrase)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_derive_secret_is_sha256() {
        let secret = Passphrase::new("secret").derive_secret();
        assert_eq!(
            hex::encode(secret.bytes()),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn test_derive_secret_is_stable() {
        let a = Passphrase::new("hunter2").derive_secret();
        let b = Passphrase::new("hunter2").derive_secret();
        let c = Passphrase::new("hunter3").derive_secret();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_verify() {
        let passphrase = Passphrase::new("secret");
        assert!(passphrase.verify("secret"));
        assert!(!passphrase.verify("Secret"));
        assert!(!passphrase.verify("secret "));
        assert!(!passphrase.verify(""));
    }

    #[test]
    fn test_debug_is_redacted() {
        let passphrase = Passphrase::new("do-not-print");
        let rendered = format!("{:?}", passphrase);
        assert!(!rendered.contains("do-not-print"));
    }

    #[test]
    fn test_fingerprint() {
        let a = Passphrase::new("secret").fingerprint();
        assert_eq!(a.len(), 8);
        assert_eq!(a, Passphrase::new("secret").fingerprint());
        assert_ne!(a, Passphrase::new("other").fingerprint());
    }
}
