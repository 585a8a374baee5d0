//! Assignment tokens
//!
//! A token is the sealed `{giver, recipient}` record a participant receives
//! out of band and later presents with their name.
//!
//! # Wire Format
//!
//! ```text
//! percent_encode( base64( nonce: 12 bytes || AES-256-GCM(json record) || tag: 16 bytes ) )
//! ```
//!
//! The record is `{"W": <giver>, "C": <recipient>}`. Percent-encoding uses the
//! same unreserved set as JavaScript's `encodeURIComponent`, so a token can be
//! dropped into a query string or form field as is.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::secret::{Secret, SecretError};

/// Characters left unescaped by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Reasons a token fails to open
///
/// These never leave this crate's boundary operations: callers only see
/// [`Reveal::Invalid`]. They exist for debug logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("secret error: {0}")]
    Secret(#[from] SecretError),
    #[error("record error: {0}")]
    Record(#[from] serde_json::Error),
    #[error("token was issued for a different giver")]
    GiverMismatch,
}

/// The plaintext sealed inside a token
#[derive(Debug, Serialize, Deserialize)]
struct AssignmentRecord {
    #[serde(rename = "W")]
    giver: String,
    #[serde(rename = "C")]
    recipient: String,
}

/// Outcome of presenting a token
///
/// The single failure variant carries no reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    Recipient(String),
    Invalid,
}

impl Reveal {
    pub fn recipient(&self) -> Option<&str> {
        match self {
            Reveal::Recipient(name) => Some(name),
            Reveal::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Reveal::Recipient(_))
    }

    pub fn into_recipient(self) -> Option<String> {
        match self {
            Reveal::Recipient(name) => Some(name),
            Reveal::Invalid => None,
        }
    }
}

/// An opaque, URL-safe assignment token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Seal `giver -> recipient` under `secret`.
    ///
    /// Every call draws a fresh nonce, so sealing the same pair twice gives
    /// two different tokens that both open to the same recipient.
    pub fn seal(giver: &str, recipient: &str, secret: &Secret) -> Result<Self, TokenError> {
        let record = AssignmentRecord {
            giver: giver.to_string(),
            recipient: recipient.to_string(),
        };
        let plaintext = serde_json::to_vec(&record)?;
        let sealed = secret.encrypt(&plaintext)?;
        let encoded = STANDARD.encode(sealed);

        Ok(Self(utf8_percent_encode(&encoded, URI_COMPONENT).to_string()))
    }

    /// Open the token on behalf of `claimed_giver`.
    ///
    /// Returns the recipient only if the token authenticates under `secret`
    /// and was issued for exactly this giver (after trimming whitespace).
    pub fn open(&self, claimed_giver: &str, secret: &Secret) -> Reveal {
        match self.try_open(claimed_giver, secret) {
            Ok(recipient) => Reveal::Recipient(recipient),
            Err(e) => {
                tracing::debug!(reason = %e, "token rejected");
                Reveal::Invalid
            }
        }
    }

    fn try_open(&self, claimed_giver: &str, secret: &Secret) -> Result<String, TokenError> {
        let normalized = normalize_transport(&self.0);
        let sealed = STANDARD.decode(normalized)?;
        let plaintext = secret.decrypt(&sealed)?;
        let record: AssignmentRecord = serde_json::from_slice(&plaintext)?;

        if record.giver != claimed_giver.trim() {
            return Err(TokenError::GiverMismatch);
        }
        Ok(record.recipient)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Undo whatever a URL, form or mail client did to a token on its way back.
///
/// - percent-escapes are decoded; if that does not yield valid UTF-8 the
///   input is kept as is, and malformed escapes are left untouched
/// - spaces (a decoded `+`) become `+` again
/// - URL-safe base64 (`-`, `_`) is mapped to the standard alphabet
/// - `=` padding is restored to a multiple of four
pub fn normalize_transport(raw: &str) -> String {
    let raw = raw.trim();
    let mut s = match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    };

    s = s.replace(' ', "+");
    if s.contains(['-', '_']) {
        s = s.replace('-', "+").replace('_', "/");
    }
    while s.len() % 4 != 0 {
        s.push('=');
    }
    s
}
