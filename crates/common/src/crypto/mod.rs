//! Cryptographic primitives for wichtel
//!
//! This module binds a (giver, recipient) assignment to the shared passphrase:
//!
//! - **Key derivation**: SHA-256 of the UTF-8 passphrase gives a 256-bit `Secret`
//! - **Encryption**: AES-256-GCM with a fresh random 96-bit nonce per token
//! - **Transport**: `nonce || ciphertext || tag`, base64, then percent-encoded
//!
//! # Security Model
//!
//! The passphrase is a single administrative secret. Anyone holding it can
//! read every assignment; that is accepted. Without it a token reveals nothing
//! and cannot be forged or altered undetected.
//!
//! A token only opens for the giver it was issued to. Every way a token can
//! fail to open (bad encoding, wrong passphrase, tampering, wrong giver)
//! collapses into [`Reveal::Invalid`], so callers learn nothing about which
//! check failed.
//!
//! Tokens carry no format version. Changing any of the above makes tokens
//! already handed out undecryptable.

mod passphrase;
mod secret;
mod token;

pub use passphrase::Passphrase;
pub use secret::{Secret, SecretError, NONCE_SIZE, SECRET_SIZE, TAG_SIZE};
pub use token::{normalize_transport, Reveal, Token, TokenError};
