//! Boundary operations for the request layer
//!
//! [`compute_santas`] runs a whole draw for the admin and hands back one token
//! per giver. [`check_assignment`] is what a participant hits later with their
//! name and token. Both take the passphrase explicitly.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::crypto::{Passphrase, Reveal, Token, TokenError};
use crate::pairing::{derange, PairingError};
use crate::participant::{normalize, Participant};

#[derive(Debug, thiserror::Error)]
pub enum SantaError {
    #[error("Invalid admin password")]
    Unauthorized,
    #[error(transparent)]
    Pairing(#[from] PairingError),
    #[error("failed to seal token: {0}")]
    Token(#[from] TokenError),
    #[error("token task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One giver and the token that reveals their recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub giver: Participant,
    pub token: Token,
}

/// Gate the admin draw on the shared passphrase.
///
/// Unlike token checks this reports an explicit error, and an unset
/// passphrase never authorizes anyone.
pub fn authorize_admin(supplied: &str, passphrase: &Passphrase) -> Result<(), SantaError> {
    if passphrase.is_empty() || !passphrase.verify(supplied) {
        tracing::warn!("admin authorization failed");
        return Err(SantaError::Unauthorized);
    }
    Ok(())
}

/// Run a full draw: deduplicate, derange, and seal one token per giver.
///
/// Sealing fans out onto the blocking pool, one task per pair, and the batch
/// is joined before returning; the derived key is the only shared state.
/// Output follows the order participants were listed in. Must be called from
/// within a tokio runtime.
pub async fn compute_santas<S>(
    participants: &[S],
    passphrase: &Passphrase,
) -> Result<Vec<Assignment>, SantaError>
where
    S: AsRef<str>,
{
    let participants = normalize(participants);
    let pairing = derange(&participants)?;
    let secret = Arc::new(passphrase.derive_secret());

    tracing::info!(
        participants = pairing.len(),
        key = %passphrase.fingerprint(),
        "computing santas"
    );

    let tasks = pairing.into_iter().map(|(giver, recipient)| {
        let secret = Arc::clone(&secret);
        tokio::task::spawn_blocking(move || {
            let token = Token::seal(&giver, &recipient, &secret)?;
            Ok::<_, TokenError>(Assignment { giver, token })
        })
    });

    let mut assignments = Vec::with_capacity(participants.len());
    for joined in join_all(tasks).await {
        assignments.push(joined??);
    }
    Ok(assignments)
}

/// Reveal the recipient for `giver`, or [`Reveal::Invalid`].
///
/// Stateless and side-effect free; safe to call any number of times.
pub fn check_assignment(giver: &str, token: &str, passphrase: &Passphrase) -> Reveal {
    Token::from(token).open(giver, &passphrase.derive_secret())
}
