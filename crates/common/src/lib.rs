/**
 * Cryptographic types and operations.
 *  - Passphrase-derived AES-256-GCM secrets
 *  - Assignment tokens and their transport encoding
 */
pub mod crypto;
/**
 * Derangement of a participant list: every
 *  giver gets a recipient that is not themselves.
 */
pub mod pairing;
/**
 * Participant identifiers and the normalization
 *  applied to admin-supplied name lists.
 */
pub mod participant;
/**
 * The two boundary operations the request layer calls:
 *  computing a full draw and checking one assignment.
 */
pub mod santa;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::crypto::{Passphrase, Reveal, Secret, Token};
    pub use crate::pairing::{derange, Pairing, PairingError};
    pub use crate::participant::Participant;
    pub use crate::santa::{
        authorize_admin, check_assignment, compute_santas, Assignment, SantaError,
    };
    pub use crate::version::build_info;
}
