//! Derangement of participants
//!
//! Every participant gives to exactly one other participant and receives from
//! exactly one other participant. Nobody draws themselves.
//!
//! The draw is generate-and-test: shuffle a copy of the list and accept it if
//! no position still holds its original name. Roughly 1/e of uniform
//! permutations have no fixed point, so the expected number of shuffles is
//! about e for any realistic group size. The result is not uniform over all
//! derangements.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::participant::Participant;

/// Upper bound on shuffles before a draw is abandoned
pub const MAX_DERANGE_ATTEMPTS: usize = 500;

/// Smallest group that can be deranged
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PairingError {
    #[error("at least two unique participants are required, got {count}")]
    TooFewParticipants { count: usize },
    #[error("no valid pairing found after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// A complete giver -> recipient assignment with no self-assignment
///
/// Pairs are stored in the order the participants were given, not the order
/// produced by the shuffle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pairs: Vec<(Participant, Participant)>,
}

impl Pairing {
    pub fn iter(&self) -> impl Iterator<Item = (&Participant, &Participant)> {
        self.pairs.iter().map(|(giver, recipient)| (giver, recipient))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up who `giver` gives to
    pub fn recipient_of(&self, giver: &str) -> Option<&Participant> {
        self.pairs
            .iter()
            .find(|(g, _)| g.as_str() == giver)
            .map(|(_, r)| r)
    }

    pub fn into_pairs(self) -> Vec<(Participant, Participant)> {
        self.pairs
    }
}

impl IntoIterator for Pairing {
    type Item = (Participant, Participant);
    type IntoIter = std::vec::IntoIter<(Participant, Participant)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Derange `participants` using the thread-local RNG.
///
/// `participants` must already be deduplicated (see
/// [`crate::participant::normalize`]).
pub fn derange(participants: &[Participant]) -> Result<Pairing, PairingError> {
    derange_with(participants, &mut rand::rng())
}

/// Derange `participants` drawing randomness from `rng`.
pub fn derange_with<R>(participants: &[Participant], rng: &mut R) -> Result<Pairing, PairingError>
where
    R: Rng + ?Sized,
{
    if participants.len() < MIN_PARTICIPANTS {
        return Err(PairingError::TooFewParticipants {
            count: participants.len(),
        });
    }

    let mut shuffled = participants.to_vec();
    for attempt in 1..=MAX_DERANGE_ATTEMPTS {
        shuffled.shuffle(rng);
        if has_no_fixed_point(participants, &shuffled) {
            tracing::debug!(
                participants = participants.len(),
                attempts = attempt,
                "found derangement"
            );
            let pairs = participants.iter().cloned().zip(shuffled).collect();
            return Ok(Pairing { pairs });
        }
    }

    tracing::warn!(
        participants = participants.len(),
        attempts = MAX_DERANGE_ATTEMPTS,
        "giving up on derangement"
    );
    Err(PairingError::Exhausted {
        attempts: MAX_DERANGE_ATTEMPTS,
    })
}

fn has_no_fixed_point(original: &[Participant], shuffled: &[Participant]) -> bool {
    original.iter().zip(shuffled).all(|(a, b)| a != b)
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    use super::*;
    use crate::participant::normalize;

    /// Always yields the top of any range, so every shuffle is the identity
    struct Saturated;

    impl RngCore for Saturated {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xFF);
        }
    }

    fn assert_valid(participants: &[Participant], pairing: &Pairing) {
        assert_eq!(pairing.len(), participants.len());

        let givers: Vec<&Participant> = pairing.iter().map(|(g, _)| g).collect();
        let expected: Vec<&Participant> = participants.iter().collect();
        assert_eq!(givers, expected, "givers must keep insertion order");

        let recipients: HashSet<&Participant> = pairing.iter().map(|(_, r)| r).collect();
        assert_eq!(recipients.len(), participants.len(), "not a bijection");
        for p in participants {
            assert!(recipients.contains(p));
        }

        for (giver, recipient) in pairing.iter() {
            assert_ne!(giver, recipient, "{} drew themselves", giver);
        }
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(
            derange(&[]),
            Err(PairingError::TooFewParticipants { count: 0 })
        );
    }

    #[test]
    fn test_single_participant_is_rejected() {
        let participants = normalize(["Alice"]);
        assert_eq!(
            derange(&participants),
            Err(PairingError::TooFewParticipants { count: 1 })
        );
    }

    #[test]
    fn test_duplicates_of_one_name_are_rejected() {
        let participants = normalize(["Alice", " Alice", "Alice "]);
        assert_eq!(
            derange(&participants),
            Err(PairingError::TooFewParticipants { count: 1 })
        );
    }

    #[test]
    fn test_two_participants_swap() {
        let participants = normalize(["Alice", "Bob"]);
        let pairing = derange(&participants).unwrap();

        assert_eq!(pairing.recipient_of("Alice").unwrap().as_str(), "Bob");
        assert_eq!(pairing.recipient_of("Bob").unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_seeded_draw_is_reproducible() {
        let participants = normalize(["Alice", "Bob", "Carol", "Dave", "Eve"]);

        let a = derange_with(&participants, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = derange_with(&participants, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_valid(&participants, &a);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let participants = normalize(["Alice", "Bob", "Carol"]);
        assert_eq!(
            derange_with(&participants, &mut Saturated),
            Err(PairingError::Exhausted {
                attempts: MAX_DERANGE_ATTEMPTS
            })
        );
    }

    #[test]
    fn test_recipient_of_unknown_giver() {
        let participants = normalize(["Alice", "Bob", "Carol"]);
        let pairing = derange(&participants).unwrap();
        assert!(pairing.recipient_of("Mallory").is_none());
    }

    #[test]
    fn test_many_draws_are_valid() {
        let participants = normalize(["Alice", "Bob", "Carol"]);
        for _ in 0..200 {
            let pairing = derange(&participants).unwrap();
            assert_valid(&participants, &pairing);
        }
    }

    proptest! {
        #[test]
        fn prop_derangement_is_valid(
            names in proptest::collection::vec("[A-Za-z]{1,8}", 2..40),
            seed in any::<u64>(),
        ) {
            let participants = normalize(&names);
            prop_assume!(participants.len() >= MIN_PARTICIPANTS);

            let pairing = derange_with(&participants, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_valid(&participants, &pairing);
        }
    }
}
