//! Fitness function for candidate passphrases.
//!
//! A candidate is scored by replaying the full key-derivation chain against
//! the captured handshake and counting how many bits of the resulting tag
//! agree with the captured one. Scores land in `[0, PERFECT_SCORE]` and only
//! `PERFECT_SCORE` identifies the passphrase.
//!
//! The tag construction cascades every input bit, so near-miss candidates do
//! not produce near-miss tags: any wrong passphrase scores like a random
//! 128-bit draw, clustered around 64. The metric is retained as the search
//! objective, but partial scores carry no direction toward the answer.

use crate::crypto::{self, CryptoError, TAG_LEN};
use crate::schema::HandshakeDescriptor;

/// Score of a candidate whose derived tag matches the captured tag exactly.
pub const PERFECT_SCORE: u32 = (TAG_LEN * 8) as u32;

/// Bitwise similarity between two equal-length byte strings.
///
/// Each byte contributes `8 - popcount(a ^ b)`, so identical inputs score
/// `8 * len` and complementary inputs score zero.
pub fn hamming_similarity(a: &[u8], b: &[u8]) -> u32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| 8 - (x ^ y).count_ones())
        .sum()
}

/// Candidate evaluation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Scores candidate passphrases against one captured handshake.
pub struct FitnessEvaluator {
    descriptor: HandshakeDescriptor,
}

impl FitnessEvaluator {
    /// Create an evaluator bound to a handshake descriptor.
    pub fn new(descriptor: HandshakeDescriptor) -> Self {
        Self { descriptor }
    }

    /// The handshake this evaluator scores against.
    pub fn descriptor(&self) -> &HandshakeDescriptor {
        &self.descriptor
    }

    /// Run the derivation chain for `candidate` and compare tags.
    pub fn try_score(&self, candidate: &str) -> Result<u32, EvaluationError> {
        let master_key = crypto::derive_master_key(candidate, &self.descriptor.ssid)?;
        let pairwise_key = crypto::derive_pairwise_key(
            &master_key,
            &self.descriptor.ap_mac,
            &self.descriptor.client_mac,
            &self.descriptor.anonce,
            &self.descriptor.snonce,
        )?;
        let tag = crypto::compute_tag(&pairwise_key, &self.descriptor.eapol_frame)?;

        Ok(hamming_similarity(&tag, &self.descriptor.real_mic))
    }

    /// Score a candidate, mapping evaluation failures to the worst score.
    ///
    /// Failures are logged rather than silently swallowed so a systematic
    /// problem shows up in the output instead of masquerading as bad luck.
    pub fn score(&self, candidate: &str) -> u32 {
        match self.try_score(candidate) {
            Ok(score) => score,
            Err(err) => {
                log::warn!("candidate evaluation failed, scoring 0: {err}");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_descriptor(passphrase: &str) -> HandshakeDescriptor {
        HandshakeDescriptor::synthesize(
            passphrase,
            b"TestNetwork",
            [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
            [0x10; 32],
            [0x20; 32],
            vec![0x02; 121],
        )
        .unwrap()
    }

    #[test]
    fn test_hamming_similarity_identical() {
        let a = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(hamming_similarity(&a, &a), 32);
    }

    #[test]
    fn test_hamming_similarity_complement() {
        let a = [0x0f, 0xf0];
        let b = [0xf0, 0x0f];
        assert_eq!(hamming_similarity(&a, &b), 0);
    }

    #[test]
    fn test_hamming_similarity_counts_bits() {
        // 0x00 vs 0x01 differs in one bit, 0x00 vs 0x03 in two.
        assert_eq!(hamming_similarity(&[0x00], &[0x01]), 7);
        assert_eq!(hamming_similarity(&[0x00], &[0x03]), 6);
        assert_eq!(hamming_similarity(&[0xff, 0x00], &[0xff, 0x80]), 15);
    }

    #[test]
    fn test_correct_passphrase_scores_perfect() {
        let evaluator = FitnessEvaluator::new(test_descriptor("testpass"));
        assert_eq!(evaluator.try_score("testpass").unwrap(), PERFECT_SCORE);
        assert_eq!(evaluator.score("testpass"), PERFECT_SCORE);
    }

    #[test]
    fn test_wrong_passphrase_scores_below_perfect() {
        let evaluator = FitnessEvaluator::new(test_descriptor("testpass"));
        assert!(evaluator.score("testpast") < PERFECT_SCORE);
        assert!(evaluator.score("TESTPASS") < PERFECT_SCORE);
    }

    #[test]
    fn test_unusual_candidates_score_in_range() {
        let evaluator = FitnessEvaluator::new(test_descriptor("testpass"));
        let long = "x".repeat(200);
        for candidate in ["", "日本語パスワード", "a", long.as_str()] {
            let score = evaluator.score(candidate);
            assert!(score <= PERFECT_SCORE);
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let evaluator = FitnessEvaluator::new(test_descriptor("testpass"));
        assert_eq!(evaluator.score("candidate1"), evaluator.score("candidate1"));
    }

    proptest! {
        // PBKDF2 dominates each case, so keep the sample count small.
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_score_never_exceeds_perfect(candidate in "[a-z0-9]{1,16}") {
            let evaluator = FitnessEvaluator::new(test_descriptor("testpass"));
            prop_assert!(evaluator.score(&candidate) <= PERFECT_SCORE);
        }
    }
}
