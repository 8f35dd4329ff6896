//! Proof validation.

use votechain_crypto::{sha256, sha256_hex};

/// A SHA-256 digest has 64 hex digits.
pub const MAX_DIFFICULTY: u32 = 64;

/// Hex digest that the difficulty predicate inspects.
pub fn proof_digest(last_proof: u64, proof: u64) -> String {
    sha256_hex(format!("{last_proof}{proof}").as_bytes())
}

/// Check that `proof` satisfies the difficulty predicate against `last_proof`.
///
/// Difficulty 0 accepts every proof; difficulty above [`MAX_DIFFICULTY`]
/// accepts none.
pub fn validate_proof(last_proof: u64, proof: u64, difficulty: u32) -> bool {
    if difficulty > MAX_DIFFICULTY {
        return false;
    }
    let digest = sha256(format!("{last_proof}{proof}").as_bytes());
    leading_zero_nibbles(&digest, difficulty)
}

/// Mean number of hashes a search needs at this difficulty (`16^difficulty`).
pub fn expected_attempts(difficulty: u32) -> u128 {
    16u128.saturating_pow(difficulty)
}

fn leading_zero_nibbles(digest: &[u8; 32], count: u32) -> bool {
    (0..count as usize).all(|i| {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        nibble == 0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibble_check_matches_hex_prefix() {
        for proof in 0..2_000u64 {
            let digest = proof_digest(100, proof);
            for difficulty in 0..=3u32 {
                let by_hex = digest.starts_with(&"0".repeat(difficulty as usize));
                assert_eq!(validate_proof(100, proof, difficulty), by_hex);
            }
        }
    }

    #[test]
    fn zero_difficulty_accepts_everything() {
        assert!(validate_proof(0, 0, 0));
        assert!(validate_proof(u64::MAX, 12345, 0));
    }

    #[test]
    fn out_of_range_difficulty_rejects() {
        assert!(!validate_proof(100, 0, MAX_DIFFICULTY + 1));
    }

    #[test]
    fn digest_uses_decimal_concatenation() {
        // (1, 23) and (12, 3) concatenate to the same decimal string.
        assert_eq!(proof_digest(1, 23), proof_digest(12, 3));
        assert_ne!(proof_digest(1, 23), proof_digest(1, 24));
    }

    #[test]
    fn expected_attempts_grows_exponentially() {
        assert_eq!(expected_attempts(0), 1);
        assert_eq!(expected_attempts(4), 65_536);
        assert_eq!(expected_attempts(40), u128::MAX);
    }
}
