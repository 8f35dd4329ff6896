use proptest::prelude::*;

use votechain_work::{proof_digest, validate_proof, ProofGenerator};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A mined proof always passes its own validation.
    #[test]
    fn mined_proof_always_valid(
        last_proof in any::<u64>(),
        difficulty in 0u32..=2,
    ) {
        let generator = ProofGenerator::new(difficulty).unwrap();
        let proof = generator.mine(last_proof).unwrap();
        prop_assert!(
            validate_proof(last_proof, proof, difficulty),
            "mined proof must pass validation"
        );
    }

    /// No proof smaller than the mined one satisfies the predicate.
    #[test]
    fn mined_proof_is_minimal(last_proof in 0u64..1_000_000) {
        let generator = ProofGenerator::new(2).unwrap();
        let proof = generator.mine(last_proof).unwrap();
        for smaller in 0..proof {
            prop_assert!(!validate_proof(last_proof, smaller, 2));
        }
    }
}

proptest! {
    /// Zero difficulty always passes regardless of inputs.
    #[test]
    fn zero_difficulty_always_passes(last_proof in any::<u64>(), proof in any::<u64>()) {
        prop_assert!(validate_proof(last_proof, proof, 0));
    }

    /// Validation is deterministic: same inputs produce same result.
    #[test]
    fn validation_is_deterministic(
        last_proof in any::<u64>(),
        proof in any::<u64>(),
        difficulty in 0u32..=8,
    ) {
        prop_assert_eq!(
            validate_proof(last_proof, proof, difficulty),
            validate_proof(last_proof, proof, difficulty)
        );
    }

    /// Lower difficulty is easier to meet: if valid at D, then valid at D-1.
    #[test]
    fn lower_difficulty_is_easier(
        last_proof in any::<u64>(),
        proof in any::<u64>(),
        difficulty in 1u32..=64,
    ) {
        if validate_proof(last_proof, proof, difficulty) {
            prop_assert!(validate_proof(last_proof, proof, difficulty - 1));
        }
    }

    /// The predicate is exactly "hex digest starts with D zeros".
    #[test]
    fn predicate_matches_hex_prefix(
        last_proof in any::<u64>(),
        proof in any::<u64>(),
        difficulty in 0u32..=2,
    ) {
        let digest = proof_digest(last_proof, proof);
        let prefix = "0".repeat(difficulty as usize);
        prop_assert_eq!(
            validate_proof(last_proof, proof, difficulty),
            digest.starts_with(&prefix)
        );
    }
}
