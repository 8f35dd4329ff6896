//! Signature Verifier: checks that a vote was authorized by the key it names.

use votechain_crypto::{public_key_from_hex, signature_from_hex, verify_signature};

use crate::Transaction;

/// Decides whether a transaction's signature is authentic.
///
/// Implementations are pure: no state, no side effects, and a verdict of
/// `false` (never a panic) for any well-typed input.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, transaction: &Transaction) -> bool;
}

/// Ed25519 over `voter_id || candidate_id`, with hex-encoded key and signature.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, transaction: &Transaction) -> bool {
        let Ok(public_key) = public_key_from_hex(&transaction.public_key) else {
            return false;
        };
        let Ok(signature) = signature_from_hex(&transaction.signature) else {
            return false;
        };
        verify_signature(&transaction.message(), &signature, &public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_crypto::keypair_from_seed;
    use votechain_types::Timestamp;

    fn vote(seed: u8, voter: &str, candidate: &str) -> Transaction {
        Transaction::signed(voter, candidate, &keypair_from_seed(&[seed; 32]), Timestamp::new(1))
    }

    #[test]
    fn authentic_vote_verifies() {
        assert!(Ed25519Verifier.verify(&vote(1, "V1", "C1")));
    }

    #[test]
    fn changed_candidate_fails() {
        let mut tx = vote(1, "V1", "C1");
        tx.candidate_id = "C2".into();
        assert!(!Ed25519Verifier.verify(&tx));
    }

    #[test]
    fn swapped_key_fails() {
        let mut tx = vote(1, "V1", "C1");
        tx.public_key = keypair_from_seed(&[2u8; 32]).public.to_string();
        assert!(!Ed25519Verifier.verify(&tx));
    }

    #[test]
    fn malformed_encodings_fail_without_panicking() {
        let mut tx = vote(1, "V1", "C1");
        tx.signature = "zz".into();
        assert!(!Ed25519Verifier.verify(&tx));

        let mut tx = vote(1, "V1", "C1");
        tx.public_key = "abcd".into();
        assert!(!Ed25519Verifier.verify(&tx));
    }

    #[test]
    fn base64_demo_signature_fails() {
        // The demo client "signed" by base64-encoding the payload.
        let mut tx = vote(1, "V1", "C1");
        tx.signature = "VjFDMQ==".into();
        assert!(!Ed25519Verifier.verify(&tx));
    }
}
