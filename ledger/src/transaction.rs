//! Vote transactions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use votechain_crypto::sign_message;
use votechain_types::{KeyPair, Timestamp};

use crate::TransactionError;

/// Upper bound on any text field of a vote.
pub const MAX_FIELD_LEN: usize = 256;

/// An immutable, signed vote.
///
/// `signature` and `public_key` are kept as submitted (hex). They are only
/// decoded by the [`SignatureVerifier`](crate::SignatureVerifier), so a
/// malformed key reads as a failed signature rather than an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub voter_id: String,
    pub candidate_id: String,
    pub signature: String,
    pub public_key: String,
    pub timestamp: Timestamp,
}

/// The exact bytes a voter signs: `voter_id || candidate_id`.
pub fn signing_message(voter_id: &str, candidate_id: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(voter_id.len() + candidate_id.len());
    message.extend_from_slice(voter_id.as_bytes());
    message.extend_from_slice(candidate_id.as_bytes());
    message
}

impl Transaction {
    pub fn new(
        voter_id: impl Into<String>,
        candidate_id: impl Into<String>,
        signature: impl Into<String>,
        public_key: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            voter_id: voter_id.into(),
            candidate_id: candidate_id.into(),
            signature: signature.into(),
            public_key: public_key.into(),
            timestamp,
        }
    }

    /// Build and sign a vote with the voter's key pair.
    pub fn signed(voter_id: &str, candidate_id: &str, keys: &KeyPair, timestamp: Timestamp) -> Self {
        let signature = sign_message(&signing_message(voter_id, candidate_id), &keys.private);
        Self::new(
            voter_id,
            candidate_id,
            signature.to_string(),
            keys.public.to_string(),
            timestamp,
        )
    }

    pub fn message(&self) -> Vec<u8> {
        signing_message(&self.voter_id, &self.candidate_id)
    }

    /// Reject blank or oversized fields, and ids with surrounding whitespace
    /// (ids are matched byte-for-byte against the roster and the chain).
    pub fn validate_fields(&self) -> Result<(), TransactionError> {
        let fields = [
            ("voter_id", &self.voter_id),
            ("candidate_id", &self.candidate_id),
            ("signature", &self.signature),
            ("public_key", &self.public_key),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(TransactionError::MissingField(name));
            }
            if value.len() > MAX_FIELD_LEN {
                return Err(TransactionError::FieldTooLong {
                    field: name,
                    max: MAX_FIELD_LEN,
                });
            }
        }
        for (name, value) in [("voter_id", &self.voter_id), ("candidate_id", &self.candidate_id)] {
            if value.trim() != value.as_str() {
                return Err(TransactionError::PaddedIdentifier(name));
            }
        }
        Ok(())
    }

    /// Sorted-key JSON object used inside the block hash.
    pub(crate) fn canonical_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("candidate_id".into(), Value::from(self.candidate_id.as_str()));
        map.insert("public_key".into(), Value::from(self.public_key.as_str()));
        map.insert("signature".into(), Value::from(self.signature.as_str()));
        map.insert("timestamp".into(), Value::from(self.timestamp.as_secs()));
        map.insert("voter_id".into(), Value::from(self.voter_id.as_str()));
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_crypto::keypair_from_seed;

    #[test]
    fn message_is_plain_concatenation() {
        assert_eq!(signing_message("V1", "C1"), b"V1C1".to_vec());
    }

    #[test]
    fn signed_vote_carries_hex_key() {
        let keys = keypair_from_seed(&[3u8; 32]);
        let tx = Transaction::signed("V1", "C1", &keys, Timestamp::new(10));
        assert_eq!(tx.public_key, keys.public.to_string());
        assert_eq!(tx.signature.len(), 128);
        assert!(tx.validate_fields().is_ok());
    }

    #[test]
    fn blank_fields_rejected_in_order() {
        let tx = Transaction::new("", "", "sig", "key", Timestamp::EPOCH);
        assert_eq!(
            tx.validate_fields(),
            Err(TransactionError::MissingField("voter_id"))
        );

        let tx = Transaction::new("V1", "C1", "   ", "key", Timestamp::EPOCH);
        assert_eq!(
            tx.validate_fields(),
            Err(TransactionError::MissingField("signature"))
        );
    }

    #[test]
    fn oversized_field_rejected() {
        let tx = Transaction::new("V1", "C".repeat(MAX_FIELD_LEN + 1), "s", "k", Timestamp::EPOCH);
        assert_eq!(
            tx.validate_fields(),
            Err(TransactionError::FieldTooLong {
                field: "candidate_id",
                max: MAX_FIELD_LEN
            })
        );
    }

    #[test]
    fn padded_ids_rejected() {
        let tx = Transaction::new(" V1 ", "C1", "s", "k", Timestamp::EPOCH);
        assert_eq!(
            tx.validate_fields(),
            Err(TransactionError::PaddedIdentifier("voter_id"))
        );

        let tx = Transaction::new("V1", "C1\n", "s", "k", Timestamp::EPOCH);
        assert_eq!(
            tx.validate_fields(),
            Err(TransactionError::PaddedIdentifier("candidate_id"))
        );
    }

    #[test]
    fn canonical_value_keys_are_sorted() {
        let tx = Transaction::new("V1", "C1", "s", "k", Timestamp::new(5));
        let rendered = tx.canonical_value().to_string();
        assert_eq!(
            rendered,
            r#"{"candidate_id":"C1","public_key":"k","signature":"s","timestamp":5,"voter_id":"V1"}"#
        );
    }
}
