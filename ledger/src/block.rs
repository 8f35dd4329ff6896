//! Blocks and their canonical hash.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use votechain_crypto::sha256_hex;
use votechain_types::Timestamp;

use crate::Transaction;

/// A mined batch of votes, linked to its predecessor by hash.
///
/// `hash` is a cached copy of [`hash_of`] taken when the block was sealed.
/// It is not part of the hashed content, and the validity walk recomputes it
/// rather than trusting it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: Timestamp,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
    pub hash: String,
}

/// SHA-256 (hex) of the block's canonical JSON serialization.
///
/// Canonical means keys sorted lexicographically at every level, no
/// insignificant whitespace, and the `hash` field left out.
pub fn hash_of(block: &Block) -> String {
    sha256_hex(block.canonical_json().as_bytes())
}

impl Block {
    /// Build a block and stamp it with its own hash.
    pub fn seal(
        index: u64,
        timestamp: Timestamp,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
            hash: String::new(),
        };
        block.hash = hash_of(&block);
        block
    }

    pub fn canonical_json(&self) -> String {
        let mut map = Map::new();
        map.insert("index".into(), Value::from(self.index));
        map.insert("previous_hash".into(), Value::from(self.previous_hash.as_str()));
        map.insert("proof".into(), Value::from(self.proof));
        map.insert("timestamp".into(), Value::from(self.timestamp.as_secs()));
        map.insert(
            "transactions".into(),
            Value::Array(
                self.transactions
                    .iter()
                    .map(Transaction::canonical_value)
                    .collect(),
            ),
        );
        Value::Object(map).to_string()
    }

    /// Whether the cached `hash` still matches the contents.
    pub fn has_consistent_hash(&self) -> bool {
        self.hash == hash_of(self)
    }

    pub fn contains_voter(&self, voter_id: &str) -> bool {
        self.transactions.iter().any(|tx| tx.voter_id == voter_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Block {
        let tx = Transaction::new("V1", "C1", "ab", "cd", Timestamp::new(7));
        Block::seal(1, Timestamp::new(9), vec![tx], 35_293, "ff".into())
    }

    #[test]
    fn canonical_json_is_sorted_and_compact() {
        assert_eq!(
            sample().canonical_json(),
            concat!(
                r#"{"index":1,"previous_hash":"ff","proof":35293,"timestamp":9,"#,
                r#""transactions":[{"candidate_id":"C1","public_key":"cd","signature":"ab","timestamp":7,"voter_id":"V1"}]}"#
            )
        );
    }

    #[test]
    fn hash_ignores_cached_hash_field() {
        let mut block = sample();
        let before = hash_of(&block);
        block.hash = "bogus".into();
        assert_eq!(hash_of(&block), before);
        assert!(!block.has_consistent_hash());
    }

    #[test]
    fn every_field_feeds_the_hash() {
        let base = hash_of(&sample());

        let mut b = sample();
        b.index = 2;
        assert_ne!(hash_of(&b), base);

        let mut b = sample();
        b.timestamp = Timestamp::new(10);
        assert_ne!(hash_of(&b), base);

        let mut b = sample();
        b.proof += 1;
        assert_ne!(hash_of(&b), base);

        let mut b = sample();
        b.previous_hash = "fe".into();
        assert_ne!(hash_of(&b), base);

        let mut b = sample();
        b.transactions[0].candidate_id = "C2".into();
        assert_ne!(hash_of(&b), base);
    }

    #[test]
    fn serde_roundtrip_keeps_hash() {
        let block = sample();
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert!(back.has_consistent_hash());
    }
}
