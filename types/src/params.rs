//! Ledger parameters fixed for the lifetime of a chain.

use serde::{Deserialize, Serialize};

/// Default number of leading zero hex digits a proof digest must carry.
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` sentinel of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Parameters every component of a chain must agree on.
///
/// Changing any of these after blocks have been mined invalidates the
/// existing chain (difficulty is checked on every link).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Required leading zero hex digits in `sha256(last_proof || proof)`.
    pub difficulty: u32,

    /// Proof value of block 0.
    pub genesis_proof: u64,

    /// `previous_hash` of block 0.
    pub genesis_previous_hash: String,
}

impl LedgerParams {
    pub fn new(difficulty: u32) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            genesis_proof: GENESIS_PROOF,
            genesis_previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_chain() {
        let params = LedgerParams::default();
        assert_eq!(params.difficulty, 4);
        assert_eq!(params.genesis_proof, 100);
        assert_eq!(params.genesis_previous_hash, "1");
    }

    #[test]
    fn new_overrides_difficulty_only() {
        let params = LedgerParams::new(2);
        assert_eq!(params.difficulty, 2);
        assert_eq!(params.genesis_proof, GENESIS_PROOF);
        assert_eq!(params.genesis_previous_hash, GENESIS_PREVIOUS_HASH);
    }
}
