//! The genesis block.
//!
//! Genesis is fully determined by the ledger parameters: no votes, the
//! configured proof and `previous_hash` sentinel, and a timestamp pinned to
//! the epoch. Two nodes with the same parameters agree on its hash.

use votechain_types::{LedgerParams, Timestamp};

use crate::Block;

pub fn genesis_block(params: &LedgerParams) -> Block {
    Block::seal(
        0,
        Timestamp::EPOCH,
        Vec::new(),
        params.genesis_proof,
        params.genesis_previous_hash.clone(),
    )
}

pub fn genesis_hash(params: &LedgerParams) -> String {
    genesis_block(params).hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_types::params::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};

    #[test]
    fn default_genesis_shape() {
        let block = genesis_block(&LedgerParams::default());
        assert_eq!(block.index, 0);
        assert_eq!(block.proof, GENESIS_PROOF);
        assert_eq!(block.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(block.transactions.is_empty());
        assert!(block.has_consistent_hash());
    }

    #[test]
    fn genesis_depends_on_params() {
        let a = LedgerParams::default();
        let b = LedgerParams {
            genesis_proof: 101,
            ..LedgerParams::default()
        };
        assert_eq!(genesis_hash(&a), genesis_hash(&a));
        assert_ne!(genesis_hash(&a), genesis_hash(&b));
    }
}
