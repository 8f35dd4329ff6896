//! Block storage trait.

use crate::StoreError;
use votechain_ledger::Block;

/// Durable, append-only block log keyed by block index.
pub trait ChainStore: Send + Sync {
    /// Persist the next block. Its index must equal the current block count.
    fn append_block(&self, block: &Block) -> Result<(), StoreError>;

    /// Retrieve a block by index.
    fn get_block(&self, index: u64) -> Result<Block, StoreError>;

    /// Every stored block, ordered by index.
    fn load_blocks(&self) -> Result<Vec<Block>, StoreError>;

    /// Total number of blocks in the store.
    fn block_count(&self) -> Result<u64, StoreError>;
}
