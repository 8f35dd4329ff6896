//! LMDB implementation of ChainStore.

use std::sync::Arc;

use heed::byteorder::BigEndian;
use heed::types::{Bytes, U64};
use heed::{Database, Env};
use tracing::debug;

use votechain_ledger::Block;
use votechain_store::{ChainStore, StoreError};

use crate::LmdbError;

/// Blocks keyed by big-endian index, so key order is chain order.
pub struct LmdbChainStore {
    pub(crate) env: Arc<Env>,
    pub(crate) blocks_db: Database<U64<BigEndian>, Bytes>,
}

impl ChainStore for LmdbChainStore {
    fn append_block(&self, block: &Block) -> Result<(), StoreError> {
        let bytes = bincode::serialize(block).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let expected = self.blocks_db.len(&wtxn).map_err(LmdbError::from)?;
        if block.index != expected {
            return Err(StoreError::OutOfOrder {
                expected,
                found: block.index,
            });
        }
        self.blocks_db
            .put(&mut wtxn, &block.index, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        debug!(index = block.index, bytes = bytes.len(), "block persisted");
        Ok(())
    }

    fn get_block(&self, index: u64) -> Result<Block, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .blocks_db
            .get(&rtxn, &index)
            .map_err(LmdbError::from)?
            .ok_or_else(|| StoreError::NotFound(format!("block {index}")))?;
        Ok(bincode::deserialize(bytes).map_err(LmdbError::from)?)
    }

    fn load_blocks(&self) -> Result<Vec<Block>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut blocks = Vec::new();
        for entry in self.blocks_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (index, bytes) = entry.map_err(LmdbError::from)?;
            let block: Block = bincode::deserialize(bytes).map_err(LmdbError::from)?;
            if block.index != index {
                return Err(StoreError::Corruption(format!(
                    "block stored under key {index} claims index {}",
                    block.index
                )));
            }
            blocks.push(block);
        }
        Ok(blocks)
    }

    fn block_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.blocks_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
