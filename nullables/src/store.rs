//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use votechain_ledger::Block;
use votechain_store::{ChainStore, MetaStore, RosterStore, StoreError};
use votechain_types::{CandidateInfo, PublicKey};

/// An in-memory chain, roster and meta store.
/// Thread-safe for use with tokio's multi-threaded runtime.
#[derive(Default)]
pub struct NullStore {
    blocks: Mutex<Vec<Block>>,
    voters: Mutex<HashMap<String, PublicKey>>,
    candidates: Mutex<Vec<CandidateInfo>>,
    meta: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with `blocks`, bypassing ordering checks.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        let store = Self::new();
        *store.blocks.lock().unwrap() = blocks;
        store
    }

    /// Make every subsequent write fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("writes disabled".into()));
        }
        Ok(())
    }
}

impl ChainStore for NullStore {
    fn append_block(&self, block: &Block) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut blocks = self.blocks.lock().unwrap();
        let expected = blocks.len() as u64;
        if block.index != expected {
            return Err(StoreError::OutOfOrder {
                expected,
                found: block.index,
            });
        }
        blocks.push(block.clone());
        Ok(())
    }

    fn get_block(&self, index: u64) -> Result<Block, StoreError> {
        self.blocks
            .lock()
            .unwrap()
            .get(index as usize)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("block {index}")))
    }

    fn load_blocks(&self) -> Result<Vec<Block>, StoreError> {
        Ok(self.blocks.lock().unwrap().clone())
    }

    fn block_count(&self) -> Result<u64, StoreError> {
        Ok(self.blocks.lock().unwrap().len() as u64)
    }
}

impl RosterStore for NullStore {
    fn put_voter(&self, voter_id: &str, key: &PublicKey) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut voters = self.voters.lock().unwrap();
        if voters.contains_key(voter_id) {
            return Err(StoreError::Duplicate(format!("voter {voter_id}")));
        }
        voters.insert(voter_id.to_owned(), *key);
        Ok(())
    }

    fn get_voter(&self, voter_id: &str) -> Result<Option<PublicKey>, StoreError> {
        Ok(self.voters.lock().unwrap().get(voter_id).copied())
    }

    fn load_voters(&self) -> Result<Vec<(String, PublicKey)>, StoreError> {
        Ok(self
            .voters
            .lock()
            .unwrap()
            .iter()
            .map(|(id, key)| (id.clone(), *key))
            .collect())
    }

    fn put_candidate(&self, candidate: &CandidateInfo) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut candidates = self.candidates.lock().unwrap();
        if candidates.iter().any(|c| c.id == candidate.id) {
            return Err(StoreError::Duplicate(format!("candidate {}", candidate.id)));
        }
        candidates.push(candidate.clone());
        Ok(())
    }

    fn load_candidates(&self) -> Result<Vec<CandidateInfo>, StoreError> {
        Ok(self.candidates.lock().unwrap().clone())
    }
}

impl MetaStore for NullStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }
}
