//! Pending votes awaiting inclusion in a block.

use std::collections::HashSet;

use votechain_ledger::Transaction;

/// Why the mempool refused a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MempoolRejection {
    /// A vote by the same voter is already pending.
    Duplicate,
    /// The pending set is at capacity.
    Full,
}

/// Ordered set of validated, unmined votes, keyed by `voter_id`.
///
/// Arrival order is preserved and becomes the order of inclusion in the
/// next block. At most one vote per voter is ever pending.
#[derive(Debug)]
pub struct Mempool {
    pending: Vec<Transaction>,
    voters: HashSet<String>,
    max_size: usize,
}

impl Mempool {
    pub fn new(max_size: usize) -> Self {
        Self {
            pending: Vec::new(),
            voters: HashSet::new(),
            max_size,
        }
    }

    pub fn contains_voter(&self, voter_id: &str) -> bool {
        self.voters.contains(voter_id)
    }

    pub fn insert(&mut self, transaction: Transaction) -> Result<(), MempoolRejection> {
        if self.voters.contains(&transaction.voter_id) {
            return Err(MempoolRejection::Duplicate);
        }
        if self.pending.len() >= self.max_size {
            return Err(MempoolRejection::Full);
        }
        self.voters.insert(transaction.voter_id.clone());
        self.pending.push(transaction);
        Ok(())
    }

    /// Voter ids currently pending; identifies a snapshot for [`Mempool::remove`].
    pub fn snapshot_ids(&self) -> HashSet<String> {
        self.voters.clone()
    }

    /// Copies of the pending votes whose voter is in `ids`, in arrival order.
    pub fn select(&self, ids: &HashSet<String>) -> Vec<Transaction> {
        self.pending
            .iter()
            .filter(|tx| ids.contains(&tx.voter_id))
            .cloned()
            .collect()
    }

    /// Drop exactly the votes whose voter is in `ids`; later arrivals stay.
    pub fn remove(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.pending.len();
        self.pending.retain(|tx| !ids.contains(&tx.voter_id));
        self.voters.retain(|voter| !ids.contains(voter));
        before - self.pending.len()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }
}
