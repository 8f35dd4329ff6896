//! The chain: an ordered, append-only sequence of blocks.

use std::collections::HashSet;

use votechain_types::{LedgerParams, Timestamp};
use votechain_work::validate_proof;

use crate::{genesis_block, hash_of, Block, ChainFault, LedgerError, Tally, Transaction};

/// The canonical block sequence plus an index of voters already committed.
///
/// A chain is never empty: genesis is pushed at construction. Blocks only
/// enter through [`Chain::append`] (or a validated load), so the hash links
/// and proofs of a chain built here always check out.
#[derive(Clone, Debug)]
pub struct Chain {
    blocks: Vec<Block>,
    params: LedgerParams,
    voters: HashSet<String>,
    committed_votes: u64,
}

impl Chain {
    /// A fresh chain holding only genesis.
    pub fn new(params: LedgerParams) -> Self {
        let genesis = genesis_block(&params);
        Self {
            blocks: vec![genesis],
            params,
            voters: HashSet::new(),
            committed_votes: 0,
        }
    }

    /// Rebuild a chain from stored blocks, refusing anything invalid.
    pub fn from_blocks(params: LedgerParams, blocks: Vec<Block>) -> Result<Self, LedgerError> {
        validate_blocks(&params, &blocks)?;
        Self::from_blocks_unchecked(params, blocks)
    }

    /// Rebuild a chain from stored blocks without validating links or
    /// proofs. Used to keep serving reads from a chain that failed
    /// validation.
    pub fn from_blocks_unchecked(
        params: LedgerParams,
        blocks: Vec<Block>,
    ) -> Result<Self, LedgerError> {
        if blocks.is_empty() {
            return Err(LedgerError::Empty);
        }
        let mut chain = Self {
            blocks: Vec::with_capacity(blocks.len()),
            params,
            voters: HashSet::new(),
            committed_votes: 0,
        };
        for block in blocks {
            chain.index_block(&block);
            chain.blocks.push(block);
        }
        Ok(chain)
    }

    /// Seal and append a block on top of the current tip.
    ///
    /// `proof` must be valid against the tip's proof. `transactions` are
    /// taken as-is; rejecting duplicates is the caller's job.
    pub fn append(
        &mut self,
        transactions: Vec<Transaction>,
        proof: u64,
        timestamp: Timestamp,
    ) -> Result<&Block, LedgerError> {
        self.append_with(transactions, proof, timestamp, |_| Ok::<_, LedgerError>(()))
    }

    /// Like [`Chain::append`], but hands the sealed block to `persist` first.
    /// The block becomes part of the chain only if `persist` succeeds.
    pub fn append_with<E, F>(
        &mut self,
        transactions: Vec<Transaction>,
        proof: u64,
        timestamp: Timestamp,
        persist: F,
    ) -> Result<&Block, E>
    where
        E: From<LedgerError>,
        F: FnOnce(&Block) -> Result<(), E>,
    {
        let tip = self.last_block();
        if !validate_proof(tip.proof, proof, self.params.difficulty) {
            return Err(LedgerError::ProofRejected {
                last_proof: tip.proof,
                proof,
            }
            .into());
        }

        let block = Block::seal(tip.index + 1, timestamp, transactions, proof, tip.hash.clone());
        persist(&block)?;

        self.index_block(&block);
        self.blocks.push(block);
        Ok(self.last_block())
    }

    fn index_block(&mut self, block: &Block) {
        for tx in &block.transactions {
            self.voters.insert(tx.voter_id.clone());
        }
        self.committed_votes += block.transactions.len() as u64;
    }

    pub fn last_block(&self) -> &Block {
        // Never empty: every constructor pushes at least one block.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn last_proof(&self) -> u64 {
        self.last_block().proof
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    /// Whether `voter_id` has a vote in any committed block.
    pub fn contains_voter(&self, voter_id: &str) -> bool {
        self.voters.contains(voter_id)
    }

    /// Distinct voters with a committed vote.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn voters(&self) -> impl Iterator<Item = &str> {
        self.voters.iter().map(String::as_str)
    }

    /// Committed transactions across all blocks.
    pub fn committed_votes(&self) -> u64 {
        self.committed_votes
    }

    pub fn tally(&self) -> Tally {
        Tally::from_blocks(&self.blocks)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_blocks(&self.params, &self.blocks)
    }
}

/// Walk `blocks` from genesis and report the first fault.
///
/// Each block must carry its position as index, a hash matching its
/// contents, and a `previous_hash` equal to the recomputed hash of its
/// predecessor whose proof it extends. Genesis must equal the block these
/// parameters produce.
pub fn validate_blocks(params: &LedgerParams, blocks: &[Block]) -> Result<(), LedgerError> {
    let Some(first) = blocks.first() else {
        return Err(LedgerError::Empty);
    };

    let expected_genesis = genesis_block(params);
    if *first != expected_genesis {
        return Err(corrupted(0, ChainFault::BadGenesis));
    }

    for (position, pair) in blocks.windows(2).enumerate() {
        let (prev, block) = (&pair[0], &pair[1]);
        let expected_index = position as u64 + 1;

        if block.index != expected_index {
            return Err(corrupted(
                expected_index,
                ChainFault::IndexGap {
                    expected: expected_index,
                    found: block.index,
                },
            ));
        }

        let prev_hash = hash_of(prev);
        if block.previous_hash != prev_hash {
            return Err(corrupted(
                expected_index,
                ChainFault::BrokenLink {
                    expected: prev_hash,
                    found: block.previous_hash.clone(),
                },
            ));
        }

        if !validate_proof(prev.proof, block.proof, params.difficulty) {
            return Err(corrupted(
                expected_index,
                ChainFault::InvalidProof {
                    last_proof: prev.proof,
                    proof: block.proof,
                },
            ));
        }

        let computed = hash_of(block);
        if block.hash != computed {
            return Err(corrupted(
                expected_index,
                ChainFault::HashMismatch {
                    stored: block.hash.clone(),
                    computed,
                },
            ));
        }
    }

    Ok(())
}

fn corrupted(index: u64, fault: ChainFault) -> LedgerError {
    LedgerError::Corrupted { index, fault }
}
