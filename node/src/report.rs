//! Read-side views returned by the ledger service.

use serde::Serialize;

use votechain_ledger::{Block, Transaction};

/// Outcome of an accepted vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitReceipt {
    /// Index of the block the vote will be mined into, if the next mine
    /// picks it up.
    pub block_index: u64,
    pub pending_votes: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectionStatus {
    /// Distinct voters with a vote pending or committed.
    pub registered_voters: usize,
    pub registered_candidates: usize,
    /// Committed votes only.
    pub votes_cast: u64,
    pub blockchain_length: usize,
    pub pending_votes: usize,
    pub election_name: String,
    pub voting_open: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateResult {
    pub id: String,
    pub name: String,
    pub party: String,
    pub votes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectionResults {
    /// Ranked by votes, ties in registration order.
    pub results: Vec<CandidateResult>,
    pub total_votes: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChainDump {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub valid: bool,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PendingVotes {
    pub transactions: Vec<Transaction>,
    pub count: usize,
}
