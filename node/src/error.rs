use thiserror::Error;

use votechain_ledger::{LedgerError, TransactionError};
use votechain_store::StoreError;
use votechain_store_lmdb::LmdbError;
use votechain_work::WorkError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] LmdbError),

    #[error("work error: {0}")]
    Work(#[from] WorkError),

    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a conflicting vote for the same voter was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteLocation {
    Mempool,
    Chain,
}

impl std::fmt::Display for VoteLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteLocation::Mempool => f.write_str("pending votes"),
            VoteLocation::Chain => f.write_str("a committed block"),
        }
    }
}

/// Why a vote submission was refused. None of these touch shared state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("invalid transaction: {0}")]
    Validation(#[from] TransactionError),

    #[error("signature does not verify")]
    Signature,

    #[error("voter {voter_id} has already voted ({location})")]
    DuplicateVote {
        voter_id: String,
        location: VoteLocation,
    },

    #[error("unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("voter {0} is not registered")]
    UnregisteredVoter(String),

    #[error("public key does not match the key registered for voter {0}")]
    IdentityMismatch(String),

    #[error("voting is closed")]
    ElectionClosed,

    #[error("pending vote limit of {0} reached")]
    MempoolFull(usize),

    #[error("chain failed validation; submissions are disabled")]
    ChainCorrupted,
}

impl Rejection {
    /// Stable machine-readable code for the reason.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::Validation(_) => "validation",
            Rejection::Signature => "invalid_signature",
            Rejection::DuplicateVote { .. } => "duplicate_vote",
            Rejection::UnknownCandidate(_) => "unknown_candidate",
            Rejection::UnregisteredVoter(_) => "unregistered_voter",
            Rejection::IdentityMismatch(_) => "identity_mismatch",
            Rejection::ElectionClosed => "election_closed",
            Rejection::MempoolFull(_) => "mempool_full",
            Rejection::ChainCorrupted => "chain_corrupted",
        }
    }
}

#[derive(Debug, Error)]
pub enum MineError {
    #[error("no pending votes to mine")]
    Empty,

    #[error("mining was cancelled")]
    Cancelled,

    #[error("chain failed validation; mining is disabled")]
    ChainCorrupted,

    #[error("proof search failed: {0}")]
    Work(WorkError),

    #[error("mining worker failed: {0}")]
    Worker(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<WorkError> for MineError {
    fn from(e: WorkError) -> Self {
        match e {
            WorkError::Cancelled => MineError::Cancelled,
            other => MineError::Work(other),
        }
    }
}

impl MineError {
    pub fn code(&self) -> &'static str {
        match self {
            MineError::Empty => "nothing_to_mine",
            MineError::Cancelled => "mining_cancelled",
            MineError::ChainCorrupted => "chain_corrupted",
            MineError::Work(_) | MineError::Worker(_) => "mining_failed",
            MineError::Ledger(_) => "ledger_error",
            MineError::Store(_) => "store_error",
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid public key: {0}")]
    InvalidKey(String),

    #[error("{0} has leading or trailing whitespace")]
    PaddedIdentifier(&'static str),

    #[error("voter {0} is already registered")]
    DuplicateVoter(String),

    #[error("candidate {0} is already registered")]
    DuplicateCandidate(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl RegistrationError {
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::MissingField(_)
            | RegistrationError::InvalidKey(_)
            | RegistrationError::PaddedIdentifier(_) => "validation",
            RegistrationError::DuplicateVoter(_) => "duplicate_voter",
            RegistrationError::DuplicateCandidate(_) => "duplicate_candidate",
            RegistrationError::Store(_) => "store_error",
        }
    }
}
