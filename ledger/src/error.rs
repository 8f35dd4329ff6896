use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("chain has no blocks")]
    Empty,

    #[error("chain corrupted at block {index}: {fault}")]
    Corrupted { index: u64, fault: ChainFault },

    #[error("proof {proof} does not satisfy difficulty against previous proof {last_proof}")]
    ProofRejected { last_proof: u64, proof: u64 },
}

/// What the validity walk found wrong with a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainFault {
    #[error("genesis block does not match the ledger parameters")]
    BadGenesis,

    #[error("index {found} where {expected} was expected")]
    IndexGap { expected: u64, found: u64 },

    #[error("previous_hash {found} does not match predecessor hash {expected}")]
    BrokenLink { expected: String, found: String },

    #[error("proof {proof} is not valid against previous proof {last_proof}")]
    InvalidProof { last_proof: u64, proof: u64 },

    #[error("stored hash {stored} does not match recomputed hash {computed}")]
    HashMismatch { stored: String, computed: String },
}

/// A vote rejected before it reaches any shared state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("field {field} exceeds {max} bytes")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("{0} has leading or trailing whitespace")]
    PaddedIdentifier(&'static str),
}
