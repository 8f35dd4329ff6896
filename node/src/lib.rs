//! VoteChain node: the ledger service and everything it needs to run.
//!
//! The node owns the only mutable election state:
//! - The mempool of validated, unmined votes
//! - The chain of mined blocks (persisted through a store)
//! - The roster of voters and candidates
//!
//! Request handlers share a [`LedgerService`] handle; there is no global state.

pub mod config;
pub mod error;
pub mod logging;
pub mod mempool;
pub mod node;
pub mod report;
pub mod roster;
pub mod service;
pub mod shutdown;

pub use config::NodeConfig;
pub use error::{MineError, NodeError, RegistrationError, Rejection, VoteLocation};
pub use logging::{init_logging, LogFormat};
pub use mempool::{Mempool, MempoolRejection};
pub use node::{inspect_chain, VoteNode};
pub use report::{
    CandidateResult, ChainDump, ChainReport, ElectionResults, ElectionStatus, PendingVotes,
    SubmitReceipt,
};
pub use roster::{ImportSummary, Roster, RosterFile};
pub use service::{ElectionPolicy, LedgerService};
pub use shutdown::ShutdownController;
