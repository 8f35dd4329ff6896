//! The vote ledger: a single linear chain of proof-of-work blocks.
//!
//! Votes are signed [`Transaction`]s. Mined [`Block`]s carry them, each block
//! pointing at the SHA-256 of its predecessor's canonical serialization. The
//! [`Chain`] is the only way blocks are created and the single source of
//! truth for the [`Tally`].

pub mod block;
pub mod chain;
pub mod error;
pub mod genesis;
pub mod tally;
pub mod transaction;
pub mod verifier;

pub use block::{hash_of, Block};
pub use chain::{validate_blocks, Chain};
pub use error::{ChainFault, LedgerError, TransactionError};
pub use genesis::{genesis_block, genesis_hash};
pub use tally::Tally;
pub use transaction::{signing_message, Transaction, MAX_FIELD_LEN};
pub use verifier::{Ed25519Verifier, SignatureVerifier};
