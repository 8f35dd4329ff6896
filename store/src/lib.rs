//! Abstract storage traits for the VoteChain ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.
//!
//! Only committed state is durable: blocks, the voter roster and the
//! candidate list. Pending votes live in memory and are lost on restart.

pub mod block;
pub mod error;
pub mod meta;
pub mod roster;

pub use block::ChainStore;
pub use error::StoreError;
pub use meta::{MetaStore, SCHEMA_VERSION};
pub use roster::RosterStore;
