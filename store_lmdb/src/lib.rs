//! LMDB storage backend for the VoteChain ledger.
//!
//! Implements the storage traits from `votechain-store` using the `heed` LMDB
//! bindings. Each logical store maps to one LMDB database within a single
//! environment.

pub mod block;
pub mod environment;
pub mod error;
pub mod integrity;
pub mod meta;
pub mod roster;

pub use block::LmdbChainStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
pub use meta::LmdbMetaStore;
pub use roster::LmdbRosterStore;
