//! Fundamental types for the VoteChain ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! keys and signatures, timestamps and clocks, candidate metadata, ledger
//! and ledger parameters.

pub mod election;
pub mod keys;
pub mod params;
pub mod time;

pub use election::CandidateInfo;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::LedgerParams;
pub use time::{Clock, SystemClock, Timestamp};
