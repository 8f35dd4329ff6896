//! HTTP API for the VoteChain node.
//!
//! Provides endpoints for:
//! - Vote submission and the pending vote set
//! - Mining the pending votes into a block
//! - Chain inspection and validation
//! - Election status and results
//! - Voter and candidate registration

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{router, RpcServer};
