//! Proof-of-work for block mining.
//!
//! A proof `p` is valid against the previous block's proof `l` when
//! `sha256(decimal(l) || decimal(p))`, written in hex, starts with
//! `difficulty` zero digits. Checking costs one hash; finding a proof costs
//! about `16^difficulty` hashes. The search never touches the chain or the
//! mempool: it is a pure function of the previous proof.

pub mod error;
pub mod generator;
pub mod validator;

pub use error::WorkError;
pub use generator::ProofGenerator;
pub use validator::{expected_attempts, proof_digest, validate_proof, MAX_DIFFICULTY};
