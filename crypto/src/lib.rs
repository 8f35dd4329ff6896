//! Cryptographic primitives for VoteChain.
//!
//! - **Ed25519** for vote signing and signature verification
//! - **SHA-256** for block hashes, proof-of-work digests and voter identity hashing
//! - Hex codecs for keys and signatures as they travel over HTTP

pub mod encoding;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use encoding::{private_key_from_hex, public_key_from_hex, signature_from_hex};
pub use error::CryptoError;
pub use hash::{hash_identity, sha256, sha256_hex};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
