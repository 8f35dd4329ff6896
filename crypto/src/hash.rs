//! SHA-256 hashing for blocks, proofs and voter identities.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// SHA-256 digest as 64 lowercase hex digits.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// One-way hash of a voter's real-world identity.
///
/// Lets clients derive a stable, anonymized `voter_id` (e.g. from a national
/// id number) without the ledger ever seeing the identity itself.
pub fn hash_identity(identity: &str, salt: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identity.as_bytes());
    if let Some(salt) = salt {
        hasher.update(salt.as_bytes());
    }
    hex::encode(hasher.finalize())
}
