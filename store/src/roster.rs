//! Voter roster and candidate list storage.

use crate::StoreError;
use votechain_types::{CandidateInfo, PublicKey};

/// Registered voters and candidates.
pub trait RosterStore: Send + Sync {
    /// Bind `voter_id` to its public key. Fails with `Duplicate` if already bound.
    fn put_voter(&self, voter_id: &str, key: &PublicKey) -> Result<(), StoreError>;

    fn get_voter(&self, voter_id: &str) -> Result<Option<PublicKey>, StoreError>;

    /// Every registered voter. Order is unspecified.
    fn load_voters(&self) -> Result<Vec<(String, PublicKey)>, StoreError>;

    /// Append a candidate. Fails with `Duplicate` if the id is already registered.
    fn put_candidate(&self, candidate: &CandidateInfo) -> Result<(), StoreError>;

    /// Candidates in registration order.
    fn load_candidates(&self) -> Result<Vec<CandidateInfo>, StoreError>;
}
