//! LMDB implementation of RosterStore.

use std::sync::Arc;

use heed::byteorder::BigEndian;
use heed::types::{Bytes, Str, U64};
use heed::{Database, Env};

use votechain_store::{RosterStore, StoreError};
use votechain_types::{CandidateInfo, PublicKey};

use crate::LmdbError;

pub struct LmdbRosterStore {
    pub(crate) env: Arc<Env>,
    /// voter_id -> raw 32-byte public key.
    pub(crate) voters_db: Database<Str, Bytes>,
    /// registration sequence -> bincode `CandidateInfo`.
    pub(crate) candidates_db: Database<U64<BigEndian>, Bytes>,
}

fn decode_key(voter_id: &str, bytes: &[u8]) -> Result<PublicKey, StoreError> {
    let raw: [u8; 32] = bytes.try_into().map_err(|_| {
        StoreError::Corruption(format!(
            "key for voter {voter_id} has {} bytes",
            bytes.len()
        ))
    })?;
    Ok(PublicKey(raw))
}

impl RosterStore for LmdbRosterStore {
    fn put_voter(&self, voter_id: &str, key: &PublicKey) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .voters_db
            .get(&wtxn, voter_id)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(format!("voter {voter_id}")));
        }
        self.voters_db
            .put(&mut wtxn, voter_id, key.as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_voter(&self, voter_id: &str) -> Result<Option<PublicKey>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        self.voters_db
            .get(&rtxn, voter_id)
            .map_err(LmdbError::from)?
            .map(|bytes| decode_key(voter_id, bytes))
            .transpose()
    }

    fn load_voters(&self) -> Result<Vec<(String, PublicKey)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut voters = Vec::new();
        for entry in self.voters_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (voter_id, bytes) = entry.map_err(LmdbError::from)?;
            voters.push((voter_id.to_owned(), decode_key(voter_id, bytes)?));
        }
        Ok(voters)
    }

    fn put_candidate(&self, candidate: &CandidateInfo) -> Result<(), StoreError> {
        let bytes = bincode::serialize(candidate).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut next = 0u64;
        for entry in self.candidates_db.iter(&wtxn).map_err(LmdbError::from)? {
            let (seq, existing) = entry.map_err(LmdbError::from)?;
            let existing: CandidateInfo =
                bincode::deserialize(existing).map_err(LmdbError::from)?;
            if existing.id == candidate.id {
                return Err(StoreError::Duplicate(format!("candidate {}", candidate.id)));
            }
            next = seq + 1;
        }
        self.candidates_db
            .put(&mut wtxn, &next, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn load_candidates(&self) -> Result<Vec<CandidateInfo>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut candidates = Vec::new();
        for entry in self.candidates_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (_, bytes) = entry.map_err(LmdbError::from)?;
            candidates.push(bincode::deserialize(bytes).map_err(LmdbError::from)?);
        }
        Ok(candidates)
    }
}
