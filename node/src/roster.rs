//! Voter roster and candidate registry.
//!
//! The ledger core only reads from it: which candidates exist, and which
//! public key a voter is bound to. Registrations are persisted through a
//! [`RosterStore`] before they become visible.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use votechain_crypto::public_key_from_hex;
use votechain_store::{RosterStore, StoreError};
use votechain_types::{CandidateInfo, PublicKey};

use crate::{NodeError, RegistrationError};

#[derive(Default)]
struct Registry {
    voters: HashMap<String, PublicKey>,
    candidates: Vec<CandidateInfo>,
    candidate_index: HashMap<String, usize>,
}

impl Registry {
    fn push_candidate(&mut self, candidate: CandidateInfo) {
        self.candidate_index
            .insert(candidate.id.clone(), self.candidates.len());
        self.candidates.push(candidate);
    }
}

pub struct Roster {
    registry: RwLock<Registry>,
    store: Arc<dyn RosterStore>,
}

impl Roster {
    /// Load every persisted registration.
    pub fn load(store: Arc<dyn RosterStore>) -> Result<Self, StoreError> {
        let mut registry = Registry::default();
        for (voter_id, key) in store.load_voters()? {
            registry.voters.insert(voter_id, key);
        }
        for candidate in store.load_candidates()? {
            registry.push_candidate(candidate);
        }
        info!(
            voters = registry.voters.len(),
            candidates = registry.candidates.len(),
            "roster loaded"
        );
        Ok(Self {
            registry: RwLock::new(registry),
            store,
        })
    }

    pub async fn is_registered(&self, candidate_id: &str) -> bool {
        self.registry
            .read()
            .await
            .candidate_index
            .contains_key(candidate_id)
    }

    pub async fn metadata(&self, candidate_id: &str) -> Option<CandidateInfo> {
        let registry = self.registry.read().await;
        registry
            .candidate_index
            .get(candidate_id)
            .map(|&i| registry.candidates[i].clone())
    }

    /// Candidates in registration order.
    pub async fn candidates(&self) -> Vec<CandidateInfo> {
        self.registry.read().await.candidates.clone()
    }

    pub async fn voter_key(&self, voter_id: &str) -> Option<PublicKey> {
        self.registry.read().await.voters.get(voter_id).copied()
    }

    pub async fn voter_count(&self) -> usize {
        self.registry.read().await.voters.len()
    }

    pub async fn candidate_count(&self) -> usize {
        self.registry.read().await.candidates.len()
    }

    pub async fn register_voter(
        &self,
        voter_id: &str,
        public_key: &str,
    ) -> Result<PublicKey, RegistrationError> {
        if voter_id.trim().is_empty() {
            return Err(RegistrationError::MissingField("voter_id"));
        }
        if voter_id.trim() != voter_id {
            return Err(RegistrationError::PaddedIdentifier("voter_id"));
        }
        if public_key.trim().is_empty() {
            return Err(RegistrationError::MissingField("public_key"));
        }
        let key = public_key_from_hex(public_key)
            .map_err(|e| RegistrationError::InvalidKey(e.to_string()))?;
        self.enroll(voter_id, key).await?;
        Ok(key)
    }

    /// Bind `voter_id` to an already-decoded key.
    ///
    /// The store write is one small commit made under the registry lock, so
    /// a voter is never visible before it is persisted.
    pub async fn enroll(&self, voter_id: &str, key: PublicKey) -> Result<(), RegistrationError> {
        let mut registry = self.registry.write().await;
        if registry.voters.contains_key(voter_id) {
            return Err(RegistrationError::DuplicateVoter(voter_id.to_owned()));
        }
        self.store.put_voter(voter_id, &key)?;
        registry.voters.insert(voter_id.to_owned(), key);
        info!(voter_id, "voter registered");
        Ok(())
    }

    pub async fn register_candidate(
        &self,
        candidate: CandidateInfo,
    ) -> Result<(), RegistrationError> {
        if candidate.id.trim().is_empty() {
            return Err(RegistrationError::MissingField("candidate_id"));
        }
        if candidate.id.trim() != candidate.id {
            return Err(RegistrationError::PaddedIdentifier("candidate_id"));
        }
        if candidate.name.trim().is_empty() {
            return Err(RegistrationError::MissingField("name"));
        }
        if candidate.party.trim().is_empty() {
            return Err(RegistrationError::MissingField("party"));
        }

        let mut registry = self.registry.write().await;
        if registry.candidate_index.contains_key(&candidate.id) {
            return Err(RegistrationError::DuplicateCandidate(candidate.id));
        }
        self.store.put_candidate(&candidate)?;
        info!(candidate_id = %candidate.id, name = %candidate.name, "candidate registered");
        registry.push_candidate(candidate);
        Ok(())
    }

    /// Register everything in `file` that isn't already known.
    ///
    /// Entries already present are skipped, so importing the same file on
    /// every start is harmless. A voter listed with a key different from the
    /// stored one keeps the stored key.
    pub async fn import(&self, file: RosterFile) -> Result<ImportSummary, RegistrationError> {
        let mut summary = ImportSummary::default();

        for entry in file.candidates {
            let candidate = CandidateInfo::new(entry.candidate_id, entry.name, entry.party);
            match self.register_candidate(candidate).await {
                Ok(()) => summary.candidates += 1,
                Err(RegistrationError::DuplicateCandidate(_)) => summary.skipped += 1,
                Err(e) => return Err(e),
            }
        }

        for entry in file.voters {
            match self.register_voter(&entry.voter_id, &entry.public_key).await {
                Ok(_) => summary.voters += 1,
                Err(RegistrationError::DuplicateVoter(id)) => {
                    if let Ok(listed) = public_key_from_hex(&entry.public_key) {
                        if self.voter_key(&id).await != Some(listed) {
                            warn!(voter_id = %id, "roster file key differs from registered key; keeping registered key");
                        }
                    }
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }
}

/// On-disk roster format.
///
/// ```toml
/// [[candidates]]
/// candidate_id = "C1"
/// name = "Ana"
/// party = "Blue"
///
/// [[voters]]
/// voter_id = "V1"
/// public_key = "3b6a27bc..."
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub candidates: Vec<CandidateEntry>,
    #[serde(default)]
    pub voters: Vec<VoterEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub candidate_id: String,
    pub name: String,
    pub party: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoterEntry {
    pub voter_id: String,
    pub public_key: String,
}

impl RosterFile {
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub voters: usize,
    pub candidates: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_crypto::keypair_from_seed;
    use votechain_nullables::NullStore;

    fn roster() -> (Roster, Arc<NullStore>) {
        let store = Arc::new(NullStore::new());
        (Roster::load(store.clone()).unwrap(), store)
    }

    #[tokio::test]
    async fn candidates_keep_registration_order() {
        let (roster, _) = roster();
        roster
            .register_candidate(CandidateInfo::new("C2", "Bea", "Green"))
            .await
            .unwrap();
        roster
            .register_candidate(CandidateInfo::new("C1", "Ana", "Blue"))
            .await
            .unwrap();
        let ids: Vec<_> = roster.candidates().await.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["C2", "C1"]);
        assert!(roster.is_registered("C1").await);
        assert_eq!(roster.metadata("C1").await.unwrap().party, "Blue");
        assert!(roster.metadata("C9").await.is_none());
    }

    #[tokio::test]
    async fn padded_ids_are_refused_not_trimmed() {
        let (roster, store) = roster();
        let key = keypair_from_seed(&[1u8; 32]).public.to_string();
        assert!(matches!(
            roster.register_voter(" V1 ", &key).await,
            Err(RegistrationError::PaddedIdentifier("voter_id"))
        ));
        assert!(matches!(
            roster
                .register_candidate(CandidateInfo::new("C1 ", "Ana", "Blue"))
                .await,
            Err(RegistrationError::PaddedIdentifier("candidate_id"))
        ));
        assert_eq!(roster.voter_count().await, 0);
        assert!(store.load_voters().unwrap().is_empty());

        roster.register_voter("V1", &key).await.unwrap();
        assert!(roster.voter_key("V1").await.is_some());
    }

    #[tokio::test]
    async fn duplicate_registrations_rejected() {
        let (roster, _) = roster();
        let key = keypair_from_seed(&[1u8; 32]).public.to_string();
        roster.register_voter("V1", &key).await.unwrap();
        assert!(matches!(
            roster.register_voter("V1", &key).await,
            Err(RegistrationError::DuplicateVoter(_))
        ));

        roster
            .register_candidate(CandidateInfo::new("C1", "Ana", "Blue"))
            .await
            .unwrap();
        assert!(matches!(
            roster
                .register_candidate(CandidateInfo::new("C1", "Other", "Red"))
                .await,
            Err(RegistrationError::DuplicateCandidate(_))
        ));
    }

    #[tokio::test]
    async fn malformed_key_rejected() {
        let (roster, _) = roster();
        assert!(matches!(
            roster.register_voter("V1", "not-hex").await,
            Err(RegistrationError::InvalidKey(_))
        ));
        assert!(matches!(
            roster.register_voter(" ", "ab").await,
            Err(RegistrationError::MissingField("voter_id"))
        ));
    }

    #[tokio::test]
    async fn failed_persist_is_not_visible() {
        let (roster, store) = roster();
        store.fail_writes(true);
        let key = keypair_from_seed(&[1u8; 32]).public.to_string();
        assert!(matches!(
            roster.register_voter("V1", &key).await,
            Err(RegistrationError::Store(_))
        ));
        assert_eq!(roster.voter_key("V1").await, None);
    }

    #[tokio::test]
    async fn registrations_survive_reload() {
        let (roster, store) = roster();
        let key = keypair_from_seed(&[4u8; 32]).public;
        roster.enroll("V1", key).await.unwrap();
        roster
            .register_candidate(CandidateInfo::new("C1", "Ana", "Blue"))
            .await
            .unwrap();

        let reloaded = Roster::load(store).unwrap();
        assert_eq!(reloaded.voter_key("V1").await, Some(key));
        assert_eq!(reloaded.candidate_count().await, 1);
    }

    #[tokio::test]
    async fn import_is_idempotent() {
        let key = keypair_from_seed(&[2u8; 32]).public.to_string();
        let file = RosterFile::from_toml_str(&format!(
            r#"
            [[candidates]]
            candidate_id = "C1"
            name = "Ana"
            party = "Blue"

            [[voters]]
            voter_id = "V1"
            public_key = "{key}"
            "#
        ))
        .unwrap();

        let (roster, _) = roster();
        let first = roster.import(file.clone()).await.unwrap();
        assert_eq!(
            first,
            ImportSummary {
                voters: 1,
                candidates: 1,
                skipped: 0
            }
        );
        let second = roster.import(file).await.unwrap();
        assert_eq!(second.skipped, 2);
        assert_eq!(roster.voter_count().await, 1);
    }
}
