//! The ledger service: sole owner of the chain and the mempool.
//!
//! Lock discipline:
//! - `state` guards chain + mempool together. Submissions hold it for
//!   writing across the duplicate check and the insert, so two votes by the
//!   same voter can never both land.
//! - `mining` serializes block production. Its guard travels into the
//!   blocking proof search, so a search outlives a caller that gave up on
//!   it and still excludes the next one. The search runs with `state`
//!   released; the write lock is re-taken only to append the block and drop
//!   exactly the votes that were snapshotted.
//! - Store writes are single small LMDB commits made while the owning lock
//!   is held, so nothing becomes visible before it is durable.
//! - Roster locks are never held together with `state`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use votechain_crypto::public_key_from_hex;
use votechain_ledger::{
    Block, Chain, Ed25519Verifier, LedgerError, SignatureVerifier, Transaction,
};
use votechain_store::ChainStore;
use votechain_types::{CandidateInfo, Clock, LedgerParams, PublicKey, Timestamp};
use votechain_work::ProofGenerator;

use crate::mempool::{Mempool, MempoolRejection};
use crate::report::{
    CandidateResult, ChainDump, ChainReport, ElectionResults, ElectionStatus, PendingVotes,
    SubmitReceipt,
};
use crate::{MineError, NodeConfig, NodeError, RegistrationError, Rejection, Roster, VoteLocation};

/// Name and party reported for votes whose candidate is not on the roster.
const UNKNOWN: &str = "Unknown";

/// Election rules layered on top of the chain.
#[derive(Clone, Debug)]
pub struct ElectionPolicy {
    pub name: String,
    pub voting_closes_at: Option<Timestamp>,
    pub require_registration: bool,
    pub max_mempool_size: usize,
}

impl ElectionPolicy {
    pub fn from_config(config: &NodeConfig) -> Self {
        Self {
            name: config.election_name.clone(),
            voting_closes_at: config.voting_deadline(),
            require_registration: config.require_registration,
            max_mempool_size: config.max_mempool_size,
        }
    }
}

impl Default for ElectionPolicy {
    fn default() -> Self {
        Self::from_config(&NodeConfig::default())
    }
}

struct LedgerState {
    chain: Chain,
    mempool: Mempool,
    /// Set once the chain fails validation; never cleared.
    corruption: Option<LedgerError>,
}

/// How a submitted key relates to the roster.
enum Identity {
    Bound,
    Mismatch,
    Unregistered,
    Enroll(PublicKey),
}

pub struct LedgerService {
    state: RwLock<LedgerState>,
    mining: Arc<Mutex<()>>,
    generator: ProofGenerator,
    verifier: Arc<dyn SignatureVerifier>,
    roster: Arc<Roster>,
    store: Arc<dyn ChainStore>,
    clock: Arc<dyn Clock>,
    policy: ElectionPolicy,
    cancel: Arc<AtomicBool>,
}

impl LedgerService {
    /// Load the chain from `store`, seeding genesis into an empty store.
    ///
    /// A stored chain that fails validation is still loaded so it can be
    /// inspected, but the service refuses votes and mining from then on.
    pub fn open(
        params: LedgerParams,
        policy: ElectionPolicy,
        store: Arc<dyn ChainStore>,
        roster: Arc<Roster>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NodeError> {
        let generator = ProofGenerator::new(params.difficulty)?;
        let blocks = store.load_blocks()?;

        let (chain, corruption) = if blocks.is_empty() {
            let chain = Chain::new(params);
            store.append_block(chain.last_block())?;
            info!(hash = %chain.last_block().hash, "empty store, genesis block created");
            (chain, None)
        } else {
            match Chain::from_blocks(params.clone(), blocks.clone()) {
                Ok(chain) => {
                    info!(blocks = chain.len(), votes = chain.committed_votes(), "chain loaded");
                    (chain, None)
                }
                Err(err @ LedgerError::Corrupted { .. }) => {
                    warn!(error = %err, "stored chain is invalid, starting read-only");
                    (Chain::from_blocks_unchecked(params, blocks)?, Some(err))
                }
                Err(err) => return Err(err.into()),
            }
        };

        Ok(Self {
            state: RwLock::new(LedgerState {
                chain,
                mempool: Mempool::new(policy.max_mempool_size),
                corruption,
            }),
            mining: Arc::new(Mutex::new(())),
            generator,
            verifier: Arc::new(Ed25519Verifier),
            roster,
            store,
            clock,
            policy,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Swap the signature scheme.
    pub fn with_verifier(mut self, verifier: Arc<dyn SignatureVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    pub fn policy(&self) -> &ElectionPolicy {
        &self.policy
    }

    pub fn voting_open(&self) -> bool {
        match self.policy.voting_closes_at {
            Some(deadline) => !self.clock.now().has_reached(deadline),
            None => true,
        }
    }

    /// Whether a proof search currently holds the mining slot.
    pub fn is_mining(&self) -> bool {
        self.mining.try_lock().is_err()
    }

    pub async fn is_corrupted(&self) -> bool {
        self.state.read().await.corruption.is_some()
    }

    /// Validate and admit a vote into the mempool.
    pub async fn submit_vote(&self, transaction: Transaction) -> Result<SubmitReceipt, Rejection> {
        let result = self.admit(transaction).await;
        if let Err(rejection) = &result {
            warn!(reason = rejection.code(), "vote rejected: {rejection}");
        }
        result
    }

    async fn admit(&self, transaction: Transaction) -> Result<SubmitReceipt, Rejection> {
        transaction.validate_fields()?;
        if !self.voting_open() {
            return Err(Rejection::ElectionClosed);
        }

        // Everything that doesn't depend on chain/mempool is computed before
        // taking the state lock.
        let signature_ok = self.verifier.verify(&transaction);
        let candidate_known = self.roster.is_registered(&transaction.candidate_id).await;
        let identity = self.identity_of(&transaction).await;
        let voter_id = transaction.voter_id.clone();

        let receipt = {
            let mut state = self.state.write().await;
            if state.corruption.is_some() {
                return Err(Rejection::ChainCorrupted);
            }
            if state.mempool.contains_voter(&voter_id) {
                return Err(duplicate(&voter_id, VoteLocation::Mempool));
            }
            if state.chain.contains_voter(&voter_id) {
                return Err(duplicate(&voter_id, VoteLocation::Chain));
            }
            if !candidate_known {
                return Err(Rejection::UnknownCandidate(transaction.candidate_id));
            }
            if !signature_ok {
                return Err(Rejection::Signature);
            }
            match identity {
                Identity::Mismatch => return Err(Rejection::IdentityMismatch(voter_id)),
                Identity::Unregistered => return Err(Rejection::UnregisteredVoter(voter_id)),
                Identity::Bound | Identity::Enroll(_) => {}
            }

            let capacity = state.mempool.capacity();
            state
                .mempool
                .insert(transaction)
                .map_err(|rejection| match rejection {
                    MempoolRejection::Duplicate => duplicate(&voter_id, VoteLocation::Mempool),
                    MempoolRejection::Full => Rejection::MempoolFull(capacity),
                })?;

            SubmitReceipt {
                block_index: state.chain.last_block().index + 1,
                pending_votes: state.mempool.len(),
            }
        };

        if let Identity::Enroll(key) = identity {
            match self.roster.enroll(&voter_id, key).await {
                Ok(()) | Err(RegistrationError::DuplicateVoter(_)) => {}
                Err(e) => warn!(%voter_id, error = %e, "failed to enroll voter"),
            }
        }

        debug!(%voter_id, block_index = receipt.block_index, "vote accepted");
        Ok(receipt)
    }

    async fn identity_of(&self, transaction: &Transaction) -> Identity {
        let submitted = public_key_from_hex(&transaction.public_key).ok();
        match self.roster.voter_key(&transaction.voter_id).await {
            Some(registered) if submitted == Some(registered) => Identity::Bound,
            Some(_) => Identity::Mismatch,
            None if self.policy.require_registration => Identity::Unregistered,
            None => submitted.map_or(Identity::Unregistered, Identity::Enroll),
        }
    }

    /// Mine every vote pending at the time of the call into a new block.
    ///
    /// Votes that arrive while the proof search runs stay pending for the
    /// next block. Concurrent calls queue behind each other.
    pub async fn mine_block(&self) -> Result<Block, MineError> {
        let mining = Arc::clone(&self.mining).lock_owned().await;
        if self.cancel.load(Ordering::SeqCst) {
            return Err(MineError::Cancelled);
        }

        let (snapshot, last_proof) = {
            let state = self.state.read().await;
            if state.corruption.is_some() {
                return Err(MineError::ChainCorrupted);
            }
            if state.mempool.is_empty() {
                return Err(MineError::Empty);
            }
            (state.mempool.snapshot_ids(), state.chain.last_proof())
        };

        debug!(votes = snapshot.len(), last_proof, "searching for proof");
        let generator = self.generator;
        let cancel = Arc::clone(&self.cancel);
        let (proof, _mining) = tokio::task::spawn_blocking(move || {
            (generator.mine_cancellable(last_proof, &cancel), mining)
        })
        .await
        .map_err(|e| MineError::Worker(e.to_string()))?;
        let proof = proof?;

        let timestamp = self.clock.now();
        let mut state = self.state.write().await;
        if state.corruption.is_some() {
            return Err(MineError::ChainCorrupted);
        }

        let LedgerState { chain, mempool, .. } = &mut *state;
        let transactions = mempool.select(&snapshot);
        let store = &self.store;
        let block = chain
            .append_with(transactions, proof, timestamp, |block| {
                store.append_block(block).map_err(MineError::from)
            })
            .inspect_err(|e| error!(error = %e, "failed to append mined block"))?
            .clone();
        mempool.remove(&snapshot);

        info!(
            index = block.index,
            votes = block.transactions.len(),
            proof = block.proof,
            hash = %block.hash,
            "block mined"
        );
        Ok(block)
    }

    /// Stop any in-flight proof search and refuse further mining.
    pub fn cancel_mining(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub async fn status(&self) -> ElectionStatus {
        let registered_candidates = self.roster.candidate_count().await;
        let state = self.state.read().await;
        let pending_new = state
            .mempool
            .transactions()
            .iter()
            .filter(|tx| !state.chain.contains_voter(&tx.voter_id))
            .count();

        ElectionStatus {
            registered_voters: state.chain.voter_count() + pending_new,
            registered_candidates,
            votes_cast: state.chain.committed_votes(),
            blockchain_length: state.chain.len(),
            pending_votes: state.mempool.len(),
            election_name: self.policy.name.clone(),
            voting_open: self.voting_open(),
        }
    }

    /// Committed tally joined with candidate metadata.
    pub async fn results(&self) -> ElectionResults {
        let candidates = self.roster.candidates().await;
        let tally = self.state.read().await.chain.tally();

        let known: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        let mut results: Vec<CandidateResult> = candidates
            .iter()
            .map(|c| CandidateResult {
                id: c.id.clone(),
                name: c.name.clone(),
                party: c.party.clone(),
                votes: tally.get(&c.id),
            })
            .collect();
        results.extend(
            tally
                .iter()
                .filter(|(id, _)| !known.contains(id))
                .map(|(id, votes)| CandidateResult {
                    id: id.to_owned(),
                    name: UNKNOWN.to_owned(),
                    party: UNKNOWN.to_owned(),
                    votes,
                }),
        );
        // Stable: ties keep registration order.
        results.sort_by(|a, b| b.votes.cmp(&a.votes));

        ElectionResults {
            results,
            total_votes: tally.total(),
        }
    }

    pub async fn dump_chain(&self) -> ChainDump {
        let state = self.state.read().await;
        ChainDump {
            chain: state.chain.blocks().to_vec(),
            length: state.chain.len(),
        }
    }

    /// Run the validity walk; a failure latches read-only mode.
    pub async fn verify_chain(&self) -> ChainReport {
        let (length, verdict) = {
            let state = self.state.read().await;
            (state.chain.len(), state.chain.validate())
        };

        match verdict {
            Ok(()) => ChainReport {
                valid: true,
                length,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "chain validation failed, disabling mining and submissions");
                let message = err.to_string();
                let mut state = self.state.write().await;
                state.corruption.get_or_insert(err);
                ChainReport {
                    valid: false,
                    length,
                    error: Some(message),
                }
            }
        }
    }

    pub async fn pending(&self) -> PendingVotes {
        let state = self.state.read().await;
        PendingVotes {
            transactions: state.mempool.transactions().to_vec(),
            count: state.mempool.len(),
        }
    }

    pub async fn register_voter(
        &self,
        voter_id: &str,
        public_key: &str,
    ) -> Result<PublicKey, RegistrationError> {
        self.roster.register_voter(voter_id, public_key).await
    }

    pub async fn register_candidate(
        &self,
        candidate: CandidateInfo,
    ) -> Result<(), RegistrationError> {
        self.roster.register_candidate(candidate).await
    }
}

fn duplicate(voter_id: &str, location: VoteLocation) -> Rejection {
    Rejection::DuplicateVote {
        voter_id: voter_id.to_owned(),
        location,
    }
}
