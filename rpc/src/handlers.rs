//! RPC request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use votechain_ledger::{Block, Transaction};
use votechain_node::{
    ChainDump, ChainReport, ElectionResults, ElectionStatus, LedgerService, PendingVotes,
};
use votechain_types::{CandidateInfo, Timestamp};

use crate::RpcError;

pub type ApiResult<T> = Result<Json<T>, RpcError>;
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), RpcError>;

// ── Votes ────────────────────────────────────────────────────────────────

/// Missing fields deserialize as blank so validation can name them.
#[derive(Deserialize)]
pub struct SubmitVoteRequest {
    #[serde(default)]
    pub voter_id: String,
    #[serde(default)]
    pub candidate_id: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub public_key: String,
    /// Seconds since epoch. Stamped on arrival when absent.
    pub timestamp: Option<u64>,
}

impl SubmitVoteRequest {
    fn into_transaction(self) -> Transaction {
        let timestamp = self.timestamp.map(Timestamp::new).unwrap_or_else(Timestamp::now);
        Transaction::new(
            self.voter_id,
            self.candidate_id,
            self.signature,
            self.public_key,
            timestamp,
        )
    }
}

#[derive(Serialize)]
pub struct SubmitVoteResponse {
    pub message: String,
    pub block_index: u64,
    pub pending_votes: usize,
}

pub async fn submit_vote(
    State(service): State<Arc<LedgerService>>,
    payload: Result<Json<SubmitVoteRequest>, JsonRejection>,
) -> CreatedResult<SubmitVoteResponse> {
    let Json(request) = payload?;
    let receipt = service.submit_vote(request.into_transaction()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitVoteResponse {
            message: format!("Vote will be added to Block {}", receipt.block_index),
            block_index: receipt.block_index,
            pending_votes: receipt.pending_votes,
        }),
    ))
}

pub async fn pending_votes(State(service): State<Arc<LedgerService>>) -> Json<PendingVotes> {
    Json(service.pending().await)
}

// ── Mining ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub timestamp: Timestamp,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
    pub hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Mined".into(),
            index: block.index,
            timestamp: block.timestamp,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
            hash: block.hash,
        }
    }
}

pub async fn mine(State(service): State<Arc<LedgerService>>) -> ApiResult<MineResponse> {
    let block = service.mine_block().await?;
    Ok(Json(block.into()))
}

// ── Chain ────────────────────────────────────────────────────────────────

pub async fn chain(State(service): State<Arc<LedgerService>>) -> Json<ChainDump> {
    Json(service.dump_chain().await)
}

pub async fn validate_chain(State(service): State<Arc<LedgerService>>) -> Json<ChainReport> {
    Json(service.verify_chain().await)
}

// ── Election ─────────────────────────────────────────────────────────────

pub async fn election_status(State(service): State<Arc<LedgerService>>) -> Json<ElectionStatus> {
    Json(service.status().await)
}

pub async fn election_results(
    State(service): State<Arc<LedgerService>>,
) -> Json<ElectionResults> {
    Json(service.results().await)
}

// ── Registration ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterVoterRequest {
    #[serde(default)]
    pub voter_id: String,
    #[serde(default)]
    pub public_key: String,
}

#[derive(Serialize)]
pub struct RegisterVoterResponse {
    pub message: String,
    pub voter_id: String,
    pub public_key: String,
}

pub async fn register_voter(
    State(service): State<Arc<LedgerService>>,
    payload: Result<Json<RegisterVoterRequest>, JsonRejection>,
) -> CreatedResult<RegisterVoterResponse> {
    let Json(request) = payload?;
    let key = service
        .register_voter(&request.voter_id, &request.public_key)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterVoterResponse {
            message: format!("Voter {} registered", request.voter_id),
            voter_id: request.voter_id,
            public_key: key.to_string(),
        }),
    ))
}

#[derive(Deserialize)]
pub struct RegisterCandidateRequest {
    #[serde(default, alias = "id")]
    pub candidate_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub party: String,
}

#[derive(Serialize)]
pub struct RegisterCandidateResponse {
    pub message: String,
    pub candidate_id: String,
}

pub async fn register_candidate(
    State(service): State<Arc<LedgerService>>,
    payload: Result<Json<RegisterCandidateRequest>, JsonRejection>,
) -> CreatedResult<RegisterCandidateResponse> {
    let Json(request) = payload?;
    let info = CandidateInfo::new(&request.candidate_id, request.name, request.party);
    service.register_candidate(info).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterCandidateResponse {
            message: format!("Candidate {} registered", request.candidate_id),
            candidate_id: request.candidate_id,
        }),
    ))
}

/// Fallback for unknown paths.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "not found", "reason": "not_found" })),
    )
}
