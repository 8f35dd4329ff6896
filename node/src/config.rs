//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use votechain_types::params::{DEFAULT_DIFFICULTY, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use votechain_types::{LedgerParams, Timestamp};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a VoteChain node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Data directory for ledger storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Leading zero hex digits a proof digest must carry.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,

    /// Proof stored in the genesis block.
    #[serde(default = "default_genesis_proof")]
    pub genesis_proof: u64,

    /// Upper bound on pending (unmined) votes.
    #[serde(default = "default_max_mempool_size")]
    pub max_mempool_size: usize,

    /// When true, a vote's public key must match the roster entry for its
    /// voter. When false, unknown voters are enrolled with the key they
    /// submit on their first vote.
    #[serde(default = "default_true")]
    pub require_registration: bool,

    /// Display name of the election.
    #[serde(default = "default_election_name")]
    pub election_name: String,

    /// Unix seconds after which submissions are refused.
    #[serde(default)]
    pub voting_closes_at: Option<u64>,

    /// TOML roster of voters and candidates imported at startup.
    #[serde(default)]
    pub roster_file: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// LMDB map size in bytes.
    #[serde(default = "default_lmdb_map_size")]
    pub lmdb_map_size: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./votechain_data")
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    5000
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_genesis_proof() -> u64 {
    GENESIS_PROOF
}

fn default_max_mempool_size() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_election_name() -> String {
    "VoteChain election".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_lmdb_map_size() -> usize {
    votechain_store_lmdb::environment::DEFAULT_MAP_SIZE
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// Reject values no node could run with.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.difficulty > votechain_work::MAX_DIFFICULTY {
            return Err(NodeError::Config(format!(
                "difficulty {} exceeds {}",
                self.difficulty,
                votechain_work::MAX_DIFFICULTY
            )));
        }
        if self.max_mempool_size == 0 {
            return Err(NodeError::Config("max_mempool_size must be positive".into()));
        }
        self.log_format_kind()?;
        crate::logging::parse_level(&self.log_level).map_err(NodeError::Config)?;
        Ok(())
    }

    pub fn ledger_params(&self) -> LedgerParams {
        LedgerParams {
            difficulty: self.difficulty,
            genesis_proof: self.genesis_proof,
            genesis_previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    pub fn voting_deadline(&self) -> Option<Timestamp> {
        self.voting_closes_at.map(Timestamp::new)
    }

    pub fn log_format_kind(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse().map_err(NodeError::Config)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind_address: default_bind_address(),
            rpc_port: default_rpc_port(),
            difficulty: default_difficulty(),
            genesis_proof: default_genesis_proof(),
            max_mempool_size: default_max_mempool_size(),
            require_registration: default_true(),
            election_name: default_election_name(),
            voting_closes_at: None,
            roster_file: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
            lmdb_map_size: default_lmdb_map_size(),
        }
    }
}
