//! The VoteChain node: wires storage, roster and ledger service together.

use std::sync::Arc;

use tracing::{info, warn};

use votechain_ledger::{validate_blocks, LedgerError};
use votechain_store::{ChainStore, MetaStore, StoreError};
use votechain_store_lmdb::{check_data_dir, check_integrity, LmdbEnvironment};
use votechain_types::SystemClock;

use crate::report::ChainReport;
use crate::{ElectionPolicy, LedgerService, NodeConfig, NodeError, Roster, RosterFile};

pub struct VoteNode {
    config: NodeConfig,
    env: LmdbEnvironment,
    service: Arc<LedgerService>,
}

impl VoteNode {
    /// Open (or initialise) the data directory and load the ledger.
    pub async fn open(config: NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;
        let env = open_environment(&config)?;

        let roster = Arc::new(Roster::load(Arc::new(env.roster_store()))?);
        if let Some(path) = &config.roster_file {
            let file = RosterFile::from_toml_file(path)?;
            let summary = roster.import(file).await?;
            info!(
                path = %path.display(),
                voters = summary.voters,
                candidates = summary.candidates,
                skipped = summary.skipped,
                "roster file imported"
            );
        }

        let service = LedgerService::open(
            config.ledger_params(),
            ElectionPolicy::from_config(&config),
            Arc::new(env.chain_store()),
            roster,
            Arc::new(SystemClock),
        )?;

        info!(
            data_dir = %config.data_dir.display(),
            difficulty = config.difficulty,
            election = %config.election_name,
            "node ready"
        );

        Ok(Self {
            config,
            env,
            service: Arc::new(service),
        })
    }

    pub fn service(&self) -> Arc<LedgerService> {
        Arc::clone(&self.service)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn environment(&self) -> &LmdbEnvironment {
        &self.env
    }
}

fn open_environment(config: &NodeConfig) -> Result<LmdbEnvironment, NodeError> {
    check_data_dir(&config.data_dir).map_err(NodeError::Config)?;
    let env = LmdbEnvironment::open(&config.data_dir, config.lmdb_map_size)?;

    let report = check_integrity(env.env())?;
    if !report.is_healthy() {
        for problem in &report.errors {
            warn!(%problem, "integrity check");
        }
        return Err(StoreError::Corruption(report.errors.join("; ")).into());
    }

    env.meta_store().ensure_schema()?;
    Ok(env)
}

/// Load the stored chain and run the validity walk without starting a node.
pub fn inspect_chain(config: &NodeConfig) -> Result<ChainReport, NodeError> {
    let env = open_environment(config)?;
    let blocks = env.chain_store().load_blocks()?;
    let length = blocks.len();

    let report = match validate_blocks(&config.ledger_params(), &blocks) {
        Ok(()) => ChainReport {
            valid: true,
            length,
            error: None,
        },
        Err(LedgerError::Empty) => ChainReport {
            valid: true,
            length: 0,
            error: None,
        },
        Err(err) => ChainReport {
            valid: false,
            length,
            error: Some(err.to_string()),
        },
    };
    Ok(report)
}
