//! VoteChain daemon: entry point for running an election ledger node.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use votechain_crypto::{
    generate_keypair, hash_identity, keypair_from_private, keypair_from_seed, private_key_from_hex,
    sign_message,
};
use votechain_ledger::signing_message;
use votechain_node::{init_logging, inspect_chain, NodeConfig, ShutdownController, VoteNode};
use votechain_rpc::RpcServer;
use votechain_types::KeyPair;

#[derive(Parser)]
#[command(name = "votechain", about = "Proof-of-work e-voting ledger node")]
struct Cli {
    /// Data directory for ledger storage.
    #[arg(long, env = "VOTECHAIN_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Address the HTTP server binds to.
    #[arg(long, env = "VOTECHAIN_BIND_ADDRESS", global = true)]
    bind_address: Option<String>,

    /// HTTP port.
    #[arg(long, env = "VOTECHAIN_RPC_PORT", global = true)]
    rpc_port: Option<u16>,

    /// Leading zero hex digits required of a proof digest.
    #[arg(long, env = "VOTECHAIN_DIFFICULTY", global = true)]
    difficulty: Option<u32>,

    /// Upper bound on pending votes.
    #[arg(long, env = "VOTECHAIN_MAX_MEMPOOL_SIZE", global = true)]
    max_mempool_size: Option<usize>,

    /// Enroll unknown voters with the key on their first vote.
    #[arg(long, env = "VOTECHAIN_OPEN_REGISTRATION", global = true)]
    open_registration: bool,

    /// Display name of the election.
    #[arg(long, env = "VOTECHAIN_ELECTION_NAME", global = true)]
    election_name: Option<String>,

    /// Unix seconds after which votes are refused.
    #[arg(long, env = "VOTECHAIN_VOTING_CLOSES_AT", global = true)]
    voting_closes_at: Option<u64>,

    /// TOML roster of voters and candidates to import at startup.
    #[arg(long, env = "VOTECHAIN_ROSTER_FILE", global = true)]
    roster_file: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VOTECHAIN_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VOTECHAIN_LOG_FORMAT", global = true)]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VOTECHAIN_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Node operations.
    #[command(name = "node")]
    Node {
        #[command(subcommand)]
        action: NodeAction,
    },
    /// Print a new Ed25519 key pair as hex.
    Keygen {
        /// Derive the pair from a 32-byte hex seed instead of the OS RNG.
        #[arg(long)]
        seed_hex: Option<String>,
    },
    /// Sign a ballot and print the signature hex.
    Sign {
        #[arg(long)]
        private_key: String,
        #[arg(long)]
        voter_id: String,
        #[arg(long)]
        candidate_id: String,
    },
    /// Derive an anonymized voter id from an identity string.
    HashIdentity {
        #[arg(long)]
        identity: String,
        #[arg(long)]
        salt: Option<String>,
    },
    /// Load the stored chain and check every block.
    Validate,
}

#[derive(clap::Subcommand)]
enum NodeAction {
    /// Run the node and its HTTP API.
    Run,
}

impl Cli {
    /// File settings first, then env vars and flags on top.
    fn node_config(&self) -> anyhow::Result<NodeConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let path = path.to_string_lossy();
                NodeConfig::from_toml_file(&path)
                    .with_context(|| format!("loading config file {path}"))?
            }
            None => NodeConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(bind_address) = &self.bind_address {
            config.bind_address = bind_address.clone();
        }
        if let Some(port) = self.rpc_port {
            config.rpc_port = port;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(size) = self.max_mempool_size {
            config.max_mempool_size = size;
        }
        if self.open_registration {
            config.require_registration = false;
        }
        if let Some(name) = &self.election_name {
            config.election_name = name.clone();
        }
        if let Some(closes_at) = self.voting_closes_at {
            config.voting_closes_at = Some(closes_at);
        }
        if let Some(roster) = &self.roster_file {
            config.roster_file = Some(roster.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.log_format = format.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Node {
            action: NodeAction::Run,
        } => run_node(cli.node_config()?).await,
        Command::Keygen { seed_hex } => {
            let keys = match seed_hex {
                Some(seed) => {
                    let seed = private_key_from_hex(seed).context("seed must be 32 bytes of hex")?;
                    keypair_from_seed(seed.as_bytes())
                }
                None => generate_keypair(),
            };
            print_keypair(&keys);
            Ok(())
        }
        Command::Sign {
            private_key,
            voter_id,
            candidate_id,
        } => {
            let private = private_key_from_hex(private_key).context("invalid private key")?;
            let keys = keypair_from_private(private);
            let signature = sign_message(&signing_message(voter_id, candidate_id), &keys.private);
            println!("voter_id:     {voter_id}");
            println!("candidate_id: {candidate_id}");
            println!("public_key:   {}", keys.public);
            println!("signature:    {signature}");
            Ok(())
        }
        Command::HashIdentity { identity, salt } => {
            println!("{}", hash_identity(identity, salt.as_deref()));
            Ok(())
        }
        Command::Validate => {
            let config = cli.node_config()?;
            let report = inspect_chain(&config)
                .with_context(|| format!("opening {}", config.data_dir.display()))?;
            println!("blocks: {}", report.length);
            match report.error {
                None => {
                    println!("chain is valid");
                    Ok(())
                }
                Some(error) => bail!("chain is corrupted: {error}"),
            }
        }
    }
}

fn print_keypair(keys: &KeyPair) {
    println!("public_key:  {}", keys.public);
    println!("private_key: {}", hex::encode(keys.private.as_bytes()));
}

async fn run_node(config: NodeConfig) -> anyhow::Result<()> {
    init_logging(config.log_format_kind()?, &config.log_level)?;

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.rpc_port)
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address))?;

    tracing::info!(
        %addr,
        difficulty = config.difficulty,
        require_registration = config.require_registration,
        "starting VoteChain node"
    );

    let node = VoteNode::open(config).await?;
    let service = node.service();

    let shutdown = Arc::new(ShutdownController::new());
    let _mining_hook = shutdown.cancel_mining_on_shutdown(Arc::clone(&service));
    let server_stop = shutdown.signalled();
    let signals = Arc::clone(&shutdown);
    tokio::spawn(async move { signals.wait_for_signal().await });

    RpcServer::new(addr, service).start(server_stop).await?;

    tracing::info!("VoteChain daemon exited cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "votechain",
            "--difficulty",
            "2",
            "--open-registration",
            "--election-name",
            "Board 2026",
            "node",
            "run",
        ])
        .unwrap();
        let config = cli.node_config().unwrap();
        assert_eq!(config.difficulty, 2);
        assert!(!config.require_registration);
        assert_eq!(config.election_name, "Board 2026");
        assert_eq!(config.rpc_port, NodeConfig::default().rpc_port);
    }

    #[test]
    fn out_of_range_difficulty_is_rejected() {
        let cli = Cli::try_parse_from(["votechain", "--difficulty", "99", "validate"]).unwrap();
        assert!(cli.node_config().is_err());
    }

    #[test]
    fn sign_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "votechain",
            "sign",
            "--private-key",
            "00",
            "--voter-id",
            "V1",
            "--candidate-id",
            "C1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Sign { .. }));
    }
}
