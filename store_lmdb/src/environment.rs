//! LMDB environment setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use heed::byteorder::BigEndian;
use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions};
use tracing::info;

use crate::{LmdbChainStore, LmdbError, LmdbMetaStore, LmdbRosterStore};

/// Named databases inside the environment.
pub(crate) const BLOCKS_DB: &str = "blocks";
pub(crate) const VOTERS_DB: &str = "voters";
pub(crate) const CANDIDATES_DB: &str = "candidates";
pub(crate) const META_DB: &str = "meta";

const MAX_DBS: u32 = 4;

/// Default map size: 1 GiB of address space, not disk.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    path: PathBuf,
    env: Arc<Env>,
    blocks_db: Database<U64<BigEndian>, Bytes>,
    voters_db: Database<Str, Bytes>,
    candidates_db: Database<U64<BigEndian>, Bytes>,
    meta_db: Database<Str, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per directory per process;
        // the node never opens the same path twice concurrently.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let blocks_db = env.create_database(&mut wtxn, Some(BLOCKS_DB))?;
        let voters_db = env.create_database(&mut wtxn, Some(VOTERS_DB))?;
        let candidates_db = env.create_database(&mut wtxn, Some(CANDIDATES_DB))?;
        let meta_db = env.create_database(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;

        info!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            path: path.to_path_buf(),
            env: Arc::new(env),
            blocks_db,
            voters_db,
            candidates_db,
            meta_db,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }

    pub fn chain_store(&self) -> LmdbChainStore {
        LmdbChainStore {
            env: Arc::clone(&self.env),
            blocks_db: self.blocks_db,
        }
    }

    pub fn roster_store(&self) -> LmdbRosterStore {
        LmdbRosterStore {
            env: Arc::clone(&self.env),
            voters_db: self.voters_db,
            candidates_db: self.candidates_db,
        }
    }

    pub fn meta_store(&self) -> LmdbMetaStore {
        LmdbMetaStore {
            env: Arc::clone(&self.env),
            meta_db: self.meta_db,
        }
    }
}
