//! LMDB database integrity checks.
//!
//! Run on startup to detect a damaged data directory before the node
//! starts serving votes.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::Env;

use crate::environment::{BLOCKS_DB, CANDIDATES_DB, META_DB, VOTERS_DB};
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

const EXPECTED_DATABASES: &[&str] = &[BLOCKS_DB, VOTERS_DB, CANDIDATES_DB, META_DB];

/// Open each expected database and count its entries.
///
/// Read failures and missing databases are recorded in the report rather
/// than causing a hard error.
pub fn check_integrity(env: &Arc<Env>) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        databases_checked: 0,
        total_entries: 0,
        errors: Vec::new(),
    };

    let rtxn = env.read_txn()?;

    for &db_name in EXPECTED_DATABASES {
        match env.open_database::<Bytes, Bytes>(&rtxn, Some(db_name)) {
            Ok(Some(db)) => {
                report.databases_checked += 1;
                match db.len(&rtxn) {
                    Ok(count) => report.total_entries += count,
                    Err(e) => report
                        .errors
                        .push(format!("failed to read database '{db_name}': {e}")),
                }
            }
            Ok(None) => report.errors.push(format!("database '{db_name}' is missing")),
            Err(e) => report
                .errors
                .push(format!("failed to open database '{db_name}': {e}")),
        }
    }

    Ok(report)
}

/// Check that a data directory looks usable before opening it.
///
/// A missing or empty directory is a fresh start. A populated directory
/// without `data.mdb` suggests the wrong path or a partial wipe.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let is_empty = path
        .read_dir()
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?
        .next()
        .is_none();
    if is_empty {
        return Ok(());
    }
    if !path.join("data.mdb").exists() {
        return Err(format!(
            "data directory {} is not empty but data.mdb is missing",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_paths_pass() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(&dir.path().join("nonexistent")).is_ok());
        assert!(check_data_dir(dir.path()).is_ok());
    }

    #[test]
    fn foreign_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        assert!(check_data_dir(dir.path()).is_err());
    }

    #[test]
    fn unhealthy_report() {
        let report = IntegrityReport {
            databases_checked: 3,
            total_entries: 100,
            errors: vec!["database 'meta' is missing".to_string()],
        };
        assert!(!report.is_healthy());
    }
}
