//! Metadata storage trait.

use crate::StoreError;

/// Layout version written by the current code.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_KEY: &str = "schema_version";

/// Generic key-value store for bookkeeping that doesn't belong in any
/// domain-specific store.
pub trait MetaStore: Send + Sync {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stored schema version, if the database has ever been written.
    fn schema_version(&self) -> Result<Option<u32>, StoreError> {
        let Some(bytes) = self.get_meta(SCHEMA_KEY)? else {
            return Ok(None);
        };
        let raw: [u8; 4] = bytes.as_slice().try_into().map_err(|_| {
            StoreError::Corruption(format!("schema version has {} bytes", bytes.len()))
        })?;
        Ok(Some(u32::from_be_bytes(raw)))
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        self.put_meta(SCHEMA_KEY, &version.to_be_bytes())
    }

    /// Stamp a fresh database, or refuse one written by a different layout.
    fn ensure_schema(&self) -> Result<(), StoreError> {
        match self.schema_version()? {
            None => self.set_schema_version(SCHEMA_VERSION),
            Some(SCHEMA_VERSION) => Ok(()),
            Some(found) => Err(StoreError::Corruption(format!(
                "schema version {found}, expected {SCHEMA_VERSION}"
            ))),
        }
    }
}
