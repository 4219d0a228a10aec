//! Capture-status persistence
//!
//! The session talks to one [`StatusStore`] chosen at sign-in; nothing
//! downstream ever branches on which backing store is in use. `LocalStore`
//! wraps the SQLite database. `RemoteStore` syncs against an HTTP document
//! endpoint and mirrors every write into the local store, so a dead remote
//! degrades to local-only without losing the user's toggles.

mod local;
mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use crate::pokedex::StatusMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub enum StoreError {
    Db(rusqlite::Error),
    Http(reqwest::Error),
    Status(u16),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Db(e) => write!(f, "database error: {}", e),
            StoreError::Http(e) => write!(f, "http error: {}", e),
            StoreError::Status(code) => write!(f, "unexpected http status {}", code),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Db(e)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Http(e)
    }
}

/// Backend-agnostic persistence for a user's capture records
pub trait StatusStore: Send + Sync {
    /// Short name for logs ("local" / "remote")
    fn label(&self) -> &'static str;

    /// Load the full record map for a user
    fn load(&self, user_id: &str) -> Result<StatusMap, StoreError>;

    /// Persist the full record map (merge-style upsert)
    fn save(&self, user_id: &str, statuses: &StatusMap) -> Result<(), StoreError>;

    /// Drop every record owned by a user
    fn clear(&self, user_id: &str) -> Result<(), StoreError>;
}

/// Pick the backing store once at session start. A configured sync endpoint
/// is probed; when it does not answer, the session runs on local storage
/// only (demo mode semantics).
pub fn open_store(db_path: &Path, sync_url: Option<&str>) -> Arc<dyn StatusStore> {
    let local = match LocalStore::open(db_path) {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "Falling back to in-memory status store");
            LocalStore::in_memory()
        }
    };

    if let Some(url) = sync_url {
        match RemoteStore::connect(url, local) {
            Ok(remote) => {
                info!(url = url, "Using remote status store");
                return Arc::new(remote);
            }
            Err((e, local)) => {
                warn!(url = url, error = %e, "Sync endpoint unreachable, using local store");
                return Arc::new(local);
            }
        }
    }

    info!("Using local status store");
    Arc::new(local)
}
