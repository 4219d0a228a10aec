//! SQLite-backed status store

use super::{StatusStore, StoreError};
use crate::db::Database;
use crate::pokedex::StatusMap;
use std::path::Path;
use std::sync::Mutex;

/// Local store over the app database. The connection sits behind a mutex so
/// background write-through threads can share the store.
pub struct LocalStore {
    db: Mutex<Database>,
}

impl LocalStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            db: Mutex::new(Database::open(path)?),
        })
    }

    /// Non-persistent store, kept as a last resort when the database file
    /// cannot be opened. The session still works, it just forgets on exit.
    pub fn in_memory() -> Self {
        Self {
            db: Mutex::new(Database::open_in_memory().expect("in-memory sqlite")),
        }
    }
}

impl StatusStore for LocalStore {
    fn label(&self) -> &'static str {
        "local"
    }

    fn load(&self, user_id: &str) -> Result<StatusMap, StoreError> {
        Ok(self.db.lock().unwrap().load_statuses(user_id)?)
    }

    fn save(&self, user_id: &str, statuses: &StatusMap) -> Result<(), StoreError> {
        Ok(self.db.lock().unwrap().save_statuses(user_id, statuses)?)
    }

    fn clear(&self, user_id: &str) -> Result<(), StoreError> {
        Ok(self.db.lock().unwrap().clear_statuses(user_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokedex;
    use crate::types::CaptureFlag;

    #[test]
    fn local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(&dir.path().join("dex.db")).unwrap();

        let mut statuses = StatusMap::new();
        let now = "2025-06-01T12:00:00Z".parse().unwrap();
        pokedex::set_caught(&mut statuses, 25, true, now);
        pokedex::set_flag(&mut statuses, 25, CaptureFlag::Lucky, true);

        store.save("trainer", &statuses).unwrap();
        assert_eq!(store.load("trainer").unwrap(), statuses);

        store.clear("trainer").unwrap();
        assert!(store.load("trainer").unwrap().is_empty());
    }
}
