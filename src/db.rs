//! Database module for Pokédex Tracker
//! Handles SQLite storage for capture-status records and user settings

use crate::pokedex::{CaptureStatus, StatusMap};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use std::path::Path;
use tracing::{debug, error};

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// In-memory database, used by tests and as a last-resort fallback
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS status (
                user_id TEXT NOT NULL,
                pokemon_id INTEGER NOT NULL,
                caught INTEGER NOT NULL DEFAULT 0,
                shiny INTEGER NOT NULL DEFAULT 0,
                lucky INTEGER NOT NULL DEFAULT 0,
                shadow INTEGER NOT NULL DEFAULT 0,
                purified INTEGER NOT NULL DEFAULT 0,
                date_added TEXT,
                PRIMARY KEY (user_id, pokemon_id)
            );

            CREATE INDEX IF NOT EXISTS idx_status_caught ON status(user_id, caught);

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Load every capture record for a user
    pub fn load_statuses(&self, user_id: &str) -> Result<StatusMap> {
        let mut stmt = self.conn.prepare(
            "SELECT pokemon_id, caught, shiny, lucky, shadow, purified, date_added
             FROM status WHERE user_id = ?1",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            let id: u32 = row.get(0)?;
            let date_added: Option<String> = row.get(6)?;
            Ok((
                id,
                CaptureStatus {
                    caught: row.get::<_, i32>(1)? != 0,
                    shiny: row.get::<_, i32>(2)? != 0,
                    lucky: row.get::<_, i32>(3)? != 0,
                    shadow: row.get::<_, i32>(4)? != 0,
                    purified: row.get::<_, i32>(5)? != 0,
                    date_added: date_added
                        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                        .map(|d| d.with_timezone(&Utc)),
                },
            ))
        })?;

        let mut statuses = StatusMap::new();
        for row in rows {
            match row {
                Ok((id, status)) => {
                    statuses.insert(id, status);
                }
                Err(e) => error!(error = %e, "Failed to read status row"),
            }
        }

        debug!(user = user_id, count = statuses.len(), "Statuses loaded");
        Ok(statuses)
    }

    /// Write a full record map for a user. Blank records are deleted so the
    /// table stays equivalent to "absence means all false".
    pub fn save_statuses(&self, user_id: &str, statuses: &StatusMap) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        for (id, status) in statuses {
            if *status == CaptureStatus::default() {
                tx.execute(
                    "DELETE FROM status WHERE user_id = ?1 AND pokemon_id = ?2",
                    params![user_id, id],
                )?;
                continue;
            }
            tx.execute(
                "INSERT INTO status (user_id, pokemon_id, caught, shiny, lucky, shadow, purified, date_added)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(user_id, pokemon_id) DO UPDATE SET
                    caught = excluded.caught,
                    shiny = excluded.shiny,
                    lucky = excluded.lucky,
                    shadow = excluded.shadow,
                    purified = excluded.purified,
                    date_added = excluded.date_added",
                params![
                    user_id,
                    id,
                    status.caught as i32,
                    status.shiny as i32,
                    status.lucky as i32,
                    status.shadow as i32,
                    status.purified as i32,
                    status.date_added.map(|d| d.to_rfc3339()),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Remove every record owned by a user
    pub fn clear_statuses(&self, user_id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM status WHERE user_id = ?1", params![user_id])?;
        Ok(())
    }

    /// Get a setting value
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Set a setting value
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a setting key
    pub fn delete_setting(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokedex;

    fn sample_map() -> StatusMap {
        let mut statuses = StatusMap::new();
        let now = "2025-06-01T12:00:00Z".parse().unwrap();
        pokedex::set_caught(&mut statuses, 1, true, now);
        pokedex::set_flag(&mut statuses, 1, crate::types::CaptureFlag::Shiny, true);
        pokedex::set_caught(&mut statuses, 152, true, now);
        statuses
    }

    #[test]
    fn status_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("dex.db")).unwrap();

        let statuses = sample_map();
        db.save_statuses("trainer", &statuses).unwrap();

        let loaded = db.load_statuses("trainer").unwrap();
        assert_eq!(loaded, statuses);
        assert!(loaded[&1].shiny);
        assert!(loaded[&1].date_added.is_some());
    }

    #[test]
    fn blank_records_are_removed_on_save() {
        let db = Database::open_in_memory().unwrap();
        let mut statuses = sample_map();
        db.save_statuses("trainer", &statuses).unwrap();

        let now = "2025-06-02T08:00:00Z".parse().unwrap();
        pokedex::set_caught(&mut statuses, 1, false, now);
        db.save_statuses("trainer", &statuses).unwrap();

        let loaded = db.load_statuses("trainer").unwrap();
        assert!(!loaded.contains_key(&1));
        assert!(loaded.contains_key(&152));
    }

    #[test]
    fn statuses_are_scoped_per_user() {
        let db = Database::open_in_memory().unwrap();
        db.save_statuses("ash", &sample_map()).unwrap();

        assert!(db.load_statuses("misty").unwrap().is_empty());
        db.clear_statuses("ash").unwrap();
        assert!(db.load_statuses("ash").unwrap().is_empty());
    }

    #[test]
    fn settings_kv_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_setting("active-tab").unwrap(), None);

        db.set_setting("active-tab", "events").unwrap();
        assert_eq!(
            db.get_setting("active-tab").unwrap().as_deref(),
            Some("events")
        );

        db.set_setting("active-tab", "stats").unwrap();
        assert_eq!(
            db.get_setting("active-tab").unwrap().as_deref(),
            Some("stats")
        );

        db.delete_setting("active-tab").unwrap();
        assert_eq!(db.get_setting("active-tab").unwrap(), None);
    }
}
