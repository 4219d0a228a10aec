//! Session and sign-in state
//!
//! Sign-in against the sync endpoint is optional; the tracker always works
//! in demo mode with a locally saved user. All persistence is gated on a
//! user being present.

use crate::constants::KEY_DEMO_USER;
use crate::db::Database;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub display_name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Auth collaborator surface consumed by the rest of the app
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// True when the session never reached the sync endpoint
    pub demo_mode: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            user: None,
            loading: false,
            error: None,
            demo_mode: true,
        }
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }
}

fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "trainer".to_string()
    } else {
        slug
    }
}

/// Local-only user with a uid stable across launches for the same name
pub fn demo_user(display_name: &str, now: DateTime<Utc>) -> User {
    let name = display_name.trim();
    let name = if name.is_empty() { "Demo Trainer" } else { name };
    User {
        uid: format!("demo-{}", slugify(name)),
        display_name: name.to_string(),
        email: None,
        created_at: now,
    }
}

/// Restore the saved demo user. Malformed stored JSON is discarded.
pub fn restore_saved_user(db: &Database) -> Option<User> {
    let raw = db.get_setting(KEY_DEMO_USER).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(user) => {
            debug!("Restored saved user");
            Some(user)
        }
        Err(e) => {
            warn!(error = %e, "Discarding malformed saved user");
            db.delete_setting(KEY_DEMO_USER).ok();
            None
        }
    }
}

pub fn persist_user(db: &Database, user: &User) {
    match serde_json::to_string(user) {
        Ok(json) => {
            if let Err(e) = db.set_setting(KEY_DEMO_USER, &json) {
                warn!(error = %e, "Failed to save user");
            }
        }
        Err(e) => warn!(error = %e, "Failed to serialize user"),
    }
}

pub fn forget_user(db: &Database) {
    if let Err(e) = db.delete_setting(KEY_DEMO_USER) {
        warn!(error = %e, "Failed to clear saved user");
    }
}

/// Human-readable sign-in failure. The session continues in demo mode.
pub fn sign_in_error_message(detail: &str) -> String {
    format!(
        "Sign-in with the sync service failed ({}). Continuing in demo mode; your collection is stored on this device only.",
        detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn demo_uid_is_stable_and_slugged() {
        let a = demo_user("Ash Ketchum", now());
        let b = demo_user("Ash Ketchum", now());
        assert_eq!(a.uid, b.uid);
        assert_eq!(a.uid, "demo-ash-ketchum");
    }

    #[test]
    fn blank_names_fall_back_to_demo_trainer() {
        let user = demo_user("   ", now());
        assert_eq!(user.display_name, "Demo Trainer");
        assert_eq!(user.uid, "demo-demo-trainer");
    }

    #[test]
    fn saved_user_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert!(restore_saved_user(&db).is_none());

        let user = demo_user("Misty", now());
        persist_user(&db, &user);
        assert_eq!(restore_saved_user(&db), Some(user));

        forget_user(&db);
        assert!(restore_saved_user(&db).is_none());
    }

    #[test]
    fn malformed_saved_user_is_discarded() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting(KEY_DEMO_USER, "{not json").unwrap();
        assert!(restore_saved_user(&db).is_none());
        // The broken value is gone afterwards
        assert_eq!(db.get_setting(KEY_DEMO_USER).unwrap(), None);
    }
}
