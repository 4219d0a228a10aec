//! HTTP sync store
//!
//! Talks to a document endpoint shaped like `PUT /users/{uid}/pokedex` with
//! the full record map as JSON. Every operation mirrors into the local
//! store first or falls back to it, so a remote outage mid-session never
//! blocks the UI or drops a toggle.

use super::{LocalStore, StatusStore, StoreError};
use crate::pokedex::StatusMap;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

pub struct RemoteStore {
    client: reqwest::blocking::Client,
    base_url: String,
    mirror: LocalStore,
}

impl RemoteStore {
    /// Probe the endpoint and build the store. Hands the local store back on
    /// failure so the caller can keep using it.
    pub fn connect(base_url: &str, mirror: LocalStore) -> Result<Self, (StoreError, LocalStore)> {
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(8))
            .build()
        {
            Ok(client) => client,
            Err(e) => return Err((StoreError::Http(e), mirror)),
        };

        let base_url = base_url.trim_end_matches('/').to_string();
        let probe = client.get(format!("{}/health", base_url)).send();
        match probe {
            Ok(response) if response.status().is_success() => Ok(Self {
                client,
                base_url,
                mirror,
            }),
            Ok(response) => Err((StoreError::Status(response.status().as_u16()), mirror)),
            Err(e) => Err((StoreError::Http(e), mirror)),
        }
    }

    fn document_url(base_url: &str, user_id: &str) -> String {
        format!("{}/users/{}/pokedex", base_url, user_id)
    }
}

impl StatusStore for RemoteStore {
    fn label(&self) -> &'static str {
        "remote"
    }

    fn load(&self, user_id: &str) -> Result<StatusMap, StoreError> {
        let url = Self::document_url(&self.base_url, user_id);
        match self.client.get(&url).send() {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                debug!(user = user_id, "No remote document yet");
                Ok(StatusMap::new())
            }
            Ok(response) if response.status().is_success() => {
                let statuses: StatusMap = response.json()?;
                // Refresh the mirror so a later outage serves current data
                if let Err(e) = self.mirror.save(user_id, &statuses) {
                    warn!(error = %e, "Failed to mirror remote statuses");
                }
                Ok(statuses)
            }
            Ok(response) => {
                warn!(status = %response.status(), "Remote load failed, using mirror");
                self.mirror.load(user_id)
            }
            Err(e) => {
                warn!(error = %e, "Remote unreachable, using mirror");
                self.mirror.load(user_id)
            }
        }
    }

    fn save(&self, user_id: &str, statuses: &StatusMap) -> Result<(), StoreError> {
        // Local mirror first: the user's toggle must survive even if the
        // remote write below fails.
        self.mirror.save(user_id, statuses)?;

        let url = Self::document_url(&self.base_url, user_id);
        match self.client.put(&url).json(statuses).send() {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => {
                warn!(status = %response.status(), "Remote save rejected, kept locally");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Remote save failed, kept locally");
                Ok(())
            }
        }
    }

    fn clear(&self, user_id: &str) -> Result<(), StoreError> {
        self.mirror.clear(user_id)?;

        let url = Self::document_url(&self.base_url, user_id);
        if let Err(e) = self.client.delete(&url).send() {
            warn!(error = %e, "Remote clear failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_urls_are_per_user() {
        assert_eq!(
            RemoteStore::document_url("https://sync.example.com", "abc123"),
            "https://sync.example.com/users/abc123/pokedex"
        );
    }
}
