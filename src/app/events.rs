//! Live event feed
//!
//! The feed is an opaque, already-shaped list fetched from a static JSON
//! manifest. Fetches run on a background thread and hand their result to
//! the UI thread through egui's context memory; the periodic refresh and a
//! manual refresh race benignly, last write wins.

use super::App;
use crate::constants::{EVENTS_FEED_URL, EVENT_REFRESH_SECS, KEY_EVENT_NOTIFICATIONS};
use crate::db::Database;
use crate::types::{EventFeed, EventKind, LiveEvent};
use chrono::{DateTime, Utc};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EventStatusFilter {
    #[default]
    All,
    Active,
    Upcoming,
    Ended,
}

impl EventStatusFilter {
    pub const ALL: [EventStatusFilter; 4] = [
        EventStatusFilter::All,
        EventStatusFilter::Active,
        EventStatusFilter::Upcoming,
        EventStatusFilter::Ended,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventStatusFilter::All => "All",
            EventStatusFilter::Active => "Active",
            EventStatusFilter::Upcoming => "Upcoming",
            EventStatusFilter::Ended => "Ended",
        }
    }
}

/// Display-only filtering of the feed; no catalog joins happen here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventFilter {
    pub search: String,
    pub kind: Option<EventKind>,
    pub status: EventStatusFilter,
    pub region: Option<String>,
}

pub fn filter_events<'a>(
    events: &'a [LiveEvent],
    filter: &EventFilter,
    now: DateTime<Utc>,
) -> Vec<&'a LiveEvent> {
    let query = filter.search.trim().to_lowercase();

    events
        .iter()
        .filter(|e| {
            if !query.is_empty() && !e.name.to_lowercase().contains(&query) {
                return false;
            }
            if let Some(kind) = filter.kind {
                if e.kind != kind {
                    return false;
                }
            }
            let keep = match filter.status {
                EventStatusFilter::All => true,
                EventStatusFilter::Active => e.is_active(now),
                EventStatusFilter::Upcoming => e.is_upcoming(now),
                EventStatusFilter::Ended => !e.is_active(now) && !e.is_upcoming(now),
            };
            if !keep {
                return false;
            }
            if let Some(region) = &filter.region {
                let region = region.to_lowercase();
                if !e.regions.iter().any(|r| r.to_lowercase().contains(&region)) {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Which event kinds the user wants called out
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPrefs {
    pub enabled: bool,
    pub community_day: bool,
    pub raid_hour: bool,
    pub spotlight_hour: bool,
    pub go_fest: bool,
    pub season: bool,
    pub special: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            enabled: true,
            community_day: true,
            raid_hour: true,
            spotlight_hour: false,
            go_fest: true,
            season: false,
            special: true,
        }
    }
}

impl NotificationPrefs {
    pub fn wants(&self, kind: EventKind) -> bool {
        self.enabled
            && match kind {
                EventKind::CommunityDay => self.community_day,
                EventKind::RaidHour => self.raid_hour,
                EventKind::SpotlightHour => self.spotlight_hour,
                EventKind::GoFest => self.go_fest,
                EventKind::Season => self.season,
                EventKind::Special => self.special,
            }
    }

    /// Load from the settings kv; malformed stored JSON means defaults.
    pub fn load(db: &Database) -> Self {
        match db.get_setting(KEY_EVENT_NOTIFICATIONS) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding malformed notification prefs");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn save(&self, db: &Database) {
        if let Ok(json) = serde_json::to_string(self) {
            if let Err(e) = db.set_setting(KEY_EVENT_NOTIFICATIONS, &json) {
                warn!(error = %e, "Failed to save notification prefs");
            }
        }
    }
}

/// Fetch result handed from the worker thread to the UI thread
#[derive(Clone)]
pub struct EventFetchResult {
    pub version: String,
    pub events: Vec<LiveEvent>,
}

const EVENTS_RESULT_KEY: &str = "events_feed_result";
const EVENTS_ERROR_KEY: &str = "events_feed_error";

impl App {
    /// Kick off a feed fetch unless one is already in flight.
    pub fn refresh_events(&mut self, ctx: &egui::Context) {
        if self.events_loading {
            return;
        }
        self.events_loading = true;
        self.last_event_refresh = Some(Instant::now());

        let ctx = ctx.clone();
        let token = self.shutdown.clone();
        debug!(url = EVENTS_FEED_URL, "Fetching event feed");

        std::thread::spawn(move || {
            let result: Result<EventFeed, String> = (|| {
                let response = reqwest::blocking::get(EVENTS_FEED_URL).map_err(|e| e.to_string())?;
                if !response.status().is_success() {
                    return Err(format!("HTTP {}", response.status()));
                }
                response.json::<EventFeed>().map_err(|e| e.to_string())
            })();

            // Session ended while we were fetching
            if token.is_cancelled() {
                return;
            }

            ctx.memory_mut(|mem| match result {
                Ok(feed) => {
                    info!(version = %feed.version, count = feed.events.len(), "Event feed loaded");
                    mem.data.insert_temp(
                        EVENTS_RESULT_KEY.into(),
                        EventFetchResult {
                            version: feed.version,
                            events: feed.events,
                        },
                    );
                }
                Err(e) => {
                    warn!(error = %e, "Event feed fetch failed");
                    mem.data.insert_temp(EVENTS_ERROR_KEY.into(), e);
                }
            });
            ctx.request_repaint();
        });
    }

    /// Drain results posted by the worker thread. Runs every frame.
    pub fn poll_event_results(&mut self, ctx: &egui::Context) {
        let result = ctx.memory_mut(|mem| {
            mem.data
                .remove_temp::<EventFetchResult>(EVENTS_RESULT_KEY.into())
        });
        if let Some(result) = result {
            self.events = result.events;
            self.events_version = Some(result.version);
            self.events_error = None;
            self.events_loading = false;
        }

        let error =
            ctx.memory_mut(|mem| mem.data.remove_temp::<String>(EVENTS_ERROR_KEY.into()));
        if let Some(error) = error {
            // Stale events stay on screen; the error only annotates them
            self.events_error = Some(error);
            self.events_loading = false;
        }
    }

    /// Periodic refresh while the Events tab is visible.
    pub fn maybe_refresh_events(&mut self, ctx: &egui::Context) {
        let due = match self.last_event_refresh {
            None => true,
            Some(at) => at.elapsed() >= Duration::from_secs(EVENT_REFRESH_SECS),
        };
        if due {
            self.refresh_events(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventPriority;

    fn event(id: &str, name: &str, kind: EventKind, start: &str, end: &str) -> LiveEvent {
        LiveEvent {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            kind,
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            featured: Vec::new(),
            bonuses: Vec::new(),
            regions: vec!["Global".to_string()],
            source_url: String::new(),
            priority: EventPriority::Medium,
            tags: Vec::new(),
        }
    }

    fn sample() -> Vec<LiveEvent> {
        vec![
            event(
                "cd",
                "Community Day: Charmander",
                EventKind::CommunityDay,
                "2025-06-01T14:00:00Z",
                "2025-06-01T17:00:00Z",
            ),
            event(
                "raid",
                "Raid Hour: Mewtwo",
                EventKind::RaidHour,
                "2025-06-04T18:00:00Z",
                "2025-06-04T19:00:00Z",
            ),
            event(
                "season",
                "Season of Tides",
                EventKind::Season,
                "2025-03-01T00:00:00Z",
                "2025-05-31T23:59:00Z",
            ),
        ]
    }

    fn mid_community_day() -> DateTime<Utc> {
        "2025-06-01T15:00:00Z".parse().unwrap()
    }

    #[test]
    fn window_flags_are_derived_from_now() {
        let events = sample();
        let now = mid_community_day();
        assert!(events[0].is_active(now));
        assert!(!events[0].is_upcoming(now));
        assert!(events[1].is_upcoming(now));
        assert!(!events[2].is_active(now));
        assert!(!events[2].is_upcoming(now));
    }

    #[test]
    fn status_filter_partitions_the_feed() {
        let events = sample();
        let now = mid_community_day();
        let count = |status| {
            filter_events(
                &events,
                &EventFilter {
                    status,
                    ..Default::default()
                },
                now,
            )
            .len()
        };
        assert_eq!(count(EventStatusFilter::Active), 1);
        assert_eq!(count(EventStatusFilter::Upcoming), 1);
        assert_eq!(count(EventStatusFilter::Ended), 1);
        assert_eq!(count(EventStatusFilter::All), 3);
    }

    #[test]
    fn search_and_kind_combine() {
        let events = sample();
        let filtered = filter_events(
            &events,
            &EventFilter {
                search: "mewtwo".to_string(),
                kind: Some(EventKind::RaidHour),
                ..Default::default()
            },
            mid_community_day(),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "raid");

        let none = filter_events(
            &events,
            &EventFilter {
                search: "mewtwo".to_string(),
                kind: Some(EventKind::CommunityDay),
                ..Default::default()
            },
            mid_community_day(),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn region_filter_is_substring_insensitive() {
        let mut events = sample();
        events[0].regions = vec!["Japan".to_string(), "South Korea".to_string()];

        let filtered = filter_events(
            &events,
            &EventFilter {
                region: Some("korea".to_string()),
                ..Default::default()
            },
            mid_community_day(),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "cd");
    }

    #[test]
    fn notification_prefs_survive_malformed_storage() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting(KEY_EVENT_NOTIFICATIONS, "]]]").unwrap();
        assert_eq!(NotificationPrefs::load(&db), NotificationPrefs::default());

        let mut prefs = NotificationPrefs::default();
        prefs.raid_hour = false;
        prefs.save(&db);
        let loaded = NotificationPrefs::load(&db);
        assert!(!loaded.wants(EventKind::RaidHour));
        assert!(loaded.wants(EventKind::CommunityDay));

        prefs.enabled = false;
        prefs.save(&db);
        assert!(!NotificationPrefs::load(&db).wants(EventKind::CommunityDay));
    }
}
