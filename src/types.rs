//! Common types and data structures

use chrono::{DateTime, Utc};

/// Top-level view selected by the tab bar
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Overview,
    Pokedex,
    Events,
    Stats,
    Achievements,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Pokedex,
        Tab::Events,
        Tab::Stats,
        Tab::Achievements,
    ];

    /// Stable key used when persisting the active tab
    pub fn key(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Pokedex => "pokedex",
            Tab::Events => "events",
            Tab::Stats => "stats",
            Tab::Achievements => "achievements",
        }
    }

    /// Unknown stored keys fall back to the overview tab
    pub fn from_key(key: &str) -> Tab {
        match key {
            "pokedex" => Tab::Pokedex,
            "events" => Tab::Events,
            "stats" => Tab::Stats,
            "achievements" => Tab::Achievements,
            _ => Tab::Overview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Dashboard",
            Tab::Pokedex => "Pokédex",
            Tab::Events => "Events",
            Tab::Stats => "Statistics",
            Tab::Achievements => "Achievements",
        }
    }
}

/// Capture-status axis of the Pokédex filter
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Caught,
    Missing,
    Shiny,
    Lucky,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Caught,
        StatusFilter::Missing,
        StatusFilter::Shiny,
        StatusFilter::Lucky,
    ];

    /// Stable key used when persisting the status axis
    pub fn key(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Caught => "caught",
            StatusFilter::Missing => "missing",
            StatusFilter::Shiny => "shiny",
            StatusFilter::Lucky => "lucky",
        }
    }

    /// Stale persisted values decode to no constraint
    pub fn from_key(key: &str) -> StatusFilter {
        match key {
            "caught" => StatusFilter::Caught,
            "missing" => StatusFilter::Missing,
            "shiny" => StatusFilter::Shiny,
            "lucky" => StatusFilter::Lucky,
            _ => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Caught => "Caught",
            StatusFilter::Missing => "Missing",
            StatusFilter::Shiny => "Shiny",
            StatusFilter::Lucky => "Lucky",
        }
    }
}

/// Per-capture flags that only mean something once a Pokémon is caught
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CaptureFlag {
    Shiny,
    Lucky,
    Shadow,
    Purified,
}

impl CaptureFlag {
    pub const ALL: [CaptureFlag; 4] = [
        CaptureFlag::Shiny,
        CaptureFlag::Lucky,
        CaptureFlag::Shadow,
        CaptureFlag::Purified,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CaptureFlag::Shiny => "Shiny",
            CaptureFlag::Lucky => "Lucky",
            CaptureFlag::Shadow => "Shadow",
            CaptureFlag::Purified => "Purified",
        }
    }
}

/// Pokédex browser layout
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

/// Event category from the feed. Unrecognized values decode as `Special`
/// so an older client keeps working against a newer feed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CommunityDay,
    RaidHour,
    SpotlightHour,
    GoFest,
    Season,
    #[serde(other)]
    Special,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::CommunityDay,
        EventKind::RaidHour,
        EventKind::SpotlightHour,
        EventKind::GoFest,
        EventKind::Season,
        EventKind::Special,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventKind::CommunityDay => "Community Day",
            EventKind::RaidHour => "Raid Hour",
            EventKind::SpotlightHour => "Spotlight Hour",
            EventKind::GoFest => "GO Fest",
            EventKind::Season => "Season",
            EventKind::Special => "Special",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPriority {
    Critical,
    High,
    #[serde(other)]
    Medium,
}

/// Pokémon featured by an event. Carries its own sprite reference so the
/// events view never joins back into the catalog.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct FeaturedPokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub is_shiny_available: bool,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct EventBonus {
    pub kind: String,
    pub multiplier: f32,
    pub description: String,
}

/// One event entry in the feed
#[derive(Clone, Debug, serde::Deserialize)]
pub struct LiveEvent {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub featured: Vec<FeaturedPokemon>,
    #[serde(default)]
    pub bonuses: Vec<EventBonus>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub source_url: String,
    #[serde(default = "default_priority")]
    pub priority: EventPriority,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_priority() -> EventPriority {
    EventPriority::Medium
}

impl LiveEvent {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start > now
    }
}

/// Event feed manifest from the remote JSON
#[derive(serde::Deserialize)]
pub struct EventFeed {
    pub version: String,
    #[serde(default)]
    pub events: Vec<LiveEvent>,
}
