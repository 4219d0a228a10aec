//! Application constants and configuration

pub const SPRITES_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
pub const EVENTS_FEED_URL: &str =
    "https://raw.githubusercontent.com/wtfseanscool/dex-events/main/events.json";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Full National Dex range covered by the catalog.
pub const TOTAL_POKEMON: u32 = 1025;

/// Page mode: fixed page size.
pub const PAGE_SIZE: usize = 20;
/// Incremental mode: first batch is larger than the follow-up batches.
pub const INITIAL_BATCH: usize = 40;
pub const BATCH_SIZE: usize = 20;

/// How often the event feed refreshes while the Events tab is open.
pub const EVENT_REFRESH_SECS: u64 = 5 * 60;

/// Settings keys stored in the database kv table.
pub const KEY_ACTIVE_TAB: &str = "active-tab";
pub const KEY_DEMO_USER: &str = "demo-user";
pub const KEY_EVENT_NOTIFICATIONS: &str = "event-notifications";
pub const KEY_FILTER_STATUS: &str = "filter-status";
pub const KEY_FILTER_TYPE: &str = "filter-type";

/// Environment variable naming a remote sync endpoint. Unset means demo mode.
pub const SYNC_URL_ENV: &str = "POKEDEX_SYNC_URL";
