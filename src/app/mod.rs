//! App module - contains the main application state and logic

pub mod achievements;
pub mod events;
pub mod filters;
pub mod pager;
mod sprites;
pub mod stats;
mod views;

use crate::auth::{self, AuthState};
use crate::catalog::{self, Pokemon};
use crate::constants::*;
use crate::db::Database;
use crate::pokedex::{self, StatusMap};
use crate::settings::Settings;
use crate::store::{open_store, StatusStore};
use crate::theme;
use crate::types::*;
use crate::utils::get_cache_dir;
use eframe::egui;
use events::{EventFilter, NotificationPrefs};
use filters::FilterSpec;
use pager::{Pager, WindowMode};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Session
    pub(crate) db: Database,
    pub(crate) store: Arc<dyn StatusStore>,
    pub(crate) auth: AuthState,
    pub(crate) sign_in_name: String,
    pub(crate) statuses: StatusMap,
    pub(crate) catalog: &'static [Pokemon],

    // Pokédex browsing
    pub(crate) filters: FilterSpec,
    pub(crate) filtered_indices: Vec<usize>,
    pub(crate) pager: Pager,
    pub(crate) view_mode: ViewMode,
    pub(crate) selected: Option<u32>,
    pub(crate) focus_search: bool,

    // Navigation
    pub(crate) active_tab: Tab,

    // Events
    pub(crate) events: Vec<LiveEvent>,
    pub(crate) events_version: Option<String>,
    pub(crate) events_error: Option<String>,
    pub(crate) events_loading: bool,
    pub(crate) last_event_refresh: Option<Instant>,
    pub(crate) event_filter: EventFilter,
    pub(crate) notification_prefs: NotificationPrefs,
    pub(crate) show_notification_settings: bool,

    // Dashboard
    pub(crate) featured: Vec<u32>,

    // Sprite cache
    pub(crate) sprite_cache: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) sprite_loading: HashSet<String>,
    pub(crate) prefetch_started: bool,
    pub(crate) cache_dir: PathBuf,
    pub(crate) logo_texture: Option<egui::TextureHandle>,

    // Background work
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) shutdown: CancellationToken,

    // Settings
    pub(crate) large_sprites: bool,
    pub(crate) prefer_shiny_sprites: bool,
    pub(crate) show_settings: bool,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & SESSION LIFECYCLE
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        db: Database,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons on top of the default fonts
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let cache_dir = get_cache_dir();
        std::fs::create_dir_all(&cache_dir).ok();

        let sync_url = std::env::var(SYNC_URL_ENV).ok();
        let store = open_store(&data_dir.join("dex.db"), sync_url.as_deref());

        let catalog = catalog::all();

        let active_tab = db
            .get_setting(KEY_ACTIVE_TAB)
            .ok()
            .flatten()
            .map(|key| Tab::from_key(&key))
            .unwrap_or(Tab::Overview);

        // Restore the last Pokédex filters; stale stored values decode to
        // "no constraint"
        let mut spec = FilterSpec::default();
        if let Ok(Some(key)) = db.get_setting(KEY_FILTER_STATUS) {
            spec.status = StatusFilter::from_key(&key);
        }
        if let Ok(Some(tag)) = db.get_setting(KEY_FILTER_TYPE) {
            spec.ptype = filters::parse_type(&tag);
        }

        let notification_prefs = NotificationPrefs::load(&db);
        let saved_user = auth::restore_saved_user(&db);

        let window_mode = if settings.infinite_scroll {
            WindowMode::Incremental
        } else {
            WindowMode::Paged
        };

        let mut app = Self {
            db,
            store,
            auth: AuthState::new(),
            sign_in_name: String::new(),
            statuses: StatusMap::new(),
            catalog,
            filtered_indices: filters::filter_catalog(catalog, &StatusMap::new(), &spec),
            filters: spec,
            pager: Pager::new(window_mode),
            view_mode: if settings.grid_view {
                ViewMode::Grid
            } else {
                ViewMode::List
            },
            selected: None,
            focus_search: false,
            active_tab,
            events: Vec::new(),
            events_version: None,
            events_error: None,
            events_loading: false,
            last_event_refresh: None,
            event_filter: EventFilter::default(),
            notification_prefs,
            show_notification_settings: false,
            featured: vec![1, 25, 150, 6, 9, 144],
            sprite_cache: HashMap::new(),
            sprite_loading: HashSet::new(),
            prefetch_started: false,
            cache_dir,
            logo_texture: None,
            runtime: tokio::runtime::Runtime::new().unwrap(),
            shutdown: CancellationToken::new(),
            large_sprites: settings.large_sprites,
            prefer_shiny_sprites: settings.prefer_shiny_sprites,
            show_settings: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        };

        app.auth.demo_mode = app.store.label() == "local";
        if sync_url.is_some() && app.auth.demo_mode {
            // The endpoint was configured but did not answer at startup
            app.auth.error = Some(auth::sign_in_error_message("endpoint unreachable"));
        }

        if let Some(user) = saved_user {
            app.start_session(user);
        }

        app
    }

    /// Load the user's records and make the session live. All derived state
    /// recomputes from the freshly loaded map.
    pub fn start_session(&mut self, user: auth::User) {
        self.statuses = match self.store.load(&user.uid) {
            Ok(statuses) => statuses,
            Err(e) => {
                error!(error = %e, "Failed to load capture records");
                StatusMap::new()
            }
        };
        info!(
            user = %user.display_name,
            store = self.store.label(),
            records = self.statuses.len(),
            "Session started"
        );
        self.auth.user = Some(user);
        self.auth.demo_mode = self.store.label() == "local";
        self.shutdown = CancellationToken::new();
        self.apply_filters();
    }

    /// Create (or reuse) the demo identity typed on the sign-in screen.
    pub fn sign_in(&mut self) {
        self.auth.loading = true;
        let user = auth::demo_user(&self.sign_in_name, chrono::Utc::now());
        auth::persist_user(&self.db, &user);
        self.start_session(user);
        self.auth.loading = false;
    }

    /// Tear the session down: forget the saved user, drop in-memory records
    /// and stop background refreshes.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.auth.user.take() {
            info!(user = %user.display_name, "Signed out");
        }
        auth::forget_user(&self.db);
        self.statuses.clear();
        self.sign_in_name.clear();
        self.shutdown.cancel();
        self.events.clear();
        self.events_version = None;
        self.events_error = None;
        self.events_loading = false;
        self.last_event_refresh = None;
        self.selected = None;
        self.apply_filters();
    }

    // ========================================================================
    // CAPTURE-STATUS MUTATIONS (write-through)
    // ========================================================================

    pub fn set_caught(&mut self, id: u32, caught: bool) {
        if self.auth.user.is_none() {
            warn!(id, "Ignoring toggle without a session");
            return;
        }
        if pokedex::set_caught(&mut self.statuses, id, caught, chrono::Utc::now()) {
            self.persist_statuses();
            self.refresh_filtered();
        }
    }

    pub fn set_flag(&mut self, id: u32, flag: CaptureFlag, value: bool) {
        if self.auth.user.is_none() {
            return;
        }
        if pokedex::set_flag(&mut self.statuses, id, flag, value) {
            self.persist_statuses();
            self.refresh_filtered();
        }
    }

    /// Recompute the filtered list after a status change without touching
    /// the windowing position. Only filter edits reset the pager.
    fn refresh_filtered(&mut self) {
        self.filtered_indices =
            filters::filter_catalog(self.catalog, &self.statuses, &self.filters);
    }

    /// Fire-and-forget write of the full record map. The store logs and
    /// falls back internally; the UI never waits on it.
    fn persist_statuses(&self) {
        let Some(user) = &self.auth.user else {
            return;
        };
        let store = self.store.clone();
        let uid = user.uid.clone();
        let snapshot = self.statuses.clone();

        std::thread::spawn(move || {
            if let Err(e) = store.save(&uid, &snapshot) {
                error!(error = %e, "Failed to persist capture records");
            }
        });
    }

    // ========================================================================
    // SETTINGS
    // ========================================================================

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        if let Err(e) = self.db.set_setting(KEY_ACTIVE_TAB, tab.key()) {
            warn!(error = %e, "Failed to persist active tab");
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            grid_view: self.view_mode == ViewMode::Grid,
            infinite_scroll: self.pager.mode() == WindowMode::Incremental,
            large_sprites: self.large_sprites,
            prefer_shiny_sprites: self.prefer_shiny_sprites,
        };
        settings.save(&self.data_dir);
    }
}
