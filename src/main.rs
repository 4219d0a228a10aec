#![windows_subsystem = "windows"]
//! Pokédex Tracker - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod auth;
mod catalog;
mod constants;
mod db;
mod pokedex;
mod settings;
mod store;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::APP_VERSION;
use db::Database;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::path::PathBuf;
use tracing::{error, info};
use types::Tab;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "pokedex-tracker.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pokedex_tracker=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Pokedex Tracker");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Pokédex Tracker starting");

    let db_path = data_dir.join("dex.db");
    let db = match Database::open(&db_path) {
        Ok(db) => {
            info!(path = %db_path.display(), "Database opened");
            db
        }
        Err(e) => {
            error!(error = %e, path = %db_path.display(), "Failed to open database");
            panic!("Failed to open database: {}", e);
        }
    };

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1280.0, 800.0)))
        .with_min_inner_size([980.0, 640.0])
        .with_title("Pokédex Tracker");

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Pokédex Tracker",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, db, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Start sprite prefetch on first frame
        if !self.prefetch_started {
            self.prefetch_started = true;
            self.start_sprite_prefetch(ctx);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Check for event feed results from background threads
        self.poll_event_results(ctx);

        if !self.auth.signed_in() {
            self.render_sign_in(ctx);
            return;
        }

        self.render_settings_modal(ctx);

        // "/" jumps to the Pokédex search from anywhere
        if !self.show_settings
            && !ctx.wants_keyboard_input()
            && ctx.input(|i| i.key_pressed(egui::Key::Slash))
        {
            self.set_active_tab(Tab::Pokedex);
            self.focus_search = true;
        }

        egui::TopBottomPanel::top("tab_bar")
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let texture = self.logo_texture.get_or_insert_with(|| {
                        let (pixels, w, h) = utils::rasterize_logo(64);
                        ctx.load_texture(
                            "logo",
                            egui::ColorImage::from_rgba_unmultiplied(
                                [w as usize, h as usize],
                                &pixels,
                            ),
                            egui::TextureOptions::LINEAR,
                        )
                    });
                    ui.image(egui::load::SizedTexture::new(
                        texture.id(),
                        egui::vec2(22.0, 22.0),
                    ));
                    ui.add_space(4.0);

                    let mut switch_to: Option<Tab> = None;
                    for tab in Tab::ALL {
                        let icon = match tab {
                            Tab::Overview => icons::CHART_BAR,
                            Tab::Pokedex => icons::BOOK_OPEN,
                            Tab::Events => icons::CALENDAR_BLANK,
                            Tab::Stats => icons::TREND_UP,
                            Tab::Achievements => icons::MEDAL,
                        };
                        let selected = self.active_tab == tab;
                        let text = egui::RichText::new(format!("{} {}", icon, tab.label()))
                            .size(theme::FONT_LABEL)
                            .color(if selected {
                                theme::TEXT_PRIMARY
                            } else {
                                theme::TEXT_MUTED
                            });
                        if ui.selectable_label(selected, text).clicked() && !selected {
                            switch_to = Some(tab);
                        }
                    }
                    if let Some(tab) = switch_to {
                        self.set_active_tab(tab);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(theme::button(icons::SIGN_OUT))
                            .on_hover_text("Sign out")
                            .clicked()
                        {
                            self.sign_out();
                        }
                        if ui
                            .add(theme::button(icons::GEAR))
                            .on_hover_text("Settings")
                            .clicked()
                        {
                            self.show_settings = true;
                        }
                        if self.auth.demo_mode {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new("DEMO")
                                        .size(theme::FONT_CAPTION)
                                        .strong()
                                        .color(theme::STATUS_WARNING),
                                )
                                .selectable(false),
                            );
                        }
                        if let Some(user) = &self.auth.user {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(&user.display_name)
                                        .size(theme::FONT_LABEL)
                                        .color(theme::TEXT_SECONDARY),
                                )
                                .selectable(false),
                            );
                        }
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| match self.active_tab {
                Tab::Overview => self.render_overview(ui, ctx),
                Tab::Pokedex => self.render_pokedex(ui, ctx),
                Tab::Events => self.render_events(ui, ctx),
                Tab::Stats => self.render_stats(ui),
                Tab::Achievements => self.render_achievements(ui),
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Stop background refreshes and persist window geometry
        self.shutdown.cancel();
        self.save_settings();
        info!("Pokédex Tracker shutting down");
    }
}
