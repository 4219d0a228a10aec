//! View rendering for the five tabs plus the sign-in screen and modals

use super::achievements;
use super::events::{filter_events, EventStatusFilter};
use super::pager::{LoadPhase, WindowMode};
use super::stats::{self, Stats};
use super::App;
use crate::catalog::{GENERATIONS, TYPE_NAMES};
use crate::pokedex::status_of;
use crate::theme;
use crate::types::*;
use crate::ui::components;
use crate::utils::format_dex_number;
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    // ========================================================================
    // SIGN-IN
    // ========================================================================

    pub fn render_sign_in(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let panel_width = 340.0;
            ui.add_space(ui.available_height() * 0.22);
            ui.vertical_centered(|ui| {
                let texture = self.logo_texture.get_or_insert_with(|| {
                    let (pixels, w, h) = crate::utils::rasterize_logo(160);
                    ctx.load_texture(
                        "logo",
                        egui::ColorImage::from_rgba_unmultiplied(
                            [w as usize, h as usize],
                            &pixels,
                        ),
                        egui::TextureOptions::LINEAR,
                    )
                });
                ui.image(egui::load::SizedTexture::new(texture.id(), egui::vec2(80.0, 80.0)));
                ui.add_space(8.0);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("POKÉDEX TRACKER")
                            .size(theme::FONT_TITLE)
                            .strong(),
                    )
                    .selectable(false),
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Track your collection, events and milestones")
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.add_space(24.0);

                ui.allocate_ui(egui::vec2(panel_width, 0.0), |ui| {
                    theme::card_frame().show(ui, |ui| {
                        ui.set_width(panel_width - 2.0 * theme::SPACING_LG);
                        ui.label(
                            egui::RichText::new("Trainer name")
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        );
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.sign_in_name)
                                .hint_text("Demo Trainer")
                                .desired_width(f32::INFINITY),
                        );
                        ui.add_space(8.0);

                        let submitted = response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let clicked = if self.auth.loading {
                            ui.spinner();
                            false
                        } else {
                            ui.add_sized(
                                [ui.available_width(), 32.0],
                                theme::button_accent(format!(
                                    "{}  Start tracking",
                                    icons::PLAY
                                )),
                            )
                            .clicked()
                        };
                        if submitted || clicked {
                            self.sign_in();
                        }

                        if let Some(error) = &self.auth.error {
                            ui.add_space(8.0);
                            ui.label(
                                egui::RichText::new(error)
                                    .size(theme::FONT_SMALL)
                                    .color(theme::STATUS_WARNING),
                            );
                        }

                        if self.auth.demo_mode {
                            ui.add_space(8.0);
                            ui.label(
                                egui::RichText::new(
                                    "Demo mode: your collection stays on this device.",
                                )
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                            );
                        }
                    });
                });
            });
        });
    }

    // ========================================================================
    // DASHBOARD
    // ========================================================================

    pub fn render_overview(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let stats = Stats::compute(self.catalog, &self.statuses);

        ui.columns(4, |cols| {
            components::stat_tile(
                &mut cols[0],
                icons::TROPHY,
                "Caught",
                &stats.total_caught.to_string(),
                theme::BADGE_CAUGHT,
            );
            components::stat_tile(
                &mut cols[1],
                icons::SPARKLE,
                "Shiny",
                &stats.total_shiny.to_string(),
                theme::BADGE_SHINY,
            );
            components::stat_tile(
                &mut cols[2],
                icons::STAR,
                "Lucky",
                &stats.total_lucky.to_string(),
                theme::BADGE_LUCKY,
            );
            components::stat_tile(
                &mut cols[3],
                icons::TARGET,
                "Complete",
                &format!("{}%", stats.completion_percentage),
                theme::ACCENT_LIGHT,
            );
        });

        ui.add_space(theme::SPACING_LG);

        // Featured Pokémon with caught badges
        theme::section_frame().show(ui, |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("FEATURED")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let featured = self.featured.clone();
                let catalog = self.catalog;
                for id in featured {
                    let Some(p) = catalog.get(id as usize - 1) else {
                        continue;
                    };
                    let caught = status_of(&self.statuses, id).caught;
                    let name = p.name.clone();
                    ui.vertical(|ui| {
                        ui.set_width(72.0);
                        let sprite = self.load_sprite(ctx, id, false);
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(56.0, 56.0),
                            egui::Sense::click(),
                        );
                        if let Some(texture) = sprite {
                            ui.painter().image(
                                texture.id(),
                                rect,
                                egui::Rect::from_min_max(
                                    egui::pos2(0.0, 0.0),
                                    egui::pos2(1.0, 1.0),
                                ),
                                egui::Color32::WHITE,
                            );
                        } else {
                            ui.painter().rect_filled(
                                rect,
                                theme::RADIUS_DEFAULT,
                                theme::BG_SURFACE,
                            );
                        }
                        if caught {
                            ui.painter().circle_filled(
                                rect.right_top() + egui::vec2(-4.0, 4.0),
                                5.0,
                                theme::BADGE_CAUGHT,
                            );
                        }
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format_dex_number(id))
                                    .size(theme::FONT_CAPTION)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(name).size(theme::FONT_SMALL),
                            )
                            .selectable(false)
                            .truncate(),
                        );
                        if response.clicked() {
                            self.selected = Some(id);
                            self.set_active_tab(Tab::Pokedex);
                        }
                    });
                }
            });
        });

        ui.add_space(theme::SPACING_LG);

        // Per-generation progress overview
        theme::section_frame().show(ui, |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("GENERATION PROGRESS")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
            ui.add_space(4.0);
            for progress in stats::all_generation_progress(self.catalog, &self.statuses) {
                ui.horizontal(|ui| {
                    ui.add_sized(
                        [120.0, 16.0],
                        egui::Label::new(
                            egui::RichText::new(format!(
                                "Gen {} · {}",
                                progress.generation, progress.region
                            ))
                            .size(theme::FONT_LABEL),
                        )
                        .selectable(false),
                    );
                    components::progress_bar(
                        ui,
                        progress.caught as f32 / progress.total.max(1) as f32,
                        theme::ACCENT,
                    );
                });
                ui.horizontal(|ui| {
                    ui.add_space(124.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!(
                                "{}/{} · {}%",
                                progress.caught, progress.total, progress.percentage
                            ))
                            .size(theme::FONT_CAPTION)
                            .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
            }
        });
    }

    // ========================================================================
    // POKÉDEX BROWSER
    // ========================================================================

    pub fn render_pokedex(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let len = self.filtered_indices.len();
        self.pager.tick(len);

        self.render_filter_bar(ui);
        ui.add_space(theme::SPACING_SM);
        self.render_windowing_bar(ui);
        ui.add_space(theme::SPACING_SM);

        let len = self.filtered_indices.len();
        if len == 0 {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("No Pokémon match the current filters")
                        .size(theme::FONT_HEADING)
                        .color(theme::TEXT_DIM),
                );
            });
            return;
        }

        let range = self.pager.visible_range(len);
        let visible: Vec<usize> = self.filtered_indices[range].to_vec();

        let mut scroll = egui::ScrollArea::vertical().id_salt("dex_scroll");
        if self.pager.take_scroll_to_top() {
            scroll = scroll.vertical_scroll_offset(0.0);
        }

        let output = scroll.show(ui, |ui| {
            match self.view_mode {
                ViewMode::Grid => self.render_grid(ui, ctx, &visible),
                ViewMode::List => self.render_list(ui, &visible),
            }

            if self.pager.mode() == WindowMode::Incremental {
                ui.add_space(theme::SPACING_MD);
                ui.vertical_centered(|ui| {
                    if self.pager.phase() == LoadPhase::Loading {
                        ui.spinner();
                    } else if self.pager.has_more(len) {
                        if ui
                            .add(theme::button(format!("{}  Load more", icons::ARROW_DOWN)))
                            .clicked()
                        {
                            self.pager.load_more(len);
                        }
                    } else {
                        ui.label(
                            egui::RichText::new(format!("All {} shown", len))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                    }
                });
                ui.add_space(theme::SPACING_MD);
            }
        });

        // Near-bottom scroll trigger for the incremental window
        if self.pager.mode() == WindowMode::Incremental {
            let remaining = output.content_size.y
                - (output.state.offset.y + output.inner_rect.height());
            if remaining < 200.0 {
                self.pager.load_more(len);
            }
        }

        self.render_detail_window(ctx);
    }

    fn render_filter_bar(&mut self, ui: &mut egui::Ui) {
        let before = self.filters.clone();

        theme::section_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(icons::MAGNIFYING_GLASS)
                            .size(14.0)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.filters.search)
                        .hint_text("Search Pokémon...")
                        .desired_width(180.0),
                );
                if self.focus_search {
                    self.focus_search = false;
                    response.request_focus();
                }

                ui.separator();

                egui::ComboBox::from_id_salt("filter_generation")
                    .selected_text(match self.filters.generation {
                        None => "All generations".to_string(),
                        Some(g) => format!(
                            "Gen {} ({})",
                            g,
                            crate::catalog::region_for_generation(g)
                        ),
                    })
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.filters.generation, None, "All generations");
                        for g in GENERATIONS {
                            ui.selectable_value(
                                &mut self.filters.generation,
                                Some(g),
                                format!("Gen {} ({})", g, crate::catalog::region_for_generation(g)),
                            );
                        }
                    });

                egui::ComboBox::from_id_salt("filter_type")
                    .selected_text(self.filters.ptype.unwrap_or("All types"))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.filters.ptype, None, "All types");
                        for t in TYPE_NAMES {
                            ui.selectable_value(&mut self.filters.ptype, Some(t), t);
                        }
                    });

                egui::ComboBox::from_id_salt("filter_status")
                    .selected_text(self.filters.status.label())
                    .show_ui(ui, |ui| {
                        for status in StatusFilter::ALL {
                            ui.selectable_value(&mut self.filters.status, status, status.label());
                        }
                    });

                if self.filters.is_active() {
                    if ui
                        .add(theme::button(format!("{} Clear", icons::X)))
                        .clicked()
                    {
                        self.filters.clear();
                    }
                }
            });
        });

        if self.filters != before {
            self.apply_filters();
        }
    }

    fn render_windowing_bar(&mut self, ui: &mut egui::Ui) {
        let len = self.filtered_indices.len();
        let stats = Stats::compute(self.catalog, &self.statuses);

        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!(
                        "{} of {} caught · {} shown",
                        stats.total_caught,
                        self.catalog.len(),
                        len
                    ))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
                )
                .selectable(false),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Layout toggle
                let mut changed = false;
                if ui
                    .selectable_label(self.view_mode == ViewMode::List, icons::LIST)
                    .clicked()
                {
                    self.view_mode = ViewMode::List;
                    changed = true;
                }
                if ui
                    .selectable_label(self.view_mode == ViewMode::Grid, icons::SQUARES_FOUR)
                    .clicked()
                {
                    self.view_mode = ViewMode::Grid;
                    changed = true;
                }

                ui.separator();

                // Windowing mode toggle
                if ui
                    .selectable_label(
                        self.pager.mode() == WindowMode::Incremental,
                        "Infinite",
                    )
                    .clicked()
                {
                    self.pager.set_mode(WindowMode::Incremental);
                    changed = true;
                }
                if ui
                    .selectable_label(self.pager.mode() == WindowMode::Paged, "Pages")
                    .clicked()
                {
                    self.pager.set_mode(WindowMode::Paged);
                    changed = true;
                }
                if changed {
                    self.save_settings();
                }

                if self.pager.mode() == WindowMode::Paged {
                    ui.separator();
                    self.render_page_controls(ui, len);
                } else {
                    ui.separator();
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!(
                                "{} / {}",
                                self.pager.displayed().min(len),
                                len
                            ))
                            .size(theme::FONT_LABEL),
                        )
                        .selectable(false),
                    );
                }

                if self.pager.phase() == LoadPhase::Loading {
                    ui.spinner();
                }
            });
        });
    }

    fn render_page_controls(&mut self, ui: &mut egui::Ui, len: usize) {
        let total = self.pager.total_pages(len);
        if ui.add(theme::button(icons::CARET_DOUBLE_RIGHT)).clicked() {
            self.pager.last_page(len);
        }
        if ui.add(theme::button(icons::CARET_RIGHT)).clicked() {
            self.pager.next_page(len);
        }
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!(
                    "Page {} / {}",
                    self.pager.page(),
                    total.max(1)
                ))
                .size(theme::FONT_LABEL),
            )
            .selectable(false),
        );
        if ui.add(theme::button(icons::CARET_LEFT)).clicked() {
            self.pager.previous_page(len);
        }
        if ui.add(theme::button(icons::CARET_DOUBLE_LEFT)).clicked() {
            self.pager.first_page(len);
        }
    }

    fn render_grid(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, visible: &[usize]) {
        let catalog = self.catalog;
        let card_w = if self.large_sprites { 132.0 } else { 104.0 };
        let sprite_size = if self.large_sprites { 72.0 } else { 52.0 };

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(8.0, 8.0);
            for &idx in visible {
                let p = &catalog[idx];
                let id = p.id;
                let status = status_of(&self.statuses, id);

                let (rect, response) = ui.allocate_exact_size(
                    egui::vec2(card_w, sprite_size + 52.0),
                    egui::Sense::click(),
                );
                if !ui.is_rect_visible(rect) {
                    continue;
                }

                let fill = if status.caught {
                    theme::BG_HOVER
                } else {
                    theme::BG_ELEVATED
                };
                let (fill, draw_rect) = theme::button_visual(&response, fill, rect);
                ui.painter()
                    .rect_filled(draw_rect, theme::RADIUS_LARGE, fill);
                ui.painter().rect_stroke(
                    draw_rect,
                    theme::RADIUS_LARGE,
                    egui::Stroke::new(
                        theme::STROKE_DEFAULT,
                        if status.caught {
                            theme::BADGE_CAUGHT
                        } else {
                            theme::BORDER_SUBTLE
                        },
                    ),
                    egui::StrokeKind::Inside,
                );

                let sprite_rect = egui::Rect::from_center_size(
                    egui::pos2(rect.center().x, rect.top() + sprite_size / 2.0 + 8.0),
                    egui::vec2(sprite_size, sprite_size),
                );
                let shiny_sprite = self.prefer_shiny_sprites && status.shiny;
                if let Some(texture) = self.load_sprite(ctx, id, shiny_sprite) {
                    ui.painter().image(
                        texture.id(),
                        sprite_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                if status.shiny {
                    ui.painter().text(
                        rect.right_top() + egui::vec2(-10.0, 10.0),
                        egui::Align2::CENTER_CENTER,
                        icons::SPARKLE,
                        egui::FontId::proportional(12.0),
                        theme::BADGE_SHINY,
                    );
                }
                if status.caught {
                    ui.painter().text(
                        rect.left_top() + egui::vec2(10.0, 10.0),
                        egui::Align2::CENTER_CENTER,
                        icons::CHECK_CIRCLE,
                        egui::FontId::proportional(12.0),
                        theme::BADGE_CAUGHT,
                    );
                }

                ui.painter().text(
                    egui::pos2(rect.center().x, sprite_rect.bottom() + 10.0),
                    egui::Align2::CENTER_CENTER,
                    format_dex_number(id),
                    egui::FontId::proportional(theme::FONT_CAPTION),
                    theme::TEXT_DIM,
                );
                ui.painter().text(
                    egui::pos2(rect.center().x, sprite_rect.bottom() + 24.0),
                    egui::Align2::CENTER_CENTER,
                    &p.name,
                    egui::FontId::proportional(theme::FONT_LABEL),
                    theme::TEXT_PRIMARY,
                );

                if response.clicked() {
                    self.selected = Some(id);
                }
            }
        });
    }

    fn render_list(&mut self, ui: &mut egui::Ui, visible: &[usize]) {
        use egui_extras::{Column, TableBuilder};

        let catalog = self.catalog;
        let row_height = 32.0;
        let visible = visible.to_vec();
        let mut clicked: Option<u32> = None;
        let mut toggled: Option<(u32, bool)> = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .column(Column::exact(52.0))
            .column(Column::remainder().clip(true))
            .column(Column::exact(150.0))
            .column(Column::exact(60.0))
            .column(Column::exact(90.0))
            .header(28.0, |mut header| {
                for title in ["#", "NAME", "TYPE", "GEN", "CAUGHT"] {
                    header.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(title)
                                    .size(theme::FONT_SMALL)
                                    .strong()
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, visible.len(), |mut row| {
                    let idx = visible[row.index()];
                    let p = &catalog[idx];
                    let status = status_of(&self.statuses, p.id);

                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format_dex_number(p.id))
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&p.name).size(theme::FONT_BODY),
                            )
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        for t in &p.types {
                            components::type_badge(ui, t);
                        }
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(p.generation.to_string())
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        if components::flag_chip(
                            ui,
                            if status.caught { "Caught" } else { "—" },
                            theme::BADGE_CAUGHT,
                            status.caught,
                            true,
                        ) {
                            toggled = Some((p.id, !status.caught));
                        }
                    });

                    if row.response().clicked() {
                        clicked = Some(p.id);
                    }
                });
            });

        if let Some((id, caught)) = toggled {
            self.set_caught(id, caught);
        }
        if let Some(id) = clicked {
            self.selected = Some(id);
        }
    }

    /// Detail window for the selected Pokémon with capture toggles
    fn render_detail_window(&mut self, ctx: &egui::Context) {
        let Some(id) = self.selected else {
            return;
        };
        let Some(p) = crate::catalog::by_id(id) else {
            self.selected = None;
            return;
        };

        let mut open = true;
        let status = status_of(&self.statuses, id);
        let mut set_caught: Option<bool> = None;
        let mut set_flag: Option<(CaptureFlag, bool)> = None;

        egui::Window::new(format!("{} {}", format_dex_number(id), p.name))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let shiny = self.prefer_shiny_sprites && status.shiny;
                    if let Some(texture) = self.load_sprite(ctx, id, shiny) {
                        ui.image(egui::load::SizedTexture::new(
                            texture.id(),
                            egui::vec2(96.0, 96.0),
                        ));
                    }
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            for t in &p.types {
                                components::type_badge(ui, t);
                            }
                        });
                        ui.label(
                            egui::RichText::new(&p.category)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Gen {} · {}",
                                p.generation, p.region
                            ))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                        );
                        if p.is_legendary {
                            ui.label(
                                egui::RichText::new("Legendary")
                                    .size(theme::FONT_SMALL)
                                    .color(theme::STATUS_WARNING),
                            );
                        }
                        if p.is_mythical {
                            ui.label(
                                egui::RichText::new("Mythical")
                                    .size(theme::FONT_SMALL)
                                    .color(theme::BADGE_SHADOW),
                            );
                        }
                    });
                });

                if !p.description.is_empty() {
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(&p.description)
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_SECONDARY),
                    );
                }

                ui.add_space(theme::SPACING_SM);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{:.1} m · {:.1} kg",
                            p.height_m, p.weight_kg
                        ))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                    );
                    if !p.abilities.is_empty() {
                        ui.label(
                            egui::RichText::new(format!("· {}", p.abilities.join(", ")))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                    }
                });

                ui.add_space(theme::SPACING_SM);
                for (label, value) in [
                    ("HP", p.stats.hp),
                    ("Attack", p.stats.attack),
                    ("Defense", p.stats.defense),
                    ("Sp. Atk", p.stats.sp_attack),
                    ("Sp. Def", p.stats.sp_defense),
                    ("Speed", p.stats.speed),
                ] {
                    ui.horizontal(|ui| {
                        ui.add_sized(
                            [56.0, 12.0],
                            egui::Label::new(
                                egui::RichText::new(label)
                                    .size(theme::FONT_CAPTION)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                        components::progress_bar(
                            ui,
                            value as f32 / 255.0,
                            theme::type_color(p.types[0]),
                        );
                    });
                }
                ui.label(
                    egui::RichText::new(format!("Total {}", p.stats.total()))
                        .size(theme::FONT_CAPTION)
                        .color(theme::TEXT_DIM),
                );

                ui.add_space(theme::SPACING_SM);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                ui.horizontal(|ui| {
                    if components::flag_chip(
                        ui,
                        if status.caught { "Caught" } else { "Mark caught" },
                        theme::BADGE_CAUGHT,
                        status.caught,
                        true,
                    ) {
                        set_caught = Some(!status.caught);
                    }
                });
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    for flag in CaptureFlag::ALL {
                        let color = match flag {
                            CaptureFlag::Shiny => theme::BADGE_SHINY,
                            CaptureFlag::Lucky => theme::BADGE_LUCKY,
                            CaptureFlag::Shadow => theme::BADGE_SHADOW,
                            CaptureFlag::Purified => theme::BADGE_PURIFIED,
                        };
                        // Flags stay locked until the Pokémon is caught
                        if components::flag_chip(
                            ui,
                            flag.label(),
                            color,
                            status.flag(flag),
                            status.caught,
                        ) {
                            set_flag = Some((flag, !status.flag(flag)));
                        }
                    }
                });

                if let Some(date) = status.date_added {
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!(
                            "Caught {}",
                            date.format("%Y-%m-%d %H:%M UTC")
                        ))
                        .size(theme::FONT_CAPTION)
                        .color(theme::TEXT_DIM),
                    );
                }
            });

        if let Some(caught) = set_caught {
            self.set_caught(id, caught);
        }
        if let Some((flag, value)) = set_flag {
            self.set_flag(id, flag, value);
        }
        if !open {
            self.selected = None;
        }
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    pub fn render_events(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.maybe_refresh_events(ctx);

        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Live Events")
                        .size(theme::FONT_TITLE)
                        .strong(),
                )
                .selectable(false),
            );
            if let Some(version) = &self.events_version {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!("feed {}", version))
                            .size(theme::FONT_CAPTION)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.events_loading {
                    ui.spinner();
                } else if ui
                    .add(theme::button(format!("{} Refresh", icons::ARROWS_CLOCKWISE)))
                    .clicked()
                {
                    self.refresh_events(ctx);
                }
                if ui
                    .add(theme::button(format!("{} Notifications", icons::BELL)))
                    .clicked()
                {
                    self.show_notification_settings = true;
                }
            });
        });

        if let Some(error) = &self.events_error {
            ui.label(
                egui::RichText::new(format!("Feed unavailable: {}", error))
                    .size(theme::FONT_SMALL)
                    .color(theme::STATUS_ERROR),
            );
        }

        ui.add_space(theme::SPACING_SM);

        // Display filters
        theme::section_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.event_filter.search)
                        .hint_text("Search events...")
                        .desired_width(160.0),
                );
                egui::ComboBox::from_id_salt("event_kind")
                    .selected_text(
                        self.event_filter
                            .kind
                            .map(|k| k.label())
                            .unwrap_or("All kinds"),
                    )
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.event_filter.kind, None, "All kinds");
                        for kind in EventKind::ALL {
                            ui.selectable_value(
                                &mut self.event_filter.kind,
                                Some(kind),
                                kind.label(),
                            );
                        }
                    });
                egui::ComboBox::from_id_salt("event_status")
                    .selected_text(self.event_filter.status.label())
                    .show_ui(ui, |ui| {
                        for status in EventStatusFilter::ALL {
                            ui.selectable_value(
                                &mut self.event_filter.status,
                                status,
                                status.label(),
                            );
                        }
                    });
            });
        });

        ui.add_space(theme::SPACING_SM);

        let now = chrono::Utc::now();
        let filtered: Vec<LiveEvent> = filter_events(&self.events, &self.event_filter, now)
            .into_iter()
            .cloned()
            .collect();

        if filtered.is_empty() {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(if self.events.is_empty() {
                        "No events loaded yet"
                    } else {
                        "No events match the current filters"
                    })
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_DIM),
                );
            });
        } else {
            egui::ScrollArea::vertical()
                .id_salt("events_scroll")
                .show(ui, |ui| {
                    for event in &filtered {
                        ui.push_id(&event.id, |ui| {
                            self.render_event_card(ui, ctx, event, now);
                        });
                        ui.add_space(theme::SPACING_SM);
                    }
                });
        }

        self.render_notification_settings(ctx);
    }

    fn render_event_card(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        event: &LiveEvent,
        now: chrono::DateTime<chrono::Utc>,
    ) {
        theme::card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&event.name)
                                    .size(theme::FONT_HEADING)
                                    .strong(),
                            )
                            .selectable(false),
                        );
                        let (badge, color) = if event.is_active(now) {
                            ("LIVE", theme::STATUS_SUCCESS)
                        } else if event.is_upcoming(now) {
                            ("UPCOMING", theme::STATUS_WARNING)
                        } else {
                            ("ENDED", theme::TEXT_DIM)
                        };
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(badge)
                                    .size(theme::FONT_CAPTION)
                                    .strong()
                                    .color(color),
                            )
                            .selectable(false),
                        );
                        if event.priority == EventPriority::Critical {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(format!(
                                        "{} DON'T MISS",
                                        icons::WARNING_CIRCLE
                                    ))
                                    .size(theme::FONT_CAPTION)
                                    .strong()
                                    .color(theme::STATUS_ERROR),
                                )
                                .selectable(false),
                            );
                        }
                    });
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(event.kind.label())
                                .size(theme::FONT_SMALL)
                                .color(theme::ACCENT_LIGHT),
                        );
                        if self.notification_prefs.wants(event.kind) {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(icons::BELL_RINGING)
                                        .size(theme::FONT_SMALL)
                                        .color(theme::TEXT_DIM),
                                )
                                .selectable(false),
                            )
                            .on_hover_text("Notifications on for this kind");
                        }
                    });
                    ui.label(
                        egui::RichText::new(components::format_event_window(
                            event.start,
                            event.end,
                        ))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                    );
                    if !event.description.is_empty() {
                        ui.add_space(2.0);
                        ui.label(
                            egui::RichText::new(&event.description)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_SECONDARY),
                        );
                    }
                    if !event.bonuses.is_empty() {
                        ui.add_space(2.0);
                        ui.horizontal(|ui| {
                            for bonus in &event.bonuses {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{}× {}",
                                        bonus.multiplier, bonus.kind
                                    ))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::STATUS_WARNING),
                                )
                                .on_hover_text(&bonus.description);
                            }
                        });
                    }
                    if !event.regions.is_empty() {
                        ui.label(
                            egui::RichText::new(event.regions.join(" · "))
                                .size(theme::FONT_CAPTION)
                                .color(theme::TEXT_DIM),
                        );
                    }
                    if !event.tags.is_empty() {
                        ui.label(
                            egui::RichText::new(
                                event
                                    .tags
                                    .iter()
                                    .map(|t| format!("#{}", t))
                                    .collect::<Vec<_>>()
                                    .join(" "),
                            )
                            .size(theme::FONT_CAPTION)
                            .color(theme::TEXT_DIM),
                        );
                    }
                    if !event.source_url.is_empty() {
                        if ui
                            .link(
                                egui::RichText::new("Details")
                                    .size(theme::FONT_SMALL),
                            )
                            .clicked()
                        {
                            let _ = open::that(&event.source_url);
                        }
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for featured in event.featured.iter().take(3) {
                        if let Some(texture) = self.load_sprite(ctx, featured.id, false) {
                            let mut hover = featured.name.clone();
                            if featured.is_legendary {
                                hover.push_str(" · legendary");
                            }
                            if featured.is_mythical {
                                hover.push_str(" · mythical");
                            }
                            if featured.is_shiny_available {
                                hover.push_str(" · shiny available");
                            }
                            ui.image(egui::load::SizedTexture::new(
                                texture.id(),
                                egui::vec2(48.0, 48.0),
                            ))
                            .on_hover_text(hover);
                        }
                    }
                });
            });
        });
    }

    fn render_notification_settings(&mut self, ctx: &egui::Context) {
        if !self.show_notification_settings {
            return;
        }

        let response = egui::Modal::new(egui::Id::new("notification_settings"))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(280.0);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Event notifications").size(16.0).strong(),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_SM);

                let mut prefs = self.notification_prefs.clone();
                let mut changed = false;

                if theme::settings_checkbox(ui, prefs.enabled, "Enable notifications", true) {
                    prefs.enabled = !prefs.enabled;
                    changed = true;
                }
                ui.add_space(2.0);
                ui.separator();
                ui.add_space(2.0);
                for (value, label) in [
                    (&mut prefs.community_day, "Community Day"),
                    (&mut prefs.raid_hour, "Raid Hour"),
                    (&mut prefs.spotlight_hour, "Spotlight Hour"),
                    (&mut prefs.go_fest, "GO Fest"),
                    (&mut prefs.season, "Seasons"),
                    (&mut prefs.special, "Special events"),
                ] {
                    if theme::settings_checkbox(ui, *value, label, prefs.enabled) {
                        *value = !*value;
                        changed = true;
                    }
                }

                if changed {
                    prefs.save(&self.db);
                    self.notification_prefs = prefs;
                }

                ui.add_space(theme::SPACING_MD);
                if ui.add(theme::button("Close")).clicked() {
                    self.show_notification_settings = false;
                }
            });

        if response.should_close() {
            self.show_notification_settings = false;
        }
    }

    // ========================================================================
    // STATISTICS
    // ========================================================================

    pub fn render_stats(&mut self, ui: &mut egui::Ui) {
        let stats = Stats::compute(self.catalog, &self.statuses);

        ui.columns(4, |cols| {
            components::stat_tile(
                &mut cols[0],
                icons::TROPHY,
                "Total caught",
                &format!("{} / {}", stats.total_caught, self.catalog.len()),
                theme::BADGE_CAUGHT,
            );
            components::stat_tile(
                &mut cols[1],
                icons::SPARKLE,
                "Shiny rate",
                &format!(
                    "{:.1}%",
                    stats::percent_f64(stats.total_shiny, stats.total_caught)
                ),
                theme::BADGE_SHINY,
            );
            components::stat_tile(
                &mut cols[2],
                icons::STAR,
                "Lucky rate",
                &format!(
                    "{:.1}%",
                    stats::percent_f64(stats.total_lucky, stats.total_caught)
                ),
                theme::BADGE_LUCKY,
            );
            components::stat_tile(
                &mut cols[3],
                icons::TARGET,
                "Completion",
                &format!("{}%", stats.completion_percentage),
                theme::ACCENT_LIGHT,
            );
        });

        ui.add_space(theme::SPACING_SM);
        ui.columns(2, |cols| {
            components::stat_tile(
                &mut cols[0],
                icons::GHOST,
                "Shadow",
                &stats.total_shadow.to_string(),
                theme::BADGE_SHADOW,
            );
            components::stat_tile(
                &mut cols[1],
                icons::DROP,
                "Purified",
                &stats.total_purified.to_string(),
                theme::BADGE_PURIFIED,
            );
        });

        ui.add_space(theme::SPACING_LG);

        egui::ScrollArea::vertical()
            .id_salt("stats_scroll")
            .show(ui, |ui| {
                theme::section_frame().show(ui, |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("TYPE DISTRIBUTION (CAUGHT)")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    ui.add_space(4.0);
                    let distribution = stats::type_distribution(self.catalog, &self.statuses);
                    if distribution.is_empty() {
                        ui.label(
                            egui::RichText::new("Catch something to see a breakdown")
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_DIM),
                        );
                    }
                    let max = distribution.first().map(|t| t.count).unwrap_or(1);
                    for entry in &distribution {
                        ui.horizontal(|ui| {
                            ui.add_sized(
                                [76.0, 14.0],
                                egui::Label::new(
                                    egui::RichText::new(entry.type_name)
                                        .size(theme::FONT_LABEL)
                                        .color(theme::type_color(entry.type_name)),
                                )
                                .selectable(false),
                            );
                            components::progress_bar(
                                ui,
                                entry.count as f32 / max as f32,
                                theme::type_color(entry.type_name),
                            );
                        });
                        ui.horizontal(|ui| {
                            ui.add_space(80.0);
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(format!(
                                        "{} · {:.1}%",
                                        entry.count, entry.percentage
                                    ))
                                    .size(theme::FONT_CAPTION)
                                    .color(theme::TEXT_DIM),
                                )
                                .selectable(false),
                            );
                        });
                    }
                });

                ui.add_space(theme::SPACING_LG);

                theme::section_frame().show(ui, |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("PROGRESS BY GENERATION")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    ui.add_space(4.0);
                    for progress in
                        stats::all_generation_progress(self.catalog, &self.statuses)
                    {
                        ui.horizontal(|ui| {
                            ui.add_sized(
                                [150.0, 16.0],
                                egui::Label::new(
                                    egui::RichText::new(format!(
                                        "Gen {} · {} ({}–{})",
                                        progress.generation,
                                        progress.region,
                                        progress.first,
                                        progress.last
                                    ))
                                    .size(theme::FONT_LABEL),
                                )
                                .selectable(false),
                            );
                            components::progress_bar(
                                ui,
                                progress.caught as f32 / progress.total.max(1) as f32,
                                theme::ACCENT,
                            );
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(format!("{}%", progress.percentage))
                                        .size(theme::FONT_LABEL)
                                        .color(theme::TEXT_MUTED),
                                )
                                .selectable(false),
                            );
                        });
                    }
                });
            });
    }

    // ========================================================================
    // ACHIEVEMENTS
    // ========================================================================

    pub fn render_achievements(&mut self, ui: &mut egui::Ui) {
        let unlocked = achievements::unlocked_count(self.catalog, &self.statuses);
        let points = achievements::total_points(self.catalog, &self.statuses);

        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Achievements")
                        .size(theme::FONT_TITLE)
                        .strong(),
                )
                .selectable(false),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!(
                            "{} / {} unlocked · {} pts",
                            unlocked,
                            achievements::ACHIEVEMENTS.len(),
                            points
                        ))
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                    )
                    .selectable(false),
                );
            });
        });
        ui.add_space(theme::SPACING_SM);

        egui::ScrollArea::vertical()
            .id_salt("achievements_scroll")
            .show(ui, |ui| {
                for category in achievements::Category::ALL {
                    let entries: Vec<_> = achievements::ACHIEVEMENTS
                        .iter()
                        .filter(|a| a.category == category)
                        .collect();
                    if entries.is_empty() {
                        continue;
                    }

                    theme::section_frame().show(ui, |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(category.label().to_uppercase())
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                        ui.add_space(4.0);

                        for achievement in entries {
                            let progress =
                                achievement.progress(self.catalog, &self.statuses);
                            ui.horizontal(|ui| {
                                let (icon, color) = if progress.unlocked {
                                    (icons::SEAL_CHECK, theme::STATUS_SUCCESS)
                                } else {
                                    (icons::LOCK_SIMPLE, theme::TEXT_DIM)
                                };
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(icon).size(18.0).color(color),
                                    )
                                    .selectable(false),
                                );
                                ui.vertical(|ui| {
                                    ui.horizontal(|ui| {
                                        ui.add(
                                            egui::Label::new(
                                                egui::RichText::new(achievement.name)
                                                    .size(theme::FONT_BODY)
                                                    .strong(),
                                            )
                                            .selectable(false),
                                        );
                                        ui.add(
                                            egui::Label::new(
                                                egui::RichText::new(format!(
                                                    "{} pts",
                                                    achievement.points
                                                ))
                                                .size(theme::FONT_CAPTION)
                                                .color(theme::STATUS_WARNING),
                                            )
                                            .selectable(false),
                                        );
                                    });
                                    ui.label(
                                        egui::RichText::new(achievement.description)
                                            .size(theme::FONT_SMALL)
                                            .color(theme::TEXT_MUTED),
                                    );
                                    components::progress_bar(
                                        ui,
                                        progress.fraction,
                                        if progress.unlocked {
                                            theme::STATUS_SUCCESS
                                        } else {
                                            theme::ACCENT
                                        },
                                    );
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} / {}",
                                            progress.current, progress.target
                                        ))
                                        .size(theme::FONT_CAPTION)
                                        .color(theme::TEXT_DIM),
                                    );
                                });
                            });
                            ui.add_space(6.0);
                        }
                    });
                    ui.add_space(theme::SPACING_MD);
                }
            });
    }

    // ========================================================================
    // SETTINGS MODAL
    // ========================================================================

    pub fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let response = egui::Modal::new(egui::Id::new("settings_modal"))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(300.0);
                ui.add(
                    egui::Label::new(egui::RichText::new("Settings").size(16.0).strong())
                        .selectable(false),
                );
                ui.add_space(theme::SPACING_SM);

                ui.add(
                    egui::Label::new(
                        egui::RichText::new("View")
                            .size(theme::FONT_LABEL)
                            .color(theme::ACCENT_LIGHT),
                    )
                    .selectable(false),
                );
                let mut changed = false;
                if theme::settings_checkbox(ui, self.large_sprites, "Large sprites", true) {
                    self.large_sprites = !self.large_sprites;
                    changed = true;
                }
                if theme::settings_checkbox(
                    ui,
                    self.prefer_shiny_sprites,
                    "Show shiny sprites for shiny catches",
                    true,
                ) {
                    self.prefer_shiny_sprites = !self.prefer_shiny_sprites;
                    changed = true;
                }
                if changed {
                    self.save_settings();
                }

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Cache")
                            .size(theme::FONT_LABEL)
                            .color(theme::ACCENT_LIGHT),
                    )
                    .selectable(false),
                );
                if ui
                    .add(theme::button_danger(format!(
                        "{}  Clear sprite cache",
                        icons::TRASH
                    )))
                    .clicked()
                {
                    let _ = std::fs::remove_dir_all(self.cache_dir.join("sprites"));
                    self.sprite_cache.clear();
                    self.sprite_loading.clear();
                }

                ui.add_space(theme::SPACING_MD);
                if ui.add(theme::button("Close")).clicked() {
                    self.show_settings = false;
                }
            });

        if response.should_close() {
            self.show_settings = false;
        }
    }
}
