//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use chrono::{DateTime, Utc};
use eframe::egui;

/// Pill badge showing a Pokémon type in its color
pub fn type_badge(ui: &mut egui::Ui, type_name: &str) {
    let color = theme::type_color(type_name);
    let bg = egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 26);
    egui::Frame::new()
        .fill(bg)
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(type_name)
                        .size(theme::FONT_SMALL)
                        .color(color),
                )
                .selectable(false),
            );
        });
}

/// Clickable capture-flag chip. Returns true when toggled.
pub fn flag_chip(
    ui: &mut egui::Ui,
    label: &str,
    color: egui::Color32,
    active: bool,
    enabled: bool,
) -> bool {
    let galley = ui.painter().layout_no_wrap(
        label.to_string(),
        egui::FontId::proportional(theme::FONT_SMALL),
        egui::Color32::WHITE,
    );
    let size = galley.size() + egui::vec2(16.0, 8.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let fill = if !enabled {
            theme::BTN_DISABLED
        } else if active {
            color
        } else {
            theme::TOGGLE_UNSELECTED
        };
        let (fill, draw_rect) = if enabled {
            theme::button_visual(&response, fill, rect)
        } else {
            (fill, rect)
        };
        ui.painter()
            .rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
        let text_color = if !enabled {
            theme::TEXT_DIM
        } else if active {
            egui::Color32::from_rgb(0x12, 0x12, 0x14)
        } else {
            theme::TEXT_SECONDARY
        };
        ui.painter().text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(theme::FONT_SMALL),
            text_color,
        );
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(if enabled {
            egui::CursorIcon::PointingHand
        } else {
            egui::CursorIcon::NotAllowed
        });
    }

    enabled && response.clicked()
}

/// Thin horizontal progress bar
pub fn progress_bar(ui: &mut egui::Ui, fraction: f32, fill: egui::Color32) {
    let height = 6.0;
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, height / 2.0, theme::BG_SURFACE);
    let frac = fraction.clamp(0.0, 1.0);
    if frac > 0.0 {
        let filled = egui::Rect::from_min_size(
            rect.min,
            egui::vec2((rect.width() * frac).max(height), height),
        );
        painter.rect_filled(filled, height / 2.0, fill);
    }
}

/// Dashboard stat tile: icon, caption and a big number
pub fn stat_tile(ui: &mut egui::Ui, icon: &str, label: &str, value: &str, color: egui::Color32) {
    theme::card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(icon).size(22.0).color(color))
                    .selectable(false),
            );
            ui.vertical(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(label)
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(value)
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    )
                    .selectable(false),
                );
            });
        });
    });
}

/// Event window like "Jun 01 14:00 – Jun 01 17:00 UTC"
pub fn format_event_window(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{} – {} UTC",
        start.format("%b %d %H:%M"),
        end.format("%b %d %H:%M")
    )
}
