//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::game::Guess;
use crate::mosaic::{Mosaic, DOT_FILL};
use crate::theme;
use crate::types::SearchResult;
use crate::utils::truncate;
use eframe::egui;

/// Largest rect with the given aspect ratio centred inside `outer`
pub fn fit_rect(outer: egui::Rect, width: f32, height: f32) -> egui::Rect {
    if width <= 0.0 || height <= 0.0 {
        return egui::Rect::from_center_size(outer.center(), egui::Vec2::ZERO);
    }
    let scale = (outer.width() / width).min(outer.height() / height);
    egui::Rect::from_center_size(outer.center(), egui::vec2(width * scale, height * scale))
}

/// Paint the mosaic as dots, scaled to fit `rect`
pub fn paint_mosaic(painter: &egui::Painter, rect: egui::Rect, mosaic: &Mosaic) {
    if mosaic.is_empty() {
        return;
    }
    let area = fit_rect(rect, mosaic.columns() as f32, mosaic.rows() as f32);
    let cell = area.width() / mosaic.columns() as f32;
    let radius = cell * DOT_FILL / 2.0;

    painter.rect_filled(area, theme::RADIUS_DEFAULT, theme::CANVAS_BG);
    for (col, row, [r, g, b, a]) in mosaic.dots() {
        let center = area.min + egui::vec2((col as f32 + 0.5) * cell, (row as f32 + 0.5) * cell);
        painter.circle_filled(center, radius, egui::Color32::from_rgba_unmultiplied(r, g, b, a));
    }
}

/// Clickable search result. Already-guessed entries are struck through and inert.
pub fn result_row(ui: &mut egui::Ui, result: &SearchResult, guessed: bool) -> egui::Response {
    let width = ui.available_width();
    let sense = if guessed { egui::Sense::hover() } else { egui::Sense::click() };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, theme::RESULT_ROW_HEIGHT), sense);

    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = if guessed {
            (theme::BG_INPUT, rect)
        } else {
            theme::button_visual(&response, theme::BG_ELEVATED, rect)
        };
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);

        let max_chars = ((width - 40.0) / 7.0).max(8.0) as usize;
        let (title_color, byline_color) = if guessed {
            (theme::TEXT_DIM, theme::TEXT_DIM)
        } else {
            (theme::TEXT_PRIMARY, theme::TEXT_MUTED)
        };
        let left = draw_rect.left() + theme::SPACING_MD;
        let title_rect = painter.text(
            egui::pos2(left, draw_rect.top() + 13.0),
            egui::Align2::LEFT_CENTER,
            truncate(&result.title, max_chars),
            egui::FontId::proportional(theme::FONT_LABEL),
            title_color,
        );
        painter.text(
            egui::pos2(left, draw_rect.top() + 31.0),
            egui::Align2::LEFT_CENTER,
            truncate(&result.byline(), max_chars),
            egui::FontId::proportional(theme::FONT_SMALL),
            byline_color,
        );

        if guessed {
            painter.line_segment(
                [title_rect.left_center(), title_rect.right_center()],
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::TEXT_DIM),
            );
            painter.text(
                egui::pos2(draw_rect.right() - theme::SPACING_LG, draw_rect.center().y),
                egui::Align2::RIGHT_CENTER,
                egui_phosphor::regular::X,
                egui::FontId::proportional(theme::FONT_BODY),
                theme::STATUS_ERROR,
            );
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    }

    response
}

/// One line of the guess history
pub fn history_entry(ui: &mut egui::Ui, index: usize, guess: &Guess) {
    let (icon, color, text) = match guess {
        Guess::Wrong(r) => (egui_phosphor::regular::X, theme::STATUS_ERROR, r.title.as_str()),
        Guess::Skipped => (egui_phosphor::regular::SKIP_FORWARD, theme::TEXT_DIM, "Skipped"),
        Guess::Correct(r) => (egui_phosphor::regular::CHECK, theme::STATUS_SUCCESS, r.title.as_str()),
    };
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{}.", index + 1))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
        ui.add(egui::Label::new(egui::RichText::new(icon).color(color)).selectable(false));
        ui.add(
            egui::Label::new(
                egui::RichText::new(truncate(text, 40))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_SECONDARY),
            )
            .selectable(false),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_rect_keeps_aspect() {
        let outer = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 200.0));
        let fitted = fit_rect(outer, 10.0, 10.0);
        assert_eq!(fitted.size(), egui::vec2(200.0, 200.0));
        assert_eq!(fitted.center(), outer.center());

        let wide = fit_rect(outer, 40.0, 10.0);
        assert_eq!(wide.size(), egui::vec2(400.0, 100.0));
    }

    #[test]
    fn fit_rect_degenerate_source() {
        let outer = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        assert_eq!(fit_rect(outer, 0.0, 5.0).size(), egui::Vec2::ZERO);
    }
}
