//! View rendering (sidebar, canvas, win card, toast)

use super::App;
use crate::game::Phase;
use crate::theme;
use crate::ui::components::{fit_rect, history_entry, paint_mosaic, result_row};
use crate::utils::{self, format_long_date};
use eframe::egui;

impl App {
    // ========================================================================
    // SIDEBAR: search, results, skip
    // ========================================================================

    pub(crate) fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("search_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 0)),
            )
            .show(ctx, |ui| {
                ui.add_space(20.0);
                self.render_header(ui, ctx);
                ui.add_space(14.0);

                let playing = *self.game.phase() == Phase::Playing;
                self.render_search_box(ui, ctx, playing);
                ui.add_space(10.0);

                let footer_height = theme::BUTTON_HEIGHT_LARGE + 40.0;
                let list_height = (ui.available_height() - footer_height).max(80.0);
                let mut guess = None;
                egui::ScrollArea::vertical()
                    .max_height(list_height)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if self.search_in_flight {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(egui::RichText::new("Searching…").color(theme::TEXT_MUTED));
                            });
                        }
                        for result in &self.search_results {
                            let guessed = self.game.was_guessed(result.id);
                            let response = result_row(ui, result, guessed || !playing);
                            if response.clicked() {
                                guess = Some(result.clone());
                            }
                        }
                        if self.search_results.is_empty() && !self.search_in_flight {
                            ui.add_space(theme::SPACING_MD);
                            ui.label(
                                egui::RichText::new("Search the collection by title, artist or subject, then pick your guess.")
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_DIM),
                            );
                        }
                    });
                if let Some(result) = guess {
                    self.submit_guess(&result);
                }

                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    let skip = ui.add_enabled(
                        playing,
                        theme::button(format!("{}  Skip", egui_phosphor::regular::SKIP_FORWARD))
                            .min_size(egui::vec2(120.0, theme::BUTTON_HEIGHT_LARGE)),
                    );
                    if skip.clicked() {
                        self.skip();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Attempts: {}", self.game.attempts()))
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                });
            });
    }

    fn render_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            if self.logo_texture.is_none() {
                self.logo_texture = utils::rasterize_logo(96).map(|(pixels, w, h)| {
                    ctx.load_texture(
                        "logo",
                        egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                        egui::TextureOptions::LINEAR,
                    )
                });
            }
            if let Some(texture) = &self.logo_texture {
                ui.image(egui::load::SizedTexture::new(texture.id(), egui::vec2(40.0, 40.0)));
            }
            ui.vertical(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("PIXEL MUSEUM")
                            .size(theme::FONT_HEADING)
                            .color(theme::ACCENT),
                    )
                    .selectable(false),
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format_long_date(self.today))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
            });
        });
    }

    fn render_search_box(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, enabled: bool) {
        let mut submit = false;
        theme::section_frame()
            .inner_margin(egui::Margin::symmetric(8, 8))
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                                .size(14.0)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    let search_id = ui.make_persistent_id("search_box");
                    let button_width = 64.0;
                    let response = ui.add_enabled(
                        enabled,
                        egui::TextEdit::singleline(&mut self.search_query)
                            .id(search_id)
                            .hint_text("Search the collection...")
                            .frame(false)
                            .desired_width(ui.available_width() - button_width - theme::SPACING_SM),
                    );
                    let button = ui.add_enabled(
                        can_submit_search(enabled, &self.search_query),
                        theme::button("Search").min_size(egui::vec2(button_width, theme::BUTTON_HEIGHT)),
                    );
                    if button.clicked() {
                        submit = true;
                    }
                    if self.focus_search && enabled {
                        self.focus_search = false;
                        response.request_focus();
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                        response.request_focus();
                    }
                });
            });
        if submit {
            self.start_search(ctx);
        }
    }

    // ========================================================================
    // CENTRAL PANEL: canvas and status
    // ========================================================================

    pub(crate) fn render_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_XL as i8)),
            )
            .show(ctx, |ui| {
                self.central_panel_rect = Some(ui.max_rect());
                match self.game.phase().clone() {
                    Phase::Loading => {
                        ui.centered_and_justified(|ui| {
                            ui.spinner();
                        });
                    }
                    Phase::Failed(message) => self.render_failure(ui, ctx, &message),
                    Phase::Playing => self.render_playing(ui),
                    Phase::Won => self.render_won(ui),
                }
            });
    }

    fn render_failure(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, message: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            ui.label(
                egui::RichText::new("Today's artwork could not be loaded")
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(egui::RichText::new(message).color(theme::STATUS_ERROR));
            ui.add_space(theme::SPACING_LG);
            let retry = ui.add(
                theme::button_accent(format!("{}  Retry", egui_phosphor::regular::ARROW_CLOCKWISE))
                    .min_size(egui::vec2(120.0, theme::BUTTON_HEIGHT)),
            );
            if retry.clicked() {
                self.start_daily_load(ctx);
            }
        });
    }

    fn render_playing(&mut self, ui: &mut egui::Ui) {
        let status_height = 28.0;
        let canvas = ui.available_rect_before_wrap();
        let canvas = egui::Rect::from_min_max(canvas.min, egui::pos2(canvas.max.x, canvas.max.y - status_height));
        ui.allocate_rect(canvas, egui::Sense::hover());
        if let Some(mosaic) = &self.mosaic {
            paint_mosaic(ui.painter(), canvas, mosaic);
        }

        ui.horizontal(|ui| {
            let (columns, rows) = self
                .mosaic
                .as_ref()
                .map(|m| (m.columns(), m.rows()))
                .unwrap_or((0, 0));
            ui.label(
                egui::RichText::new(format!("{} × {} dots", columns, rows))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(theme::button(format!("{}  Save mosaic", egui_phosphor::regular::FLOPPY_DISK))).clicked() {
                    self.save_mosaic();
                }
            });
        });
    }

    fn render_won(&mut self, ui: &mut egui::Ui) {
        let card_width = 300.0;
        let area = ui.available_rect_before_wrap();
        let image_rect = egui::Rect::from_min_max(
            area.min,
            egui::pos2(area.max.x - card_width - theme::SPACING_XL, area.max.y),
        );
        if let Some(texture) = &self.full_texture {
            let size = texture.size_vec2();
            let fitted = fit_rect(image_rect, size.x, size.y);
            ui.painter().image(
                texture.id(),
                fitted,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        let card_rect = egui::Rect::from_min_max(egui::pos2(image_rect.max.x + theme::SPACING_XL, area.min.y), area.max);
        let mut open_page = false;
        let mut save = false;
        ui.scope_builder(egui::UiBuilder::new().max_rect(card_rect), |ui| {
            theme::card_frame().show(ui, |ui| {
                ui.set_width(card_width - 2.0 * theme::SPACING_LG);
                ui.label(
                    egui::RichText::new(format!("{}  Solved in {}", egui_phosphor::regular::CHECK, self.game.attempts()))
                        .size(theme::FONT_BODY)
                        .color(theme::STATUS_SUCCESS),
                );
                ui.add_space(theme::SPACING_MD);
                if let Some(artwork) = self.game.artwork() {
                    ui.label(
                        egui::RichText::new(&artwork.title)
                            .size(theme::FONT_TITLE)
                            .color(theme::TEXT_PRIMARY),
                    );
                    for (label, value) in [
                        ("Artist", &artwork.artist),
                        ("Date", &artwork.date),
                        ("Department", &artwork.department),
                    ] {
                        if value.trim().is_empty() {
                            continue;
                        }
                        ui.add_space(theme::SPACING_SM);
                        ui.label(egui::RichText::new(label).size(theme::FONT_SMALL).color(theme::TEXT_DIM));
                        ui.label(egui::RichText::new(value).size(theme::FONT_LABEL).color(theme::TEXT_SECONDARY));
                    }
                    ui.add_space(theme::SPACING_LG);
                    if !artwork.object_url.is_empty() {
                        open_page = ui
                            .add(theme::button_accent(format!(
                                "{}  Open in museum",
                                egui_phosphor::regular::ARROW_SQUARE_OUT
                            )))
                            .clicked();
                    }
                    save = ui
                        .add(theme::button(format!("{}  Save mosaic", egui_phosphor::regular::FLOPPY_DISK)))
                        .clicked();
                }

                ui.add_space(theme::SPACING_LG);
                ui.separator();
                for (i, guess) in self.game.history().iter().enumerate() {
                    history_entry(ui, i, guess);
                }
            });
        });
        if open_page {
            self.open_in_museum();
        }
        if save {
            self.save_mosaic();
        }
    }

    // ========================================================================
    // TOAST
    // ========================================================================

    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect) else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        let alpha = if elapsed > visible_duration {
            (total_duration - elapsed) / fade_duration
        } else {
            1.0
        };

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::with_alpha(theme::BG_ELEVATED, 0.9 * alpha))
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::with_alpha(theme::ACCENT, 0.4 * alpha)))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg).color(theme::with_alpha(theme::TEXT_PRIMARY, alpha)));
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

/// The search button only works while playing and with something to look for
fn can_submit_search(playing: bool, query: &str) -> bool {
    playing && !query.trim().is_empty()
}
