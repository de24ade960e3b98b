//! App module - contains the main application state and logic

mod export;
mod loading;
mod search;
mod views;

use crate::api::MuseumClient;
use crate::game::Game;
use crate::mosaic::Mosaic;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use chrono::NaiveDate;
use eframe::egui;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) client: MuseumClient,
    pub(crate) today: NaiveDate,
    pub(crate) game: Game,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Daily artwork
    pub(crate) load_started: bool,
    pub(crate) daily_load: Arc<Mutex<Option<LoadOutcome>>>,
    pub(crate) source: Option<RgbaImage>,
    pub(crate) mosaic: Option<Mosaic>,
    pub(crate) mosaic_resolution: u32,
    pub(crate) full_texture: Option<egui::TextureHandle>,
    // Search
    pub(crate) search_query: String,
    pub(crate) focus_search: bool,
    pub(crate) search_results: Vec<SearchResult>,
    pub(crate) search_in_flight: bool,
    pub(crate) search_generation: u64,
    pub(crate) search_slot: SearchSlot,
    pub(crate) search_cancel: Option<CancellationToken>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        today: NaiveDate,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let client = MuseumClient::new(settings.api_base_url_or_default())?;
        let runtime = tokio::runtime::Runtime::new()?;
        let game = Game::new(settings.initial_resolution, settings.resolution_step);

        debug!(%today, base_url = settings.api_base_url_or_default(), "App state created");

        Ok(Self {
            settings,
            data_dir,
            runtime,
            client,
            today,
            game,
            logo_texture: None,
            load_started: false,
            daily_load: Arc::new(Mutex::new(None)),
            source: None,
            mosaic: None,
            mosaic_resolution: 0,
            full_texture: None,
            search_query: String::new(),
            focus_search: true,
            search_results: Vec::new(),
            search_in_flight: false,
            search_generation: 0,
            search_slot: SearchSlot::default(),
            search_cancel: None,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        })
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(Instant::now());
    }

    /// Rebuild the mosaic when the reveal level moved past the cached one
    pub(crate) fn ensure_mosaic(&mut self) {
        let resolution = self.game.resolution();
        if self.mosaic.is_some() && self.mosaic_resolution == resolution {
            return;
        }
        if let Some(source) = &self.source {
            let mosaic = Mosaic::from_image(source, resolution);
            debug!(
                resolution,
                columns = mosaic.columns(),
                rows = mosaic.rows(),
                "Mosaic rebuilt"
            );
            self.mosaic = Some(mosaic);
            self.mosaic_resolution = resolution;
        }
    }
}
