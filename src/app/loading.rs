//! Daily artwork loading

use super::App;
use crate::api::{ApiError, MuseumClient};
use crate::constants::SOURCE_MAX_DIM;
use crate::daily::{daily_object_id, DailyRange};
use crate::mosaic::prepare_source;
use crate::types::*;
use chrono::NaiveDate;
use eframe::egui;
use image::RgbaImage;
use tracing::{error, info};

/// Select today's artwork and download its image, shrunk for pixelation.
async fn load_daily(
    client: &MuseumClient,
    date: NaiveDate,
    range: DailyRange,
    attempts: u32,
) -> Result<(Artwork, RgbaImage), ApiError> {
    let artwork = client.fetch_daily_artwork(date, range, attempts).await?;
    let image = client.fetch_image(&artwork.image_url).await?;
    info!(
        id = artwork.id,
        width = image.width(),
        height = image.height(),
        "Daily image loaded"
    );
    Ok((artwork, prepare_source(&image, SOURCE_MAX_DIM)))
}

impl App {
    pub fn start_daily_load(&mut self, ctx: &egui::Context) {
        self.load_started = true;
        self.game.reset();
        self.source = None;
        self.mosaic = None;
        self.full_texture = None;

        let client = self.client.clone();
        let date = self.today;
        let range = self.settings.daily_range();
        let attempts = self.settings.daily_attempts();
        let slot = self.daily_load.clone();
        let ctx = ctx.clone();

        info!(
            %date,
            first_candidate = daily_object_id(date, range),
            attempts,
            "Loading daily artwork"
        );

        self.runtime.spawn(async move {
            let outcome = match load_daily(&client, date, range, attempts).await {
                Ok((artwork, source)) => LoadOutcome::Ready { artwork, source },
                Err(e) => {
                    error!(error = %e, %date, "Failed to load daily artwork");
                    LoadOutcome::Failed(e.to_string())
                }
            };
            if let Ok(mut s) = slot.lock() {
                *s = Some(outcome);
            }
            ctx.request_repaint();
        });
    }

    pub fn poll_daily_load(&mut self, ctx: &egui::Context) {
        let outcome = self.daily_load.lock().ok().and_then(|mut s| s.take());
        match outcome {
            Some(LoadOutcome::Ready { artwork, source }) => {
                let size = [source.width() as usize, source.height() as usize];
                self.full_texture = Some(ctx.load_texture(
                    format!("artwork_{}", artwork.id),
                    egui::ColorImage::from_rgba_unmultiplied(size, source.as_raw()),
                    egui::TextureOptions::LINEAR,
                ));
                self.source = Some(source);
                self.game.start(artwork);
                self.ensure_mosaic();
            }
            Some(LoadOutcome::Failed(message)) => self.game.fail(message),
            None => {}
        }
    }
}
