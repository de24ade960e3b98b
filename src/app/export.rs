//! Saving the mosaic and opening the museum page

use super::App;
use crate::constants::EXPORT_CELL_SIZE;
use crate::theme;
use crate::utils::export_file_name;
use tracing::{info, warn};

impl App {
    pub fn save_mosaic(&mut self) {
        let Some(mosaic) = &self.mosaic else {
            return;
        };
        let Some(image) = mosaic.render(EXPORT_CELL_SIZE, theme::CANVAS_BG.to_array()) else {
            warn!("Mosaic too small to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .set_file_name(export_file_name(self.today, self.game.attempts()))
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            return;
        };

        match image.save_with_format(&path, image::ImageFormat::Png) {
            Ok(()) => {
                info!(path = %path.display(), "Mosaic saved");
                self.show_toast("Mosaic saved");
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to save mosaic");
                self.show_toast(format!("Save failed: {}", e));
            }
        }
    }

    pub fn open_in_museum(&mut self) {
        let Some(url) = self
            .game
            .artwork()
            .map(|a| a.object_url.clone())
            .filter(|u| !u.is_empty())
        else {
            return;
        };
        if let Err(e) = open::that(&url) {
            warn!(error = %e, url = %url, "Failed to open browser");
            self.show_toast("Could not open the browser");
        }
    }
}
