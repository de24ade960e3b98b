//! Utility functions

use chrono::NaiveDate;
use std::path::PathBuf;

// Gilt frame around a 3x3 dot grid; square viewBox so it doubles as the window icon
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 120 120"><rect x="4" y="4" width="112" height="112" rx="10" fill="#1c1917" stroke="#e0b24a" stroke-width="8"/><g fill="#e0b24a"><circle cx="36" cy="36" r="11"/><circle cx="60" cy="36" r="11" fill="#a8a29e"/><circle cx="84" cy="36" r="11"/><circle cx="36" cy="60" r="11" fill="#a8a29e"/><circle cx="60" cy="60" r="11"/><circle cx="84" cy="60" r="11" fill="#a8a29e"/><circle cx="36" cy="84" r="11"/><circle cx="60" cy="84" r="11" fill="#a8a29e"/><circle cx="84" cy="84" r="11"/></g></svg>"##;

/// Rasterize the logo SVG to a square RGBA image.
pub fn rasterize_logo(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

/// Local data directory for settings and logs
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Pixel Museum")
}

/// "Monday, 19 October 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Default file name offered when saving the mosaic
pub fn export_file_name(date: NaiveDate, attempts: usize) -> String {
    format!("pixel-museum-{}-{}.png", date.format("%Y-%m-%d"), attempts)
}

/// Truncate to `max_chars`, appending an ellipsis when shortened
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_rasterizes() {
        let (pixels, w, h) = rasterize_logo(64).unwrap();
        assert_eq!((w, h), (64, 64));
        assert_eq!(pixels.len(), 64 * 64 * 4);
        // Rounded frame leaves the corner pixel transparent
        assert_eq!(pixels[3], 0);
    }

    #[test]
    fn dates_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_long_date(date), "Monday, 19 October 2026");
        assert_eq!(export_file_name(date, 3), "pixel-museum-2026-10-19-3.png");
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("Nighthawks", 20), "Nighthawks");
        assert_eq!(truncate("Déjeuner sur l'herbe", 8), "Déjeune…");
    }
}
