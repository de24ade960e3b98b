//! Pixelation: block-averaged downsampling and dot rendering

use image::RgbaImage;
use resvg::tiny_skia;

/// Dot diameter as a fraction of the cell size
pub const DOT_FILL: f32 = 0.9;

/// Low-resolution colour grid, one dot per cell, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    columns: u32,
    rows: u32,
    dots: Vec<[u8; 4]>,
}

impl Mosaic {
    /// Downsample `image` to `columns` cells across, rows following the aspect ratio.
    pub fn from_image(image: &RgbaImage, columns: u32) -> Self {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Self {
                columns: 0,
                rows: 0,
                dots: Vec::new(),
            };
        }

        let columns = columns.clamp(1, width);
        let rows = ((columns as f64 * height as f64 / width as f64).round() as u32).clamp(1, height);

        let mut dots = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            let (y0, y1) = cell_span(row, rows, height);
            for col in 0..columns {
                let (x0, x1) = cell_span(col, columns, width);
                let mut sum = [0u64; 4];
                for y in y0..y1 {
                    for x in x0..x1 {
                        let p = image.get_pixel(x, y).0;
                        for (acc, v) in sum.iter_mut().zip(p) {
                            *acc += v as u64;
                        }
                    }
                }
                let count = ((x1 - x0) * (y1 - y0)) as u64;
                dots.push(sum.map(|s| ((s + count / 2) / count) as u8));
            }
        }

        Self { columns, rows, dots }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    #[cfg(test)]
    pub fn dot(&self, col: u32, row: u32) -> Option<[u8; 4]> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.dots.get((row * self.columns + col) as usize).copied()
    }

    /// Iterate `(col, row, rgba)` in row-major order
    pub fn dots(&self) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
        let columns = self.columns.max(1);
        self.dots
            .iter()
            .enumerate()
            .map(move |(i, c)| (i as u32 % columns, i as u32 / columns, *c))
    }

    /// Rasterize as anti-aliased dots over a solid background.
    /// Output is `columns * cell_size` by `rows * cell_size`.
    pub fn render(&self, cell_size: u32, background: [u8; 4]) -> Option<RgbaImage> {
        let cell_size = cell_size.max(1);
        let width = self.columns * cell_size;
        let height = self.rows * cell_size;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background[0],
            background[1],
            background[2],
            background[3],
        ));

        let cell = cell_size as f32;
        let radius = cell * DOT_FILL / 2.0;
        let mut paint = tiny_skia::Paint::default();
        paint.anti_alias = true;
        for (col, row, [r, g, b, a]) in self.dots() {
            let cx = col as f32 * cell + cell / 2.0;
            let cy = row as f32 * cell + cell / 2.0;
            let Some(circle) = tiny_skia::PathBuilder::from_circle(cx, cy, radius) else {
                continue;
            };
            paint.set_color_rgba8(r, g, b, a);
            pixmap.fill_path(
                &circle,
                &paint,
                tiny_skia::FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            );
        }

        let pixels: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, pixels)
    }
}

/// Half-open source range covered by cell `index` of `cells` over `len` pixels
fn cell_span(index: u32, cells: u32, len: u32) -> (u32, u32) {
    let start = (index as u64 * len as u64 / cells as u64) as u32;
    let end = ((index as u64 + 1) * len as u64 / cells as u64) as u32;
    (start, end.max(start + 1).min(len))
}

/// Shrink so the longest edge is at most `max_dim`
pub fn prepare_source(image: &image::DynamicImage, max_dim: u32) -> RgbaImage {
    if image.width().max(image.height()) > max_dim {
        image.thumbnail(max_dim, max_dim).to_rgba8()
    } else {
        image.to_rgba8()
    }
}
