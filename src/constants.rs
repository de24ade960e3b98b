//! Application constants and configuration

pub const API_BASE_URL: &str = "https://collectionapi.metmuseum.org/public/collection/v1";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Pixel Museum";

/// Daily artwork ids are drawn from `DAILY_ID_BASE .. DAILY_ID_BASE + DAILY_ID_SPAN`
pub const DAILY_ID_BASE: u32 = 435_800;
pub const DAILY_ID_SPAN: u32 = 1_000;
/// Candidate ids probed before giving up on today's artwork
pub const MAX_DAILY_ATTEMPTS: u32 = 25;

/// Mosaic columns shown before the first guess
pub const INITIAL_RESOLUTION: u32 = 8;
/// Columns added per wrong guess or skip
pub const RESOLUTION_STEP: u32 = 8;

pub const SEARCH_RESULT_LIMIT: usize = 10;
/// Concurrent detail requests per search
pub const SEARCH_CONCURRENCY: usize = 4;

/// Longest edge of the in-memory source image
pub const SOURCE_MAX_DIM: u32 = 640;
/// Pixels per mosaic cell in exported PNGs
pub const EXPORT_CELL_SIZE: u32 = 16;
