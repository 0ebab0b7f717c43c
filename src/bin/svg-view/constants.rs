/// Default window size in logical pixels.
pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Largest pixmap side the document is rasterized at. Zooming in past this
/// reuses the capped texture instead of allocating bigger ones.
pub const MAX_RASTER_DIM: f32 = 8192.0;
