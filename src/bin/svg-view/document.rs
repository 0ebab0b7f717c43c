//! SVG document loading and rasterization via resvg.

use crate::constants::MAX_RASTER_DIM;
use eframe::egui::{Pos2, Rect, vec2};
use resvg::{tiny_skia, usvg};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading a document. A failed load leaves the
/// currently shown document untouched.
#[derive(Error, Debug)]
pub enum DocumentLoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: usvg::Error,
    },
}

/// Errors that can occur when rasterizing a document.
#[derive(Error, Debug)]
pub enum RasterizeError {
    #[error("document rasters to a degenerate {width}x{height} pixmap")]
    BadDimensions { width: u32, height: u32 },
}

/// A parsed SVG document and its natural bounds in document coordinates.
///
/// usvg normalizes the view box during parsing, so the bounds origin is
/// always zero; the viewport math does not rely on that.
pub struct Document {
    tree: usvg::Tree,
    pub bounds: Rect,
    pub path: PathBuf,
}

/// Raster output ready for texture upload (premultiplied RGBA).
pub struct RasterImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Document {
    /// Reads and parses an SVG (or gzip-compressed SVGZ) file.
    pub fn load(path: &Path) -> Result<Self, DocumentLoadError> {
        let data = fs::read(path).map_err(|source| DocumentLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_data(&data, path.to_path_buf()).map_err(|source| DocumentLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_data(data: &[u8], path: PathBuf) -> Result<Self, usvg::Error> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;
        let size = tree.size();
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(size.width(), size.height()));
        Ok(Self { tree, bounds, path })
    }

    /// Renders the whole document at `raster_scale` pixels per document
    /// unit.
    pub fn rasterize(&self, raster_scale: f32) -> Result<RasterImage, RasterizeError> {
        let width = (self.bounds.width() * raster_scale).round() as u32;
        let height = (self.bounds.height() * raster_scale).round() as u32;

        let Some(mut pixmap) = tiny_skia::Pixmap::new(width, height) else {
            return Err(RasterizeError::BadDimensions { width, height });
        };

        let transform = tiny_skia::Transform::from_scale(raster_scale, raster_scale);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        Ok(RasterImage {
            pixels: pixmap.take(),
            width,
            height,
        })
    }
}

/// Picks the raster scale (pixels per document unit) for the current view
/// scale: the nearest power of two, capped so neither pixmap side exceeds
/// [`MAX_RASTER_DIM`] and floored so the larger side stays at least one
/// pixel. Bucketing means the texture is only regenerated when the zoom
/// crosses a factor of two.
pub fn raster_scale_for(view_scale: f32, bounds: Rect) -> f32 {
    let pixels_per_unit = (1.0 / view_scale).max(f32::MIN_POSITIVE);
    let bucketed = 2.0_f32.powi(pixels_per_unit.log2().round() as i32);

    let max_side = bounds.width().max(bounds.height()).max(1.0);
    let cap = MAX_RASTER_DIM / max_side;
    let floor = 1.0 / max_side;

    bucketed.clamp(floor, cap.max(floor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    const SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300" viewBox="0 0 400 300"><rect x="10" y="10" width="100" height="50" fill="red"/></svg>"#;

    fn test_document() -> Document {
        Document::from_data(SVG, PathBuf::from("test.svg")).unwrap()
    }

    #[test]
    fn parses_document_bounds() {
        let document = test_document();
        assert_eq!(document.bounds.min, pos2(0.0, 0.0));
        assert_eq!(document.bounds.max, pos2(400.0, 300.0));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Document::from_data(b"not an svg", PathBuf::from("bad.svg")).is_err());
    }

    #[test]
    fn rasterizes_at_requested_scale() {
        let raster = test_document().rasterize(0.5).unwrap();
        assert_eq!((raster.width, raster.height), (200, 150));
        assert_eq!(raster.pixels.len(), 200 * 150 * 4);
    }

    #[test]
    fn rejects_degenerate_raster() {
        assert!(test_document().rasterize(1e-6).is_err());
    }

    #[test]
    fn raster_scale_snaps_to_powers_of_two() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0));
        assert_eq!(raster_scale_for(1.0, bounds), 1.0);
        assert_eq!(raster_scale_for(0.25, bounds), 4.0);
        assert_eq!(raster_scale_for(3.0, bounds), 0.25);
    }

    #[test]
    fn raster_scale_respects_dimension_cap() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0));
        assert_eq!(raster_scale_for(0.001, bounds), MAX_RASTER_DIM / 400.0);
    }

    #[test]
    fn raster_scale_keeps_at_least_one_pixel() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0));
        let scale = raster_scale_for(1e8, bounds);
        assert!((400.0 * scale).round() >= 1.0);
    }
}
