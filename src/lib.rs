//! Viewport state and coordinate transforms for the document view.
//!
//! The viewport maps widget pixels to document coordinates through a scale
//! (document units per pixel) and a center point in document space. Widget
//! size is passed into every derivation rather than stored, so a window
//! resize needs no bookkeeping: the next frame simply derives the visible
//! rectangle against the new size while scale and center stay put.

use eframe::egui::{Pos2, Rect, Vec2};

/// Base zoom factor for mouse wheel input. A wheel delta of `d` multiplies
/// the scale by `1.0025^(-d)`, so scrolling up (positive delta) zooms in.
pub const ZOOM_WHEEL_BASE: f32 = 1.0025;

/// Keeps `scale` finite and strictly positive under extreme zooming.
const SCALE_MIN: f32 = 1e-9;
const SCALE_MAX: f32 = 1e9;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_center: Pos2,
    start_pixel: Pos2,
}

/// Pan/zoom state of the document view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Document units per widget pixel. Always positive.
    scale: f32,
    /// Document-space point shown at the widget center.
    center: Pos2,
    drag: Option<Drag>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            center: Pos2::ZERO,
            drag: None,
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    /// Resets the view so `bounds` fits inside a widget of `widget_size`
    /// pixels, preserving aspect ratio and centering the document.
    ///
    /// Degenerate inputs (zero-sized bounds or widget) fall back to a scale
    /// of 1.0 so the positive-scale invariant holds.
    pub fn fit(&mut self, bounds: Rect, widget_size: Vec2) {
        let scale = f32::max(
            bounds.width() / widget_size.x,
            bounds.height() / widget_size.y,
        );
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self.center = bounds.center();
        self.drag = None;
    }

    /// The document-space rectangle currently mapped onto the widget.
    pub fn visible_rect(&self, widget_size: Vec2) -> Rect {
        Rect::from_center_size(self.center, widget_size * self.scale)
    }

    /// Maps a widget pixel position to document coordinates.
    pub fn pixel_to_doc(&self, pixel: Pos2, widget_size: Vec2) -> Pos2 {
        self.center + (pixel.to_vec2() - widget_size * 0.5) * self.scale
    }

    /// Maps a document-space point to widget pixel coordinates. Exact
    /// inverse of [`Self::pixel_to_doc`].
    pub fn doc_to_pixel(&self, doc: Pos2, widget_size: Vec2) -> Pos2 {
        ((doc - self.center) / self.scale + widget_size * 0.5).to_pos2()
    }

    /// Applies a wheel zoom step. Positive `delta` (scroll up) shrinks the
    /// visible area, i.e. zooms in.
    pub fn wheel(&mut self, delta: f32) {
        self.scale = (self.scale * ZOOM_WHEEL_BASE.powf(-delta)).clamp(SCALE_MIN, SCALE_MAX);
    }

    /// Starts a drag at the given widget pixel position.
    pub fn mouse_down(&mut self, pixel: Pos2) {
        self.drag = Some(Drag {
            start_center: self.center,
            start_pixel: pixel,
        });
    }

    /// Moves the pointer. While a drag is active the center translates by
    /// the pixel delta from the drag start, scaled into document units.
    /// Returns whether the viewport changed.
    pub fn mouse_move(&mut self, pixel: Pos2) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        self.center = drag.start_center - (pixel - drag.start_pixel) * self.scale;
        true
    }

    /// Ends a drag: one final move, then back to idle.
    pub fn mouse_up(&mut self, pixel: Pos2) {
        self.mouse_move(pixel);
        self.drag = None;
    }

    /// Drops an active drag without a final move, for when the pointer
    /// position is lost (e.g. released outside the window).
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
