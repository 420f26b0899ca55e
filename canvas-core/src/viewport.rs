// Zoom and pan state for the canvas stage.
//
// Screen position of a canvas point: `world * scale - pan`, where `pan` is
// the stage's scroll offset. Every zoom anchored at a cursor keeps the canvas
// point under that cursor fixed.
//
// A zoom is applied in two steps. The scale changes immediately, and the
// matching scroll correction is parked until `apply_pending_scroll` runs on
// the next render frame. The scrollable area only has its new extent once
// the scaled content has been laid out, so an earlier scroll would be clamped
// by the browser.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum WheelMode {
    /// `scale * exp(-delta_y * sensitivity)`, smooth for trackpads.
    Continuous { sensitivity: f64 },
    /// Multiply or divide by `factor` per wheel notch.
    Notched { factor: f64 },
}

impl Default for WheelMode {
    fn default() -> Self {
        WheelMode::Continuous { sensitivity: 0.002 }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel: WheelMode,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { min_scale: 0.25, max_scale: 2.0, wheel: WheelMode::default() }
    }
}

impl ViewportConfig {
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Bounds and step for the percentage zoom control.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for PercentZoomConfig {
    fn default() -> Self {
        Self { min: 25.0, max: 200.0, step: 10.0 }
    }
}

/// Zoom as a whole percentage, driven by in/out/reset buttons or a field.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentZoom {
    pub percent: f64,
}

impl Default for PercentZoom {
    fn default() -> Self {
        Self { percent: 100.0 }
    }
}

impl PercentZoom {
    pub fn scale(&self) -> f64 {
        self.percent / 100.0
    }

    /// Set to `requested`, saturating at the configured bounds.
    pub fn set(&mut self, requested: f64, cfg: &PercentZoomConfig) -> f64 {
        if requested.is_finite() {
            self.percent = requested.clamp(cfg.min, cfg.max);
        }
        self.percent
    }

    pub fn zoom_in(&mut self, cfg: &PercentZoomConfig) -> f64 {
        self.set(self.percent + cfg.step, cfg)
    }

    pub fn zoom_out(&mut self, cfg: &PercentZoomConfig) -> f64 {
        self.set(self.percent - cfg.step, cfg)
    }

    pub fn reset(&mut self, cfg: &PercentZoomConfig) -> f64 {
        self.set(100.0, cfg)
    }
}

/// The stage element's bounding box in client coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl StageBox {
    /// Client point relative to the stage, or `None` if it falls outside.
    pub fn local(&self, client_x: f64, client_y: f64) -> Option<Point> {
        let x = client_x - self.left;
        let y = client_y - self.top;
        let inside = x.is_finite()
            && y.is_finite()
            && (0.0..=self.width).contains(&x)
            && (0.0..=self.height).contains(&y);
        inside.then_some(Point { x, y })
    }
}

/// The parts of a wheel event the viewport reads.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelInput {
    pub client_x: f64,
    pub client_y: f64,
    pub delta_y: f64,
    /// Ctrl (or Cmd on macOS) held.
    pub zoom_modifier: bool,
}

impl WheelInput {
    /// Stage-relative cursor position if this event should zoom: the zoom
    /// modifier is held, the delta is usable and the cursor is over the stage.
    pub fn anchor(&self, stage: &StageBox) -> Option<Point> {
        if !self.zoom_modifier || !self.delta_y.is_finite() {
            return None;
        }
        stage.local(self.client_x, self.client_y)
    }
}

/// Result of one anchored zoom.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomChange {
    pub prev_scale: f64,
    pub scale: f64,
    /// Canvas point held under the cursor.
    pub anchor: Point,
    /// Scroll offset to apply on the next frame.
    pub scroll: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    #[serde(skip)]
    pending_scroll: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Viewport {
    pub fn new(scale: f64) -> Self {
        Self { scale, pan_x: 0.0, pan_y: 0.0, pending_scroll: None }
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point { x: p.x * self.scale - self.pan_x, y: p.y * self.scale - self.pan_y }
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        Point { x: (p.x + self.pan_x) / self.scale, y: (p.y + self.pan_y) / self.scale }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Sync with the stage's real scroll offset. Ignored while a correction
    /// is waiting for the next frame, since the stage has not caught up yet.
    pub fn sync_scroll(&mut self, left: f64, top: f64) {
        if self.pending_scroll.is_none() {
            self.pan_x = left;
            self.pan_y = top;
        }
    }

    pub fn pending_scroll(&self) -> Option<Point> {
        self.pending_scroll
    }

    /// Scroll offset the next frame will land on.
    fn effective_pan(&self) -> Point {
        self.pending_scroll.unwrap_or(Point { x: self.pan_x, y: self.pan_y })
    }

    /// Zoom to `requested` (clamped) keeping the canvas point under `anchor`
    /// fixed. `anchor` is relative to the stage's top-left corner.
    pub fn zoom_at(&mut self, anchor: Point, requested: f64, cfg: &ViewportConfig) -> ZoomChange {
        let prev_scale = self.scale;
        let pan = self.effective_pan();
        let world = Point {
            x: (pan.x + anchor.x) / prev_scale,
            y: (pan.y + anchor.y) / prev_scale,
        };

        let scale = if requested.is_finite() { cfg.clamp(requested) } else { prev_scale };
        let scroll = Point { x: world.x * scale - anchor.x, y: world.y * scale - anchor.y };

        self.scale = scale;
        self.pending_scroll = Some(scroll);
        ZoomChange { prev_scale, scale, anchor: world, scroll }
    }

    /// Set the scale without moving the scroll offset, for zooms driven from
    /// a fixed UI control rather than the cursor.
    pub fn set_scale(&mut self, requested: f64, cfg: &ViewportConfig) -> f64 {
        if requested.is_finite() {
            self.scale = cfg.clamp(requested);
        }
        self.scale
    }

    /// Apply a percentage zoom, anchored at the last known cursor position
    /// if there is one.
    pub fn apply_percent(
        &mut self,
        zoom: &PercentZoom,
        anchor: Option<Point>,
        cfg: &ViewportConfig,
    ) -> Option<ZoomChange> {
        match anchor {
            Some(anchor) => Some(self.zoom_at(anchor, zoom.scale(), cfg)),
            None => {
                self.set_scale(zoom.scale(), cfg);
                None
            }
        }
    }

    /// Handle a wheel event over the stage.
    ///
    /// Returns `None` without touching any state when the zoom modifier is
    /// not held or the cursor is outside `stage`; the caller must then leave
    /// the event alone so normal scrolling happens.
    pub fn handle_wheel(
        &mut self,
        input: &WheelInput,
        stage: &StageBox,
        cfg: &ViewportConfig,
    ) -> Option<ZoomChange> {
        let anchor = input.anchor(stage)?;

        let prev = self.scale;
        let requested = match cfg.wheel {
            WheelMode::Continuous { sensitivity } => prev * (-input.delta_y * sensitivity).exp(),
            WheelMode::Notched { factor } => {
                if input.delta_y < 0.0 {
                    prev * factor
                } else if input.delta_y > 0.0 {
                    prev / factor
                } else {
                    prev
                }
            }
        };
        Some(self.zoom_at(anchor, requested, cfg))
    }

    /// Next-frame hook: move to the scroll offset computed by the last zoom.
    pub fn apply_pending_scroll(&mut self) -> Option<Point> {
        let scroll = self.pending_scroll.take()?;
        self.pan_x = scroll.x;
        self.pan_y = scroll.y;
        Some(scroll)
    }
}
