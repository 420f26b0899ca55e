// JSON-in, JSON-out entry points.
//
// The wasm exports are thin wrappers over these so everything that decodes,
// computes and encodes can be tested without a browser.

use serde::Deserialize;

use crate::collision::resolve_with_report;
use crate::config::EditorConfig;
use crate::error::{CoreError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::gesture::{Commit, Gesture};
use crate::guides::compute_guides;
use crate::output::{OverlayOutput, ZoomOutput};
use crate::overlap::{obstacles_for, OverlapScope, OverlapTracker};
use crate::scope::ScopedView;
use crate::section::{self, Section, SectionPatch};
use crate::viewport::{PercentZoom, StageBox, Viewport, WheelInput};

fn parse<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// An empty string means "use the defaults".
pub fn parse_config(json: &str) -> Result<EditorConfig> {
    if json.trim().is_empty() {
        return Ok(EditorConfig::default());
    }
    EditorConfig::from_json(json)
}

fn scope_id(scope_parent_id: &str) -> Option<&str> {
    (!scope_parent_id.is_empty()).then_some(scope_parent_id)
}

/// Push `moving` out of `obstacles`; returns the full resolution report.
pub fn resolve(moving: &str, obstacles: &str, config: &str) -> Result<String> {
    let moving: Rect = parse(moving)?;
    let obstacles: Vec<Rect> = parse(obstacles)?;
    let cfg = parse_config(config)?;
    let res = resolve_with_report(&moving, &obstacles, cfg.max_iterations, cfg.gap);
    Ok(serde_json::to_string(&res)?)
}

/// Live overlaps plus guides for a candidate rectangle, without a session.
pub fn overlay(sections: &str, self_id: &str, candidate: &str, scope: &str, canvas: Size, config: &str) -> Result<String> {
    let sections: Vec<Section> = parse(sections)?;
    let candidate: Rect = parse(candidate)?;
    let scope: OverlapScope = if scope.trim().is_empty() { OverlapScope::default() } else { parse(scope)? };
    let cfg = parse_config(config)?;

    let mut tracker = OverlapTracker::new();
    let overlaps = tracker.report_live(&sections, self_id, &candidate, &scope).to_vec();
    let others = obstacles_for(&sections, self_id, &scope);
    let guides = compute_guides(&candidate, &others, canvas, &cfg.grid, cfg.snap_threshold, cfg.near_only);
    Ok(serde_json::to_string(&OverlayOutput { overlaps, guides })?)
}

/// Strict accept/reject of a dropped rectangle.
pub fn commit_drop(sections: &str, self_id: &str, proposed: &str, previous: &str, scope: &str) -> Result<String> {
    let sections: Vec<Section> = parse(sections)?;
    let proposed: Rect = parse(proposed)?;
    let previous: Rect = parse(previous)?;
    let scope: OverlapScope = if scope.trim().is_empty() { OverlapScope::default() } else { parse(scope)? };

    let accepted = OverlapTracker::new().resolve_on_end(&sections, self_id, &proposed, &previous, &scope);
    let reverted = !accepted.same_geometry(&proposed);
    let patch = SectionPatch::new(self_id, &accepted);
    Ok(serde_json::to_string(&Commit { patch, reverted })?)
}

pub fn scoped_view(sections: &str, scope_parent_id: &str, canvas: Size) -> Result<String> {
    let sections: Vec<Section> = parse(sections)?;
    let view = ScopedView::new(&sections, scope_id(scope_parent_id), canvas);
    Ok(serde_json::to_string(&view)?)
}

/// Id of the section a click at `(x, y)` selects, or `null`.
pub fn topmost_at(sections: &str, x: f64, y: f64) -> Result<String> {
    let sections: Vec<Section> = parse(sections)?;
    let hit = section::topmost_at(&sections, Point { x, y }).map(|s| s.id.as_str());
    Ok(serde_json::to_string(&hit)?)
}

/// Apply a patch to a section list and return the new list.
pub fn apply_patch(sections: &str, patch: &str) -> Result<String> {
    let mut sections: Vec<Section> = parse(sections)?;
    let patch: SectionPatch = parse(patch)?;
    patch.apply(&mut sections)?;
    Ok(serde_json::to_string(&sections)?)
}

/// Stateful drag/resize session; sections are passed in fresh on every call.
#[derive(Debug, Default)]
pub struct GestureSession {
    active: Option<Gesture>,
    config: EditorConfig,
}

impl GestureSession {
    pub fn new(config: &str) -> Result<Self> {
        Ok(Self { active: None, config: parse_config(config)? })
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start a gesture. A gesture still open is interrupted, since only one
    /// section can be moved at a time. If the new gesture cannot start, the
    /// open one is left running.
    pub fn begin(&mut self, sections: &str, section_id: &str, scope_parent_id: &str, canvas: Size) -> Result<Option<String>> {
        let parsed: Vec<Section> = parse(sections)?;
        let next = Gesture::begin(&parsed, section_id, scope_id(scope_parent_id), canvas)?;
        let interrupted = match self.active.replace(next) {
            Some(open) => Some(serde_json::to_string(&open.interrupt(&parsed))?),
            None => None,
        };
        Ok(interrupted)
    }

    pub fn update(&mut self, sections: &str, candidate: &str) -> Result<String> {
        let sections: Vec<Section> = parse(sections)?;
        let candidate: Rect = parse(candidate)?;
        let gesture = self.active.as_mut().ok_or(CoreError::GestureInactive)?;
        let frame = gesture.update(&sections, &candidate, &self.config);
        Ok(serde_json::to_string(&frame)?)
    }

    pub fn end(&mut self, sections: &str, proposal: &str) -> Result<String> {
        let sections: Vec<Section> = parse(sections)?;
        let proposal: Rect = parse(proposal)?;
        let gesture = self.active.take().ok_or(CoreError::GestureInactive)?;
        Ok(serde_json::to_string(&gesture.end(&sections, &proposal))?)
    }

    pub fn interrupt(&mut self, sections: &str) -> Result<Option<String>> {
        let sections: Vec<Section> = parse(sections)?;
        match self.active.take() {
            Some(gesture) => Ok(Some(serde_json::to_string(&gesture.interrupt(&sections))?)),
            None => Ok(None),
        }
    }
}

/// Viewport plus percentage control, as driven by the zoom toolbar.
#[derive(Debug, Default)]
pub struct ZoomState {
    pub viewport: Viewport,
    pub percent: PercentZoom,
    pub config: EditorConfig,
}

impl ZoomState {
    pub fn new(config: &str) -> Result<Self> {
        Ok(Self { config: parse_config(config)?, ..Default::default() })
    }

    pub fn snapshot(&self) -> ZoomOutput {
        ZoomOutput {
            scale: self.viewport.scale,
            percent: self.percent.percent,
            pan_x: self.viewport.pan_x,
            pan_y: self.viewport.pan_y,
            pending_scroll: self.viewport.pending_scroll(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Push the current percentage into the viewport, anchored at the cursor
    /// if one is known.
    fn apply_percent(&mut self, anchor: Option<Point>) -> ZoomOutput {
        self.viewport.apply_percent(&self.percent, anchor, &self.config.viewport);
        self.snapshot()
    }

    pub fn zoom_in(&mut self, anchor: Option<Point>) -> ZoomOutput {
        self.percent.zoom_in(&self.config.percent_zoom);
        self.apply_percent(anchor)
    }

    pub fn zoom_out(&mut self, anchor: Option<Point>) -> ZoomOutput {
        self.percent.zoom_out(&self.config.percent_zoom);
        self.apply_percent(anchor)
    }

    pub fn reset(&mut self, anchor: Option<Point>) -> ZoomOutput {
        self.percent.reset(&self.config.percent_zoom);
        self.apply_percent(anchor)
    }

    pub fn set_percent(&mut self, requested: f64, anchor: Option<Point>) -> ZoomOutput {
        self.percent.set(requested, &self.config.percent_zoom);
        self.apply_percent(anchor)
    }

    /// Cursor-anchored wheel zoom. `None` means the event was not for us,
    /// and then nothing changes, not even the mirrored `dom_scroll`.
    pub fn wheel(&mut self, input: &WheelInput, stage: &StageBox, dom_scroll: Point) -> Option<ZoomOutput> {
        input.anchor(stage)?;
        self.viewport.sync_scroll(dom_scroll.x, dom_scroll.y);
        self.viewport.handle_wheel(input, stage, &self.config.viewport)?;
        // Keep the toolbar readout in step with continuous zoom
        self.percent.percent = self.viewport.scale * 100.0;
        Some(self.snapshot())
    }

    /// Next-frame hook; returns the scroll offset to apply, if any.
    pub fn frame(&mut self) -> Option<Point> {
        self.viewport.apply_pending_scroll()
    }
}
