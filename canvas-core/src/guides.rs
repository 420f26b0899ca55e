// Alignment guides for a moving rectangle.
//
// Candidates per axis:
// - canvas start, end and center
// - column (x) or row (y) grid lines
// - every other rectangle's near edge, far edge and center
//
// Each of the moving rectangle's three edges per axis is matched against its
// nearest candidate. Cost is edges x candidates per frame, so nothing is cached.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Marks an x position, drawn top to bottom.
    #[serde(rename = "v")]
    Vertical,
    /// Marks a y position, drawn left to right.
    #[serde(rename = "h")]
    Horizontal,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub orientation: Orientation,
    pub pos: f64,
    pub from: f64,
    pub to: f64,
}

/// Grid lines contributed as extra candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLines {
    #[serde(default)]
    pub columns: Vec<f64>,
    #[serde(default)]
    pub rows: Vec<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SnapMatch {
    pub candidate: f64,
    pub distance: f64,
}

/// Nearest candidate to `value`. Ties go to the earliest candidate.
pub fn nearest_candidate(value: f64, candidates: &[f64]) -> Option<SnapMatch> {
    let mut best: Option<SnapMatch> = None;
    for &candidate in candidates {
        let distance = (value - candidate).abs();
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(SnapMatch { candidate, distance });
        }
    }
    best
}

/// Left edges of `columns` equal-width columns separated by `gutter`, plus
/// the right edge of each column.
pub fn column_lines(canvas_width: f64, columns: usize, gutter: f64) -> Vec<f64> {
    if columns == 0 || canvas_width <= 0.0 {
        return Vec::new();
    }
    let gutter = gutter.max(0.0);
    let col_w = ((canvas_width - gutter * (columns - 1) as f64) / columns as f64).max(0.0);
    let mut lines = Vec::with_capacity(columns * 2);
    for i in 0..columns {
        let left = i as f64 * (col_w + gutter);
        lines.push(left);
        lines.push(left + col_w);
    }
    lines
}

fn x_candidates(others: &[Rect], canvas: Size, grid: &GridLines) -> Vec<f64> {
    let mut xs = vec![0.0, canvas.w, canvas.w / 2.0];
    xs.extend_from_slice(&grid.columns);
    for r in others {
        xs.extend([r.x, r.right(), r.center_x()]);
    }
    xs
}

fn y_candidates(others: &[Rect], canvas: Size, grid: &GridLines) -> Vec<f64> {
    let mut ys = vec![0.0, canvas.h, canvas.h / 2.0];
    ys.extend_from_slice(&grid.rows);
    for r in others {
        ys.extend([r.y, r.bottom(), r.center_y()]);
    }
    ys
}

/// Per-edge nearest matches, x edges first then y edges.
fn edge_matches(
    moving: &Rect,
    others: &[Rect],
    canvas: Size,
    grid: &GridLines,
) -> Vec<(Orientation, f64, SnapMatch)> {
    let xs = x_candidates(others, canvas, grid);
    let ys = y_candidates(others, canvas, grid);

    let mut out = Vec::with_capacity(6);
    for edge in [moving.x, moving.right(), moving.center_x()] {
        if let Some(m) = nearest_candidate(edge, &xs) {
            out.push((Orientation::Vertical, edge, m));
        }
    }
    for edge in [moving.y, moving.bottom(), moving.center_y()] {
        if let Some(m) = nearest_candidate(edge, &ys) {
            out.push((Orientation::Horizontal, edge, m));
        }
    }
    out
}

/// Guides for the current frame.
///
/// With `near_only` a guide is emitted only when the nearest candidate is
/// within `threshold`; otherwise every edge emits its nearest candidate.
/// Guides at the same rounded position collapse into one. Vertical guides
/// span the canvas height, horizontal ones the canvas width.
pub fn compute_guides(
    moving: &Rect,
    others: &[Rect],
    canvas: Size,
    grid: &GridLines,
    threshold: f64,
    near_only: bool,
) -> Vec<GuideLine> {
    let mut seen: Vec<(Orientation, i64)> = Vec::new();
    let mut guides = Vec::new();

    for (orientation, _, m) in edge_matches(moving, others, canvas, grid) {
        if near_only && m.distance > threshold {
            continue;
        }
        let key = (orientation, m.candidate.round() as i64);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let to = match orientation {
            Orientation::Vertical => canvas.h,
            Orientation::Horizontal => canvas.w,
        };
        guides.push(GuideLine { orientation, pos: m.candidate, from: 0.0, to });
    }
    guides
}

/// The `(dx, dy)` that lands the moving rectangle exactly on its closest
/// in-threshold candidate per axis. Zero on an axis with nothing in range.
pub fn snap_offset(
    moving: &Rect,
    others: &[Rect],
    canvas: Size,
    grid: &GridLines,
    threshold: f64,
) -> (f64, f64) {
    let mut best_x: Option<(f64, f64)> = None;
    let mut best_y: Option<(f64, f64)> = None;

    for (orientation, edge, m) in edge_matches(moving, others, canvas, grid) {
        if m.distance > threshold {
            continue;
        }
        let slot = match orientation {
            Orientation::Vertical => &mut best_x,
            Orientation::Horizontal => &mut best_y,
        };
        if slot.map_or(true, |(d, _)| m.distance < d) {
            *slot = Some((m.distance, m.candidate - edge));
        }
    }
    (best_x.map_or(0.0, |(_, d)| d), best_y.map_or(0.0, |(_, d)| d))
}
