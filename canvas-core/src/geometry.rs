// Rectangle primitives shared by every other module.
//
// All coordinates are canvas space (never screen space). Rectangles are
// axis-aligned with non-negative width and height.

use serde::{Deserialize, Serialize};

/// Tolerance used by the gap-aware separation test.
pub const EPSILON: f64 = 1e-3;

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

/// An axis-aligned rectangle. `id` is opaque and only used to exclude or
/// look up the rectangle, never compared numerically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h, id: None }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn right(&self) -> f64 { self.x + self.w }
    pub fn bottom(&self) -> f64 { self.y + self.h }
    pub fn center_x(&self) -> f64 { self.x + self.w / 2.0 }
    pub fn center_y(&self) -> f64 { self.y + self.h / 2.0 }

    pub fn center(&self) -> Point {
        Point { x: self.center_x(), y: self.center_y() }
    }

    pub fn size(&self) -> Size {
        Size { w: self.w, h: self.h }
    }

    /// Zero-area rectangles never act as obstacles.
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..self.clone() }
    }

    /// Geometry equality, ignoring `id`.
    pub fn same_geometry(&self, other: &Rect) -> bool {
        self.x == other.x && self.y == other.y && self.w == other.w && self.h == other.h
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// True iff the open rectangles overlap. Edge contact does not count.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Treats any separation smaller than `gap` as a collision.
///
/// The pair is separated iff at least one of the four axis gaps is `>= gap`
/// (within [`EPSILON`]).
pub fn intersects_with_gap(a: &Rect, b: &Rect, gap: f64) -> bool {
    let threshold = gap - EPSILON;
    let separated = b.x - a.right() >= threshold
        || a.x - b.right() >= threshold
        || b.y - a.bottom() >= threshold
        || a.y - b.bottom() >= threshold;
    !separated
}

/// The exact overlapping area of `a` and `b`, for highlighting.
///
/// Returns `None` when the rectangles do not overlap; zero-area contact does
/// not count. The result carries `b`'s id so highlights can be keyed to the
/// rectangle being overlapped.
pub fn intersection_rect(a: &Rect, b: &Rect) -> Option<Rect> {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = a.right().min(b.right());
    let y1 = a.bottom().min(b.bottom());
    if x1 - x0 <= 0.0 || y1 - y0 <= 0.0 {
        return None;
    }
    Some(Rect { x: x0, y: y0, w: x1 - x0, h: y1 - y0, id: b.id.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_open_rectangles() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(intersects(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges do not overlap
        assert!(!intersects(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!intersects(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!intersects(&a, &Rect::new(30.0, 30.0, 5.0, 5.0)));
    }

    #[test]
    fn test_intersects_with_gap_boundary() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);

        // Exactly `gap` apart is separated
        assert!(!intersects_with_gap(&a, &Rect::new(11.0, 0.0, 10.0, 10.0), 1.0));
        // Inside the epsilon band still counts as separated
        assert!(!intersects_with_gap(&a, &Rect::new(10.9995, 0.0, 10.0, 10.0), 1.0));
        // Beyond the epsilon band is a collision
        assert!(intersects_with_gap(&a, &Rect::new(10.99, 0.0, 10.0, 10.0), 1.0));
        // Touching collides once a gap is required
        assert!(intersects_with_gap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0), 1.0));
    }

    #[test]
    fn test_intersects_with_zero_gap_allows_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects_with_gap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0), 0.0));
        assert!(intersects_with_gap(&a, &Rect::new(9.0, 0.0, 10.0, 10.0), 0.0));
    }

    #[test]
    fn test_intersection_rect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 6.0, 10.0, 10.0).with_id("b");

        let hit = intersection_rect(&a, &b).unwrap();
        assert_eq!(hit, Rect::new(5.0, 6.0, 5.0, 4.0).with_id("b"));

        assert!(intersection_rect(&a, &Rect::new(10.0, 0.0, 5.0, 5.0)).is_none());
        assert!(intersection_rect(&a, &Rect::new(20.0, 20.0, 5.0, 5.0)).is_none());
    }

    #[test]
    fn test_contains_point_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Point { x: 0.0, y: 0.0 }));
        assert!(r.contains_point(Point { x: 9.9, y: 5.0 }));
        assert!(!r.contains_point(Point { x: 10.0, y: 5.0 }));
    }

    #[test]
    fn test_center_and_size() {
        let r = Rect::new(10.0, 20.0, 30.0, 8.0);
        assert_eq!(r.center(), Point { x: 25.0, y: 24.0 });
        assert_eq!(r.size(), Size { w: 30.0, h: 8.0 });
        assert_eq!(r.translate(-10.0, 5.0), Rect::new(0.0, 25.0, 30.0, 8.0));
    }
}
