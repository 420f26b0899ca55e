//! Property-based invariant tests for the canvas geometry core.
//!
//! 1. With no obstacles push-out is the identity.
//! 2. A single obstacle is always cleared by at least the gap.
//! 3. A separated result is a fixed point of push-out.
//! 4. Highlight rectangles lie inside both inputs.
//! 5. A drop is kept iff it overlaps nothing in scope.
//! 6. Zoom keeps the canvas point under the cursor in place.
//! 7. Scale stays inside the configured bounds for any request.
//! 8. Scope transforms round-trip.

use canvas_core::geometry::{intersection_rect, intersects, intersects_with_gap, Point, Rect};
use canvas_core::overlap::{OverlapScope, OverlapTracker};
use canvas_core::scope::{to_absolute, to_display, ScopeOffset};
use canvas_core::section::Section;
use canvas_core::viewport::{Viewport, ViewportConfig};
use canvas_core::{resolve_with_report, Termination};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Integer-valued rectangles keep the arithmetic exact.
fn rect() -> impl Strategy<Value = Rect> {
    (-500i32..500, -500i32..500, 1i32..200, 1i32..200)
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
}

fn gap() -> impl Strategy<Value = f64> {
    (0i32..=8).prop_map(f64::from)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. No obstacles
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn no_obstacles_is_identity(moving in rect(), gap in gap()) {
        let res = resolve_with_report(&moving, &[], 128, gap);
        prop_assert_eq!(res.termination, Termination::Unchanged);
        prop_assert_eq!(res.iterations, 0);
        prop_assert_eq!(res.rect, moving);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Single obstacle
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_obstacle_is_cleared(moving in rect(), obstacle in rect(), gap in gap()) {
        let res = resolve_with_report(&moving, std::slice::from_ref(&obstacle), 128, gap);
        prop_assert!(res.iterations <= 1, "took {} iterations", res.iterations);
        prop_assert!(
            !intersects_with_gap(&res.rect, &obstacle, gap),
            "{:?} still within {} of {:?}", res.rect, gap, obstacle
        );
        // Push-out only translates
        prop_assert_eq!((res.rect.w, res.rect.h), (moving.w, moving.h));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Fixed point
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn separated_result_is_fixed_point(
        moving in rect(),
        obstacles in proptest::collection::vec(rect(), 0..6),
        gap in gap(),
    ) {
        let first = resolve_with_report(&moving, &obstacles, 128, gap);
        prop_assume!(matches!(first.termination, Termination::Unchanged | Termination::Separated));

        let second = resolve_with_report(&first.rect, &obstacles, 128, gap);
        prop_assert_eq!(second.termination, Termination::Unchanged);
        prop_assert_eq!(second.rect, first.rect);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Highlight containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersection_lies_inside_both(a in rect(), b in rect()) {
        match intersection_rect(&a, &b) {
            Some(i) => {
                prop_assert!(intersects(&a, &b));
                for r in [&a, &b] {
                    prop_assert!(i.x >= r.x && i.y >= r.y);
                    prop_assert!(i.right() <= r.right() && i.bottom() <= r.bottom());
                }
                prop_assert!(i.w > 0.0 && i.h > 0.0);
            }
            None => prop_assert!(!intersects(&a, &b)),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Commit strictness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drop_kept_iff_clear(
        others in proptest::collection::vec(rect(), 0..6),
        proposed in rect(),
    ) {
        let mut sections: Vec<Section> = others
            .iter()
            .enumerate()
            .map(|(i, r)| Section::new(format!("s{i}"), r.x, r.y, r.w, r.h))
            .collect();
        let previous = Rect::new(10_000.0, 10_000.0, proposed.w, proposed.h).with_id("moving");
        sections.push(Section::new("moving", previous.x, previous.y, previous.w, previous.h));

        let mut tracker = OverlapTracker::new();
        tracker.report_live(&sections, "moving", &proposed, &OverlapScope::All);
        let accepted = tracker.resolve_on_end(&sections, "moving", &proposed, &previous, &OverlapScope::All);

        let blocked = others.iter().any(|o| intersects(&proposed, o));
        let expected = if blocked { &previous } else { &proposed };
        prop_assert_eq!(&accepted, expected);
        prop_assert!(tracker.overlay().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Zoom anchoring
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zoom_keeps_cursor_point_fixed(
        start in 25i32..=200,
        target in 25i32..=200,
        pan in (0i32..2000, 0i32..2000),
        cursor in (0i32..800, 0i32..600),
    ) {
        let cfg = ViewportConfig::default();
        let mut vp = Viewport::new(f64::from(start) / 100.0);
        vp.sync_scroll(f64::from(pan.0), f64::from(pan.1));
        let anchor = Point { x: f64::from(cursor.0), y: f64::from(cursor.1) };
        let before = vp.screen_to_world(anchor);

        let change = vp.zoom_at(anchor, f64::from(target) / 100.0, &cfg);
        prop_assert!(close(change.anchor.x, before.x) && close(change.anchor.y, before.y));

        vp.apply_pending_scroll();
        let after = vp.screen_to_world(anchor);
        prop_assert!(close(after.x, before.x), "x drifted: {} -> {}", before.x, after.x);
        prop_assert!(close(after.y, before.y), "y drifted: {} -> {}", before.y, after.y);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Scale bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scale_stays_clamped(requests in proptest::collection::vec(-10.0f64..10.0, 1..20)) {
        let cfg = ViewportConfig::default();
        let mut vp = Viewport::default();
        for r in requests {
            vp.zoom_at(Point { x: 0.0, y: 0.0 }, r, &cfg);
            prop_assert!(vp.scale >= cfg.min_scale && vp.scale <= cfg.max_scale, "scale {}", vp.scale);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Scope round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scope_transforms_round_trip(r in rect(), ox in -1000i32..1000, oy in -1000i32..1000) {
        let offset = ScopeOffset { offset_x: f64::from(ox), offset_y: f64::from(oy) };
        prop_assert_eq!(to_absolute(&to_display(&r, offset), offset), r.clone());
        prop_assert_eq!(to_display(&to_absolute(&r, offset), offset), r);
    }
}
