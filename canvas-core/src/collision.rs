// Collision push-out for a rectangle being dragged or resized.
//
// Greedy and local: each iteration takes the first obstacle still inside the
// gap and moves the rectangle along a single axis by the smallest distance
// that clears that obstacle. When escaping one obstacle pushes into another
// the loop may end on `BudgetExhausted` with the rectangle still colliding.
// That is a known limitation; the partial result is returned as-is.

use serde::Serialize;

use crate::geometry::{intersects_with_gap, Rect};
use crate::log;

pub const DEFAULT_MAX_ITERATIONS: usize = 128;

/// Why the push-out loop stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Nothing collided; the input came back untouched.
    Unchanged,
    /// Every obstacle is cleared by at least the gap.
    Separated,
    /// An iteration produced no movement.
    Stalled,
    /// Ran out of iterations while something still collided.
    BudgetExhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub rect: Rect,
    pub termination: Termination,
    pub iterations: usize,
}

/// Escape directions, in tie-break order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Push {
    Left,
    Right,
    Up,
    Down,
}

/// Distance along each direction that leaves exactly `gap` between the two.
fn escape_distances(moving: &Rect, obstacle: &Rect, gap: f64) -> [(Push, f64); 4] {
    [
        (Push::Left, moving.right() + gap - obstacle.x),
        (Push::Right, obstacle.right() + gap - moving.x),
        (Push::Up, moving.bottom() + gap - obstacle.y),
        (Push::Down, obstacle.bottom() + gap - moving.y),
    ]
}

/// Smallest positive escape. Earlier directions win ties.
fn min_displacement(moving: &Rect, obstacle: &Rect, gap: f64) -> Option<(f64, f64)> {
    let mut best: Option<(Push, f64)> = None;
    for (dir, dist) in escape_distances(moving, obstacle, gap) {
        if !(dist > 0.0) {
            continue;
        }
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((dir, dist));
        }
    }
    best.map(|(dir, dist)| match dir {
        Push::Left => (-dist, 0.0),
        Push::Right => (dist, 0.0),
        Push::Up => (0.0, -dist),
        Push::Down => (0.0, dist),
    })
}

fn is_self(moving: &Rect, obstacle: &Rect) -> bool {
    moving.id.is_some() && moving.id == obstacle.id
}

/// Push `moving` out of `obstacles` and report how the loop ended.
///
/// Zero-area obstacles are skipped, as is any obstacle carrying the moving
/// rectangle's own id. A zero-area `moving` rectangle is returned unchanged.
pub fn resolve_with_report(
    moving: &Rect,
    obstacles: &[Rect],
    max_iterations: usize,
    gap: f64,
) -> Resolution {
    let gap = gap.max(0.0);
    let mut rect = moving.clone();

    let first_hit = |r: &Rect| {
        obstacles
            .iter()
            .filter(|o| !o.is_empty() && !is_self(moving, o))
            .find(|o| intersects_with_gap(r, o, gap))
            .cloned()
    };

    if moving.is_empty() || first_hit(&rect).is_none() {
        return Resolution { rect, termination: Termination::Unchanged, iterations: 0 };
    }

    let mut iterations = 0;
    while iterations < max_iterations {
        let Some(obstacle) = first_hit(&rect) else {
            return Resolution { rect, termination: Termination::Separated, iterations };
        };
        iterations += 1;

        let Some((dx, dy)) = min_displacement(&rect, &obstacle, gap) else {
            break;
        };
        let next = rect.translate(dx, dy);
        if next.same_geometry(&rect) {
            break;
        }
        rect = next;
    }

    let termination = if first_hit(&rect).is_none() {
        Termination::Separated
    } else if iterations >= max_iterations {
        log::warn!(iterations, "collision push-out ran out of iterations");
        Termination::BudgetExhausted
    } else {
        log::warn!(iterations, "collision push-out stalled");
        Termination::Stalled
    };
    Resolution { rect, termination, iterations }
}

/// Push `moving` out of `obstacles`, returning only the rectangle.
pub fn resolve(moving: &Rect, obstacles: &[Rect], max_iterations: usize, gap: f64) -> Rect {
    resolve_with_report(moving, obstacles, max_iterations, gap).rect
}
