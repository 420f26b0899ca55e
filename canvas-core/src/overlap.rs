// Overlap tracking for a single drag/resize gesture.
//
// Two paths over the same obstacle set:
// - live: actual intersection areas every pointer-move, for highlighting
// - commit: strict accept/reject at gesture end (no gap, no push-out), so a
//   dropped section either stays where it was released or snaps back

use serde::{Deserialize, Serialize};

use crate::geometry::{intersection_rect, intersects, Rect};
use crate::log;
use crate::section::Section;

/// Which sections count as obstacles for the moving one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "parentId")]
pub enum OverlapScope {
    /// Every other section in the document.
    #[default]
    All,
    /// Only sections sharing this parent (`None` = top level).
    Siblings(Option<String>),
}

impl OverlapScope {
    fn admits(&self, section: &Section) -> bool {
        match self {
            OverlapScope::All => true,
            OverlapScope::Siblings(parent) => section.is_child_of(parent.as_deref()),
        }
    }
}

/// Rectangles of every in-scope section except `self_id`. Locked sections
/// are included: they cannot be moved but still block placement.
pub fn obstacles_for(sections: &[Section], self_id: &str, scope: &OverlapScope) -> Vec<Rect> {
    sections
        .iter()
        .filter(|s| s.id != self_id && scope.admits(s))
        .map(Section::rect)
        .collect()
}

/// Transient highlight state for the active gesture.
#[derive(Debug, Clone, Default)]
pub struct OverlapTracker {
    overlay: Vec<Rect>,
}

impl OverlapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current highlight rectangles.
    pub fn overlay(&self) -> &[Rect] {
        &self.overlay
    }

    /// Recompute the areas where `candidate` overlaps other sections in
    /// scope. Replaces the overlay and returns it.
    pub fn report_live(
        &mut self,
        sections: &[Section],
        self_id: &str,
        candidate: &Rect,
        scope: &OverlapScope,
    ) -> &[Rect] {
        self.overlay = obstacles_for(sections, self_id, scope)
            .iter()
            .filter_map(|other| intersection_rect(candidate, other))
            .collect();
        &self.overlay
    }

    /// Decide the final rectangle at gesture end: `previous` if `proposed`
    /// overlaps anything in scope, otherwise `proposed` verbatim. The overlay
    /// is cleared either way.
    pub fn resolve_on_end(
        &mut self,
        sections: &[Section],
        self_id: &str,
        proposed: &Rect,
        previous: &Rect,
        scope: &OverlapScope,
    ) -> Rect {
        self.clear();
        let blocked = obstacles_for(sections, self_id, scope)
            .iter()
            .any(|other| intersects(proposed, other));
        if blocked {
            log::debug!(section = self_id, "drop overlaps a sibling, reverting");
            previous.clone()
        } else {
            proposed.clone()
        }
    }

    pub fn clear(&mut self) {
        self.overlay.clear();
    }
}
