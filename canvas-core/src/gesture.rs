// Drag/resize gesture session.
//
// begin  -> capture the section's rectangle before the gesture
// update -> once per pointer frame: live overlaps, guides, push-out preview
// end    -> commit once: keep the drop or snap back, always clear the overlay
//
// Pointer input and all feedback are in scope (display) space; the committed
// patch is in absolute canvas space.

use serde::Serialize;

use crate::collision::{resolve_with_report, Resolution};
use crate::config::EditorConfig;
use crate::error::{CoreError, Result};
use crate::geometry::{Rect, Size};
use crate::guides::{compute_guides, GuideLine};
use crate::overlap::{obstacles_for, OverlapScope, OverlapTracker};
use crate::scope::{scope_container, scope_offset, to_absolute, to_display, view_size, ScopeOffset};
use crate::section::{self, Section, SectionPatch};

/// Feedback for one pointer frame, in scope space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameFeedback {
    pub overlaps: Vec<Rect>,
    pub guides: Vec<GuideLine>,
    /// Where push-out would put the candidate.
    pub resolved: Resolution,
}

/// Outcome of a finished gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub patch: SectionPatch,
    /// The drop overlapped something and the section went back.
    pub reverted: bool,
}

#[derive(Debug, Clone)]
pub struct Gesture {
    section_id: String,
    previous: Rect,
    last_proposal: Option<Rect>,
    scope: OverlapScope,
    offset: ScopeOffset,
    view: Size,
    tracker: OverlapTracker,
}

impl Gesture {
    /// Start moving `section_id` while the canvas shows `scope_parent_id`.
    pub fn begin(
        sections: &[Section],
        section_id: &str,
        scope_parent_id: Option<&str>,
        canvas: Size,
    ) -> Result<Self> {
        let moving = section::find(sections, section_id)
            .ok_or_else(|| CoreError::UnknownSection(section_id.to_string()))?;
        if moving.lock {
            return Err(CoreError::SectionLocked(section_id.to_string()));
        }
        let container = scope_container(sections, scope_parent_id);
        Ok(Self {
            section_id: section_id.to_string(),
            previous: moving.rect(),
            last_proposal: None,
            scope: OverlapScope::Siblings(moving.parent_id.clone()),
            offset: scope_offset(container),
            view: view_size(canvas.w, canvas.h, container),
            tracker: OverlapTracker::new(),
        })
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// The rectangle captured at `begin`, in absolute space.
    pub fn previous(&self) -> &Rect {
        &self.previous
    }

    pub fn overlay(&self) -> &[Rect] {
        self.tracker.overlay()
    }

    pub fn update(&mut self, sections: &[Section], candidate: &Rect, cfg: &EditorConfig) -> FrameFeedback {
        let absolute = self.absolute(candidate);
        self.last_proposal = Some(absolute.clone());

        let overlaps = self
            .tracker
            .report_live(sections, &self.section_id, &absolute, &self.scope)
            .iter()
            .map(|r| to_display(r, self.offset))
            .collect();

        let others: Vec<Rect> = obstacles_for(sections, &self.section_id, &self.scope)
            .iter()
            .map(|r| to_display(r, self.offset))
            .collect();
        let display = to_display(&absolute, self.offset);
        let guides = compute_guides(&display, &others, self.view, &cfg.grid, cfg.snap_threshold, cfg.near_only);

        let mut resolved = resolve_with_report(&display, &others, cfg.max_iterations, cfg.gap);
        resolved.rect.id = Some(self.section_id.clone());

        FrameFeedback { overlaps, guides, resolved }
    }

    /// Finish with `proposal` (scope space). The patch carries the proposal
    /// if it overlaps nothing, the original rectangle otherwise.
    pub fn end(mut self, sections: &[Section], proposal: &Rect) -> Commit {
        let absolute = self.absolute(proposal);
        let accepted = self.tracker.resolve_on_end(
            sections,
            &self.section_id,
            &absolute,
            &self.previous,
            &self.scope,
        );
        let reverted = !accepted.same_geometry(&absolute);
        Commit { patch: SectionPatch::new(self.section_id, &accepted), reverted }
    }

    /// Gesture cut short (focus loss, pointer capture lost): end with the
    /// last proposal seen, or the original rectangle if there was none.
    pub fn interrupt(self, sections: &[Section]) -> Commit {
        match self.last_proposal.clone() {
            Some(last) => {
                let display = to_display(&last, self.offset);
                self.end(sections, &display)
            }
            None => Commit { patch: SectionPatch::new(self.section_id, &self.previous), reverted: false },
        }
    }

    fn absolute(&self, candidate: &Rect) -> Rect {
        let mut abs = to_absolute(candidate, self.offset);
        abs.id = Some(self.section_id.clone());
        abs
    }
}
