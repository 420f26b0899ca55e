// Drill-down scoping.
//
// Entering a container section shows only that container and its direct
// children, drawn relative to the container's top-left corner. Stored
// coordinates stay absolute; the translation exists only at view time.

use serde::Serialize;

use crate::geometry::{Rect, Size};
use crate::log;
use crate::section::{self, Section};

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeOffset {
    pub offset_x: f64,
    pub offset_y: f64,
}

/// The section being drilled into. `None` for root scope, and also when
/// `scope_parent_id` names no section.
pub fn scope_container<'a>(sections: &'a [Section], scope_parent_id: Option<&str>) -> Option<&'a Section> {
    let id = scope_parent_id?;
    let container = section::find(sections, id);
    if container.is_none() {
        log::debug!(scope = id, "scope id matches no section, using root scope");
    }
    container
}

pub fn scope_offset(container: Option<&Section>) -> ScopeOffset {
    match container {
        Some(c) => ScopeOffset { offset_x: c.x, offset_y: c.y },
        None => ScopeOffset::default(),
    }
}

/// The container plus its direct children when scoped, everything otherwise.
pub fn scoped_sections(sections: &[Section], scope_parent_id: Option<&str>) -> Vec<Section> {
    match scope_container(sections, scope_parent_id) {
        Some(container) => sections
            .iter()
            .filter(|s| s.id == container.id || s.is_child_of(Some(container.id.as_str())))
            .cloned()
            .collect(),
        None => sections.to_vec(),
    }
}

/// Translate scoped sections into the container's coordinate space.
pub fn display_sections(scoped: &[Section], container: Option<&Section>, offset: ScopeOffset) -> Vec<Section> {
    if container.is_none() {
        return scoped.to_vec();
    }
    scoped
        .iter()
        .map(|s| Section { x: s.x - offset.offset_x, y: s.y - offset.offset_y, ..s.clone() })
        .collect()
}

/// Size of the visible surface: the container's size when scoped.
pub fn view_size(canvas_width: f64, canvas_height: f64, container: Option<&Section>) -> Size {
    match container {
        Some(c) => Size { w: c.w, h: c.h },
        None => Size { w: canvas_width, h: canvas_height },
    }
}

/// Map a rectangle drawn in scope space back to absolute canvas space.
pub fn to_absolute(rect: &Rect, offset: ScopeOffset) -> Rect {
    rect.translate(offset.offset_x, offset.offset_y)
}

/// Map an absolute rectangle into scope space.
pub fn to_display(rect: &Rect, offset: ScopeOffset) -> Rect {
    rect.translate(-offset.offset_x, -offset.offset_y)
}

/// Everything the canvas needs to render one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedView {
    pub container_id: Option<String>,
    pub offset: ScopeOffset,
    pub sections: Vec<Section>,
    pub view_size: Size,
}

impl ScopedView {
    pub fn new(sections: &[Section], scope_parent_id: Option<&str>, canvas: Size) -> Self {
        let container = scope_container(sections, scope_parent_id);
        let offset = scope_offset(container);
        let scoped = scoped_sections(sections, scope_parent_id);
        Self {
            container_id: container.map(|c| c.id.clone()),
            offset,
            sections: display_sections(&scoped, container, offset),
            view_size: view_size(canvas.w, canvas.h, container),
        }
    }

    pub fn is_root(&self) -> bool {
        self.container_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Vec<Section> {
        vec![
            Section::new("header", 0.0, 0.0, 800.0, 60.0),
            Section::new("grid", 40.0, 100.0, 400.0, 300.0),
            Section::new("cell-a", 50.0, 110.0, 100.0, 80.0).with_parent("grid"),
            Section::new("cell-b", 200.0, 110.0, 100.0, 80.0).with_parent("grid"),
            Section::new("tab", 500.0, 100.0, 200.0, 200.0),
            Section::new("tab-body", 510.0, 120.0, 50.0, 50.0).with_parent("tab"),
        ]
    }

    #[test]
    fn test_root_scope_shows_everything_unchanged() {
        let sections = document();
        assert!(scope_container(&sections, None).is_none());
        assert_eq!(scope_offset(None), ScopeOffset::default());
        let scoped = scoped_sections(&sections, None);
        assert_eq!(display_sections(&scoped, None, ScopeOffset::default()), sections);
        assert_eq!(view_size(1200.0, 900.0, None), Size { w: 1200.0, h: 900.0 });
    }

    #[test]
    fn test_scoped_container_and_children() {
        let sections = document();
        let scoped = scoped_sections(&sections, Some("grid"));
        let ids: Vec<&str> = scoped.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["grid", "cell-a", "cell-b"]);
    }

    #[test]
    fn test_display_sections_rebase_to_container() {
        let sections = document();
        let view = ScopedView::new(&sections, Some("grid"), Size { w: 1200.0, h: 900.0 });

        assert_eq!(view.offset, ScopeOffset { offset_x: 40.0, offset_y: 100.0 });
        assert_eq!(view.view_size, Size { w: 400.0, h: 300.0 });

        let grid = &view.sections[0];
        assert_eq!((grid.x, grid.y), (0.0, 0.0));
        let cell = &view.sections[1];
        assert_eq!((cell.x, cell.y), (10.0, 10.0));
        // Sizes are untouched
        assert_eq!((cell.w, cell.h), (100.0, 80.0));
    }

    #[test]
    fn test_unknown_scope_falls_back_to_root() {
        let sections = document();
        let view = ScopedView::new(&sections, Some("missing"), Size { w: 1200.0, h: 900.0 });
        assert!(view.is_root());
        assert_eq!(view.sections, sections);
        assert_eq!(view.view_size, Size { w: 1200.0, h: 900.0 });
    }

    #[test]
    fn test_display_round_trip_restores_absolute() {
        let sections = document();
        let container = scope_container(&sections, Some("tab"));
        let offset = scope_offset(container);
        let scoped = scoped_sections(&sections, Some("tab"));
        let display = display_sections(&scoped, container, offset);

        for (shown, original) in display.iter().zip(&scoped) {
            let abs = to_absolute(&shown.rect(), offset);
            assert_eq!((abs.x, abs.y), (original.x, original.y));
            assert_eq!(to_display(&original.rect(), offset), shown.rect());
        }
    }
}
