// Section model: placed rectangles with identity, z-order, lock state and an
// optional parent used for drill-down scoping.
//
// The core never owns the section collection. Callers pass a snapshot in and
// receive `SectionPatch` proposals back, which they apply themselves.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub lock: bool,
}

impl Section {
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { id: id.into(), parent_id: None, x, y, w, h, z: 0, lock: false }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn locked(mut self) -> Self {
        self.lock = true;
        self
    }

    /// The section's geometry, tagged with its id.
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.w, h: self.h, id: Some(self.id.clone()) }
    }

    pub fn is_child_of(&self, parent: Option<&str>) -> bool {
        self.parent_id.as_deref() == parent
    }
}

pub fn find<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.id == id)
}

/// Sections in paint order: ascending `z`, ties kept in insertion order.
pub fn paint_order(sections: &[Section]) -> Vec<&Section> {
    let mut ordered: Vec<&Section> = sections.iter().collect();
    // sort_by_key is stable
    ordered.sort_by_key(|s| s.z);
    ordered
}

/// The section a click at `p` selects: the last one painted under the point.
pub fn topmost_at(sections: &[Section], p: Point) -> Option<&Section> {
    paint_order(sections)
        .into_iter()
        .rev()
        .find(|s| s.rect().contains_point(p))
}

/// A proposed geometry change for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPatch {
    pub id: String,
    pub rect: Rect,
}

impl SectionPatch {
    pub fn new(id: impl Into<String>, rect: &Rect) -> Self {
        let id = id.into();
        Self { rect: Rect { id: Some(id.clone()), ..rect.clone() }, id }
    }

    /// Write the patch into `sections`. Only geometry changes; identity,
    /// parent, z and lock are left alone.
    pub fn apply(&self, sections: &mut [Section]) -> Result<()> {
        let section = sections
            .iter_mut()
            .find(|s| s.id == self.id)
            .ok_or_else(|| CoreError::UnknownSection(self.id.clone()))?;
        section.x = self.rect.x;
        section.y = self.rect.y;
        section.w = self.rect.w.max(0.0);
        section.h = self.rect.h.max(0.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_order_is_stable() {
        let sections = vec![
            Section::new("a", 0.0, 0.0, 10.0, 10.0).with_z(2),
            Section::new("b", 0.0, 0.0, 10.0, 10.0).with_z(1),
            Section::new("c", 0.0, 0.0, 10.0, 10.0).with_z(2),
        ];
        let ids: Vec<&str> = paint_order(&sections).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_topmost_at_picks_last_painted() {
        let sections = vec![
            Section::new("low", 0.0, 0.0, 100.0, 100.0).with_z(5),
            Section::new("high", 10.0, 10.0, 20.0, 20.0).with_z(5),
            Section::new("under", 0.0, 0.0, 100.0, 100.0),
        ];
        let hit = topmost_at(&sections, Point { x: 15.0, y: 15.0 }).unwrap();
        assert_eq!(hit.id, "high");

        let hit = topmost_at(&sections, Point { x: 50.0, y: 50.0 }).unwrap();
        assert_eq!(hit.id, "low");

        assert!(topmost_at(&sections, Point { x: 500.0, y: 0.0 }).is_none());
    }

    #[test]
    fn test_patch_apply() {
        let mut sections = vec![Section::new("a", 0.0, 0.0, 10.0, 10.0).with_z(3).locked()];
        SectionPatch::new("a", &Rect::new(5.0, 6.0, 7.0, 8.0)).apply(&mut sections).unwrap();

        let a = &sections[0];
        assert_eq!((a.x, a.y, a.w, a.h), (5.0, 6.0, 7.0, 8.0));
        assert_eq!(a.z, 3);
        assert!(a.lock);

        let err = SectionPatch::new("missing", &Rect::default()).apply(&mut sections);
        assert!(matches!(err, Err(CoreError::UnknownSection(id)) if id == "missing"));
    }

    #[test]
    fn test_section_json_uses_camel_case() {
        let s: Section = serde_json::from_str(
            r#"{"id":"c1","parentId":"g1","x":1,"y":2,"w":3,"h":4}"#,
        )
        .unwrap();
        assert_eq!(s.parent_id.as_deref(), Some("g1"));
        assert_eq!(s.z, 0);
        assert!(!s.lock);
    }
}
