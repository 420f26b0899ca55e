//! Geometry and interaction core for the section canvas editor.
//!
//! The React canvas owns rendering and the section store; this crate owns
//! every decision about where a rectangle may go: push-out collision, live
//! overlap highlighting, alignment guides, cursor-anchored zoom and the
//! drill-down coordinate transforms for nested sections.

pub mod bridge;
pub mod collision;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod guides;
pub mod log;
pub mod output;
pub mod overlap;
pub mod scope;
pub mod section;
pub mod viewport;
mod wasm;

pub use collision::{resolve, resolve_with_report, Resolution, Termination};
pub use config::EditorConfig;
pub use error::{CoreError, Result};
pub use geometry::{intersection_rect, intersects, intersects_with_gap, Point, Rect, Size};
pub use gesture::{Commit, FrameFeedback, Gesture};
pub use guides::{compute_guides, GridLines, GuideLine, Orientation};
pub use overlap::{OverlapScope, OverlapTracker};
pub use scope::{ScopeOffset, ScopedView};
pub use section::{Section, SectionPatch};
pub use viewport::{PercentZoom, Viewport, WheelInput, ZoomChange};
