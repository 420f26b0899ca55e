//! Output types for the editor frontend.
//!
//! These structs are serialized to JSON and handed to the React canvas,
//! which only ever draws what it receives here.

use serde::Serialize;

use crate::error::CoreError;
use crate::geometry::{Point, Rect};
use crate::guides::GuideLine;

/// Error payload returned instead of a result.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Short machine-readable kind: "config", "json", "section", "gesture"
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
    pub error: ErrorInfo,
}

impl From<&CoreError> for ErrorOutput {
    fn from(e: &CoreError) -> Self {
        let kind = match e {
            CoreError::InvalidConfig { .. } => "config",
            CoreError::Json(_) => "json",
            CoreError::UnknownSection(_) | CoreError::SectionLocked(_) => "section",
            CoreError::GestureInactive => "gesture",
        };
        ErrorOutput { error: ErrorInfo { kind, message: e.to_string() } }
    }
}

/// Serialize an error payload. Falls back to a fixed string if even that
/// fails so the frontend always gets JSON.
pub fn error_json(e: &CoreError) -> String {
    serde_json::to_string(&ErrorOutput::from(e))
        .unwrap_or_else(|_| "{\"error\":{\"kind\":\"json\",\"message\":\"unserializable error\"}}".to_string())
}

/// Highlight and guide overlay for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overlaps: Vec<Rect>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guides: Vec<GuideLine>,
}

/// Viewport state after a zoom or frame tick.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomOutput {
    pub scale: f64,
    pub percent: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    /// Scroll offset still waiting for the next frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_scroll: Option<Point>,
}
