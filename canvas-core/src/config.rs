// Editor configuration knobs, supplied by the host page as JSON.

use serde::{Deserialize, Serialize};

use crate::collision::DEFAULT_MAX_ITERATIONS;
use crate::error::{CoreError, Result};
use crate::guides::GridLines;
use crate::log;
use crate::viewport::{PercentZoomConfig, ViewportConfig, WheelMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Minimum clearance between two sections.
    pub gap: f64,
    /// Distance within which a guide is shown.
    pub snap_threshold: f64,
    /// Only show guides within `snap_threshold`.
    pub near_only: bool,
    /// Push-out iteration budget.
    pub max_iterations: usize,
    pub grid: GridLines,
    pub viewport: ViewportConfig,
    pub percent_zoom: PercentZoomConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            gap: 1.0,
            snap_threshold: 5.0,
            near_only: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            grid: GridLines::default(),
            viewport: ViewportConfig::default(),
            percent_zoom: PercentZoomConfig::default(),
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::invalid(field, format!("must be a finite number >= 0, got {value}")));
    }
    Ok(())
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: EditorConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let checked = self.check();
        if let Err(_e) = &checked {
            log::warn!(error = %_e, "rejected editor config");
        }
        checked
    }

    fn check(&self) -> Result<()> {
        non_negative("gap", self.gap)?;
        non_negative("snapThreshold", self.snap_threshold)?;
        if self.max_iterations == 0 {
            return Err(CoreError::invalid("maxIterations", "must be at least 1"));
        }

        let vp = &self.viewport;
        if !(vp.min_scale.is_finite() && vp.min_scale > 0.0) {
            return Err(CoreError::invalid("viewport.minScale", "must be > 0"));
        }
        if !vp.max_scale.is_finite() || vp.min_scale > vp.max_scale {
            return Err(CoreError::invalid("viewport.maxScale", "must be >= minScale"));
        }
        match vp.wheel {
            WheelMode::Continuous { sensitivity } if !(sensitivity.is_finite() && sensitivity > 0.0) => {
                return Err(CoreError::invalid("viewport.wheel.sensitivity", "must be > 0"));
            }
            WheelMode::Notched { factor } if !(factor.is_finite() && factor > 1.0) => {
                return Err(CoreError::invalid("viewport.wheel.factor", "must be > 1"));
            }
            _ => {}
        }

        let pz = &self.percent_zoom;
        if !(pz.min.is_finite() && pz.min > 0.0) {
            return Err(CoreError::invalid("percentZoom.min", "must be > 0"));
        }
        if !pz.max.is_finite() || pz.min > pz.max {
            return Err(CoreError::invalid("percentZoom.max", "must be >= min"));
        }
        non_negative("percentZoom.step", pz.step)?;
        Ok(())
    }
}
