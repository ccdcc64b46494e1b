use serde::{Deserialize, Serialize};

use crate::error::{OperationError, Result};

/// Editing and snapping parameters for a floor plan.
///
/// Passed by reference into every command that needs it. Distances are in
/// centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// A new corner closer than this to an existing one merges into it.
    pub corner_snap_tolerance: f64,
    /// A corner closer than this to a wall's centerline lies on that wall.
    pub wall_snap_tolerance: f64,
    /// Grid used to hash wall endpoints into junctions.
    pub junction_tolerance: f64,
    /// Openings farther than this from every wall are rejected.
    pub opening_snap_threshold: f64,
    /// Along-wall clamp margin used when inserting a new opening.
    pub opening_insert_margin: f64,
    /// Extra margin added to an item's half width while it is dragged.
    pub drag_margin_padding: f64,
    pub default_wall_thickness: f64,
    pub default_wall_height: f64,
    /// Grid spacing applied to drawn corners, if any.
    pub grid_spacing: Option<f64>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            corner_snap_tolerance: 20.0,
            wall_snap_tolerance: 1.0,
            junction_tolerance: 1e-3,
            opening_snap_threshold: 300.0,
            opening_insert_margin: 60.0,
            drag_margin_padding: 5.0,
            default_wall_thickness: 10.0,
            default_wall_height: 250.0,
            grid_spacing: None,
        }
    }
}

impl PlanConfig {
    /// Checks that every distance is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("junction_tolerance", self.junction_tolerance),
            ("opening_snap_threshold", self.opening_snap_threshold),
            ("default_wall_thickness", self.default_wall_thickness),
            ("default_wall_height", self.default_wall_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(OperationError::InvalidInput(format!(
                    "{name} must be finite and > 0, got {value}"
                ))
                .into());
            }
        }

        let non_negative = [
            ("corner_snap_tolerance", self.corner_snap_tolerance),
            ("wall_snap_tolerance", self.wall_snap_tolerance),
            ("opening_insert_margin", self.opening_insert_margin),
            ("drag_margin_padding", self.drag_margin_padding),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(OperationError::InvalidInput(format!(
                    "{name} must be finite and >= 0, got {value}"
                ))
                .into());
            }
        }

        if let Some(spacing) = self.grid_spacing {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(OperationError::InvalidInput(format!(
                    "grid_spacing must be finite and > 0, got {spacing}"
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        PlanConfig::default().validate().unwrap();
    }

    #[test]
    fn snap_threshold_is_kept_as_configured() {
        let config = PlanConfig::default();
        assert!((config.opening_snap_threshold - 300.0).abs() < f64::EPSILON);
        assert!((config.opening_insert_margin - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_thickness() {
        let config = PlanConfig {
            default_wall_thickness: 0.0,
            ..PlanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_grid() {
        let config = PlanConfig {
            grid_spacing: Some(f64::NAN),
            ..PlanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: PlanConfig =
            serde_json::from_str(r#"{ "opening_snap_threshold": 150.0, "grid_spacing": 10.0 }"#)
                .unwrap();
        assert!((config.opening_snap_threshold - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.grid_spacing, Some(10.0));
        assert!((config.corner_snap_tolerance - 20.0).abs() < f64::EPSILON);
    }
}
