use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::fourier::Harmonics;

/// All pipeline parameters in one struct.
/// Serializable (for TOML presets) and adjustable at runtime
/// by the host between strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    // -- Drawing surface --
    /// Half-extent of the drawing surface along x. The surface spans
    /// `[-x_range, x_range]`. Only used for closure thresholds,
    /// point spacing, and preview framing.
    pub x_range: f64,
    /// Half-extent of the drawing surface along y.
    pub y_range: f64,

    // -- Stroke acceptance --
    /// Strokes with fewer raw points than this are rejected.
    pub min_stroke_points: usize,
    /// Minimum distance between accepted stroke points, as a fraction of
    /// `min(x_range, y_range)`. 0 = keep every point.
    pub min_point_spacing: f64,

    // -- Closure detection --
    /// Endpoint gap per axis, as a fraction of that axis' range,
    /// below which a stroke counts as closed.
    pub closure_tolerance: f64,

    // -- Fourier view --
    /// Initial harmonic count for reconstruction (clamped to [3, 50]).
    pub harmonics: u32,

    // -- Smoothing stage --
    pub smoothing: SmoothingParams,
}

/// Parameters for the local polynomial smoothing pass and decimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Strokes shorter than this pass through untouched.
    pub min_points: usize,
    /// Upper bound on the (odd) sliding window length.
    pub max_window: usize,
    /// Degree of the local least-squares polynomial.
    pub poly_order: usize,
    /// Decimation target. The stride is `len / target_points`.
    pub target_points: usize,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            min_points: 10,
            max_window: 11,
            poly_order: 3,
            target_points: 25,
        }
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            x_range: 1.2,
            y_range: 1.2,
            min_stroke_points: 5,
            min_point_spacing: 0.0,
            closure_tolerance: 0.1,
            harmonics: Harmonics::DEFAULT.get(),
            smoothing: SmoothingParams::default(),
        }
    }
}

impl CurveConfig {
    /// Config for a drawing surface spanning `±x_range` by `±y_range`.
    pub fn with_ranges(x_range: f64, y_range: f64) -> Result<Self, CurveError> {
        let config = Self {
            x_range,
            y_range,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, CurveError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CurveError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| CurveError::ConfigLoad(e.to_string()))?;
        config.validate()?;
        log::debug!("config loaded from {}", path.display());
        Ok(config)
    }

    /// Reject ranges the closure detector cannot scale against.
    pub fn validate(&self) -> Result<(), CurveError> {
        let ok = |r: f64| r.is_finite() && r > 0.0;
        if ok(self.x_range) && ok(self.y_range) {
            Ok(())
        } else {
            Err(CurveError::InvalidRange {
                x_range: self.x_range,
                y_range: self.y_range,
            })
        }
    }

    /// Absolute minimum spacing between accepted stroke points.
    pub fn point_spacing(&self) -> f64 {
        self.min_point_spacing * self.x_range.min(self.y_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_drawing_surface() {
        let config = CurveConfig::default();
        assert_eq!(config.x_range, 1.2);
        assert_eq!(config.harmonics, 15);
        assert_eq!(config.smoothing.max_window, 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_ranges_are_rejected() {
        assert!(matches!(
            CurveConfig::with_ranges(0.0, 1.0),
            Err(CurveError::InvalidRange { .. })
        ));
        assert!(CurveConfig::with_ranges(1.0, f64::NAN).is_err());
        assert!(CurveConfig::with_ranges(2.0, 3.0).is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: CurveConfig = toml::from_str(
            "x_range = 5.0\n[smoothing]\ntarget_points = 40\n",
        )
        .unwrap();
        assert_eq!(config.x_range, 5.0);
        assert_eq!(config.y_range, 1.2);
        assert_eq!(config.smoothing.target_points, 40);
        assert_eq!(config.smoothing.poly_order, 3);
    }

    #[test]
    fn load_reads_file_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.toml");
        std::fs::write(&path, "x_range = 2.0\ny_range = 3.0\n").unwrap();
        let config = CurveConfig::load(&path).unwrap();
        assert_eq!(config.y_range, 3.0);

        std::fs::write(&path, "x_range = -1.0\n").unwrap();
        assert!(matches!(
            CurveConfig::load(&path),
            Err(CurveError::InvalidRange { .. })
        ));
        assert!(matches!(
            CurveConfig::load(&dir.path().join("missing.toml")),
            Err(CurveError::ConfigLoad(_))
        ));
    }
}
