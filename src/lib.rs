//! curvecraft: freehand strokes → closed-form curve models.
//!
//! Fits a natural cubic spline through a smoothed, arc-length
//! parameterized stroke and, when the stroke closes on itself,
//! a truncated Fourier series of that spline.
//!
//! # Example
//!
//! ```
//! use curvecraft::{build_curve, CurveConfig, Harmonics};
//! use curvecraft::kurbo::Point;
//!
//! let stroke: Vec<Point> = (0..=40)
//!     .map(|i| {
//!         let a = i as f64 / 40.0 * std::f64::consts::TAU;
//!         Point::new(a.cos(), a.sin())
//!     })
//!     .collect();
//! let result = build_curve(&stroke, &CurveConfig::default())?;
//! assert!(result.is_closed());
//! let table = result.fourier_table(Harmonics::new(5)).unwrap();
//! assert_eq!(table.len(), 6);
//! # Ok::<(), curvecraft::CurveError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod param;

pub mod closure;
pub mod equations;
pub mod error;
pub mod eval;
pub mod fourier;
pub mod smooth;
pub mod spline;
pub mod stroke;

#[cfg(feature = "render")]
pub mod render;

// Re-export kurbo so downstream users get the same Point/BezPath
// version the models are built on.
pub use kurbo;

pub use config::{CurveConfig, SmoothingParams};
pub use error::CurveError;
pub use fourier::{FourierModel, HarmonicTerm, Harmonics, FOURIER_SAMPLES};
pub use param::{parameterize, ParameterizedCurve};
pub use spline::CubicSpline;
pub use stroke::StrokePipeline;

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Which model a host displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Parametric,
    Fourier,
}

/// One row of the parametric table: segment `index` over `[t0, t1]`.
///
/// Coefficients are `[cubic, quadratic, linear, constant]` in `t - t0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentCoefficients {
    pub index: usize,
    pub t0: f64,
    pub t1: f64,
    pub x: [f64; 4],
    pub y: [f64; 4],
}

/// Models fitted to one completed stroke. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveResult {
    curve: ParameterizedCurve,
    x_spline: CubicSpline,
    y_spline: CubicSpline,
    is_closed: bool,
    fourier: Option<FourierModel>,
}

impl CurveResult {
    /// The control points and their parameters.
    pub fn curve(&self) -> &ParameterizedCurve {
        &self.curve
    }

    pub fn x_spline(&self) -> &CubicSpline {
        &self.x_spline
    }

    pub fn y_spline(&self) -> &CubicSpline {
        &self.y_spline
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Present only for closed strokes.
    pub fn fourier(&self) -> Option<&FourierModel> {
        self.fourier.as_ref()
    }

    pub fn segment_count(&self) -> usize {
        self.x_spline.segment_count()
    }

    /// Per-segment polynomial coefficients for both axes.
    pub fn segment_coefficients(&self) -> Vec<SegmentCoefficients> {
        (0..self.segment_count())
            .map(|index| {
                let (t0, t1) = self.x_spline.segment_span(index);
                SegmentCoefficients {
                    index,
                    t0,
                    t1,
                    x: self.x_spline.segments()[index],
                    y: self.y_spline.segments()[index],
                }
            })
            .collect()
    }

    /// Fourier coefficients for `k = 0..=harmonics`, if the stroke is closed.
    pub fn fourier_table(&self, harmonics: Harmonics) -> Option<Vec<HarmonicTerm>> {
        self.fourier.as_ref().map(|f| f.coefficients(harmonics))
    }

    /// Mean squared gap between spline and series on the analysis grid.
    pub fn fourier_error(&self, harmonics: Harmonics) -> Option<f64> {
        self.fourier
            .as_ref()
            .map(|f| eval::truncation_error(f, &self.x_spline, &self.y_spline, harmonics))
    }

    /// The spline as cubic Bézier segments.
    pub fn to_bezpath(&self) -> BezPath {
        spline::to_bezpath(&self.x_spline, &self.y_spline)
    }

    /// Dense samples of the model shown in `mode`.
    ///
    /// Fourier mode on an open stroke samples the spline instead.
    pub fn sample(&self, mode: DisplayMode, harmonics: Harmonics, resolution: usize) -> Vec<Point> {
        match (mode, &self.fourier) {
            (DisplayMode::Fourier, Some(model)) => eval::sample_fourier(model, harmonics, resolution),
            _ => eval::sample_spline(&self.x_spline, &self.y_spline, resolution),
        }
    }
}

/// Full pipeline: raw stroke → curve models.
///
/// Pipeline: local polynomial smoothing with decimation, arc-length
/// parameterization, natural cubic splines per axis, closure test on the
/// raw endpoints, and a DFT of the spline when closed.
pub fn build_curve(points: &[Point], config: &CurveConfig) -> Result<CurveResult, CurveError> {
    if points.len() < config.min_stroke_points.max(2) {
        log::warn!(
            "stroke rejected: {} points, {} required",
            points.len(),
            config.min_stroke_points
        );
        return Err(CurveError::InsufficientPoints {
            found: points.len(),
            required: config.min_stroke_points.max(2),
        });
    }

    // ── Smooth ────────────────────────────────────────────
    let smoothed = smooth::smooth(points, &config.smoothing);
    let control = drop_repeats(&smoothed);
    log::debug!(
        "smooth: {} raw \u{2192} {} control points",
        points.len(),
        control.len()
    );

    // ── Parameterize & fit ────────────────────────────────
    let curve = parameterize(&control).without_ties();
    let (x_spline, y_spline) = spline::fit_axes(&curve)?;

    // ── Closure ───────────────────────────────────────────
    let (first, last) = (points[0], points[points.len() - 1]);
    let is_closed = closure::is_closed_within(
        first,
        last,
        config.x_range,
        config.y_range,
        config.closure_tolerance,
    );

    // ── Fourier ───────────────────────────────────────────
    let fourier = is_closed.then(|| FourierModel::analyze(&x_spline, &y_spline));
    log::debug!(
        "fit: {} segments, {}",
        x_spline.segment_count(),
        if is_closed { "closed, Fourier available" } else { "open" }
    );

    Ok(CurveResult {
        curve,
        x_spline,
        y_spline,
        is_closed,
        fourier,
    })
}

/// Drop consecutive duplicates so knots stay strictly increasing.
///
/// A stroke whose points all coincide is kept whole: its uniform
/// parameterization is already strictly increasing. A lone survivor
/// is doubled so the spline still has two knots.
fn drop_repeats(points: &[Point]) -> Vec<Point> {
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if kept.last() != Some(&p) {
            kept.push(p);
        }
    }
    match kept.len() {
        1 if points.len() > 1 => points.to_vec(),
        1 => vec![kept[0], kept[0]],
        _ => kept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn circle(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let a = i as f64 / (n - 1) as f64 * std::f64::consts::TAU;
                Point::new(a.cos(), a.sin())
            })
            .collect()
    }

    #[test]
    fn closed_stroke_gets_fourier_model() {
        let result = build_curve(&circle(30), &CurveConfig::default()).unwrap();
        assert!(result.is_closed());
        assert!(result.fourier().is_some());
        assert_eq!(result.segment_count(), result.curve().len() - 1);
    }

    #[test]
    fn open_stroke_has_no_fourier_model() {
        let arc: Vec<Point> = circle(30).into_iter().take(15).collect();
        let result = build_curve(&arc, &CurveConfig::default()).unwrap();
        assert!(!result.is_closed());
        assert!(result.fourier().is_none());
        assert!(result.fourier_table(Harmonics::DEFAULT).is_none());
        assert!(result.fourier_error(Harmonics::DEFAULT).is_none());
        // Fourier mode falls back to the spline.
        let a = result.sample(DisplayMode::Fourier, Harmonics::DEFAULT, 50);
        let b = result.sample(DisplayMode::Parametric, Harmonics::DEFAULT, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn short_stroke_is_rejected() {
        let err = build_curve(&circle(30)[..3], &CurveConfig::default()).unwrap_err();
        assert_eq!(err, CurveError::InsufficientPoints { found: 3, required: 5 });
    }

    #[test]
    fn repeated_points_do_not_break_the_spline() {
        let mut pts = circle(6);
        pts.insert(3, pts[3]);
        pts.insert(3, pts[3]);
        let result = build_curve(&pts, &CurveConfig::default()).unwrap();
        assert_eq!(result.curve().len(), 6);
        assert!(result.curve().t.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn coincident_stroke_builds_constant_curve() {
        let pts = vec![Point::new(0.2, 0.4); 12];
        let result = build_curve(&pts, &CurveConfig::default()).unwrap();
        assert!(result.is_closed());
        for p in result.sample(DisplayMode::Fourier, Harmonics::DEFAULT, 20) {
            assert_abs_diff_eq!(p.x, 0.2, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, 0.4, epsilon = 1e-9);
        }
    }

    #[test]
    fn segment_table_matches_splines() {
        let result = build_curve(&circle(30), &CurveConfig::default()).unwrap();
        let table = result.segment_coefficients();
        assert_eq!(table.len(), result.segment_count());
        assert_eq!(table[0].t0, 0.0);
        assert_eq!(table.last().unwrap().t1, 1.0);
        assert_eq!(table[2].x, result.x_spline().segments()[2]);
        assert_eq!(result.to_bezpath().segments().count(), table.len());
    }
}
