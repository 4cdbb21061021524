//! Stateful stroke capture for interactive hosts.
//!
//! A [`StrokePipeline`] owns at most one in-progress stroke and one
//! published [`CurveResult`]. Results are handed out as `Arc` snapshots
//! and replaced whole, never edited in place.

use std::sync::Arc;

use kurbo::Point;

use crate::config::CurveConfig;
use crate::error::CurveError;
use crate::fourier::Harmonics;
use crate::{build_curve, CurveResult};

/// Pointer-event driven front end to [`build_curve`].
#[derive(Debug, Clone)]
pub struct StrokePipeline {
    config: CurveConfig,
    harmonics: Harmonics,
    stroke: Option<Vec<Point>>,
    current: Option<Arc<CurveResult>>,
}

impl Default for StrokePipeline {
    fn default() -> Self {
        Self::new(CurveConfig::default())
    }
}

impl StrokePipeline {
    pub fn new(config: CurveConfig) -> Self {
        let harmonics = Harmonics::from(config.harmonics);
        Self {
            config,
            harmonics,
            stroke: None,
            current: None,
        }
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Start a fresh stroke, discarding any unfinished one.
    pub fn begin_stroke(&mut self) {
        if let Some(old) = self.stroke.replace(Vec::new()) {
            if !old.is_empty() {
                log::debug!("discarding unfinished stroke of {} points", old.len());
            }
        }
    }

    /// Append a point to the active stroke. Ignored when no stroke is active
    /// or when closer than the configured spacing to the previous point.
    pub fn append_point(&mut self, x: f64, y: f64) {
        let spacing = self.config.point_spacing();
        let Some(stroke) = self.stroke.as_mut() else {
            return;
        };
        let p = Point::new(x, y);
        if let Some(last) = stroke.last() {
            if spacing > 0.0 && last.distance(p) <= spacing {
                return;
            }
        }
        stroke.push(p);
    }

    /// Whether a stroke is being accumulated.
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Points of the active stroke so far.
    pub fn stroke_points(&self) -> &[Point] {
        self.stroke.as_deref().unwrap_or(&[])
    }

    /// Finish the active stroke and fit it.
    ///
    /// The stroke is consumed either way. On failure the previously
    /// published result stays current.
    pub fn end_stroke(&mut self) -> Result<Arc<CurveResult>, CurveError> {
        let points = self.stroke.take().unwrap_or_default();
        let result = Arc::new(build_curve(&points, &self.config)?);
        self.current = Some(Arc::clone(&result));
        Ok(result)
    }

    /// Set the reconstruction order, clamped to [3, 50]. Returns the stored value.
    pub fn set_harmonics(&mut self, count: i64) -> Harmonics {
        self.harmonics = Harmonics::new(count);
        self.harmonics
    }

    pub fn harmonics(&self) -> Harmonics {
        self.harmonics
    }

    /// The most recently published result.
    pub fn current(&self) -> Option<Arc<CurveResult>> {
        self.current.clone()
    }

    /// Drop both the active stroke and the published result.
    pub fn reset(&mut self) {
        self.stroke = None;
        self.current = None;
    }

    /// Change the drawing surface half-extents used for closure detection.
    pub fn set_ranges(&mut self, x_range: f64, y_range: f64) -> Result<(), CurveError> {
        let candidate = CurveConfig {
            x_range,
            y_range,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
