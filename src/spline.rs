//! Natural cubic spline interpolation, one spline per axis.
//!
//! Per axis:
//! 1. Solve the tridiagonal system for the knot second derivatives
//!    (zero at both ends)
//! 2. Derive per-segment cubic coefficients in the local offset `t - t0`
//!
//! The x and y splines share knots, so together they convert exactly
//! to one cubic Bézier per segment.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::param::ParameterizedCurve;

/// Which coordinate of a [`ParameterizedCurve`] to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn values(self, curve: &ParameterizedCurve) -> &[f64] {
        match self {
            Axis::X => &curve.x,
            Axis::Y => &curve.y,
        }
    }
}

/// Piecewise cubic through every knot.
///
/// Segment `i` covers `[knots[i], knots[i + 1]]` and holds
/// `[cubic, quadratic, linear, constant]` in the offset `t - knots[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicSpline {
    knots: Vec<f64>,
    segments: Vec<[f64; 4]>,
}

impl CubicSpline {
    /// Fit the natural cubic interpolant through `(t[i], values[i])`.
    ///
    /// `t` must be strictly increasing with at least 2 entries.
    pub fn fit(t: &[f64], values: &[f64]) -> Result<Self, CurveError> {
        if t.len() != values.len() {
            return Err(CurveError::LengthMismatch {
                knots: t.len(),
                values: values.len(),
            });
        }
        let n = t.len();
        if n < 2 {
            return Err(CurveError::TooFewKnots(n));
        }
        if let Some(i) = t.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(CurveError::UnsortedKnots(i + 1));
        }

        let h: Vec<f64> = t.windows(2).map(|w| w[1] - w[0]).collect();
        let slopes: Vec<f64> = (0..n - 1).map(|i| (values[i + 1] - values[i]) / h[i]).collect();
        let m = second_derivatives(&h, &slopes);

        let segments = (0..n - 1)
            .map(|i| {
                let (hi, m0, m1) = (h[i], m[i], m[i + 1]);
                [
                    (m1 - m0) / (6.0 * hi),
                    m0 / 2.0,
                    slopes[i] - hi * (2.0 * m0 + m1) / 6.0,
                    values[i],
                ]
            })
            .collect();

        Ok(Self {
            knots: t.to_vec(),
            segments,
        })
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Per-segment `[cubic, quadratic, linear, constant]` coefficients.
    pub fn segments(&self) -> &[[f64; 4]] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Parameter interval `[t0, t1]` of segment `i`.
    pub fn segment_span(&self, i: usize) -> (f64, f64) {
        (self.knots[i], self.knots[i + 1])
    }

    /// Spline value at `t`. Outside the knot range the end segments extrapolate.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.derivative(t, 0)
    }

    /// `order`-th derivative at `t` (0 = value). Orders above 3 are zero.
    pub fn derivative(&self, t: f64, order: usize) -> f64 {
        let i = self.segment_index(t);
        let [a, b, c, d] = self.segments[i];
        let s = t - self.knots[i];
        match order {
            0 => ((a * s + b) * s + c) * s + d,
            1 => (3.0 * a * s + 2.0 * b) * s + c,
            2 => 6.0 * a * s + 2.0 * b,
            3 => 6.0 * a,
            _ => 0.0,
        }
    }

    /// Segment whose `[t0, t1)` contains `t`; the last is closed on the right.
    fn segment_index(&self, t: f64) -> usize {
        let upper = self.knots.partition_point(|&k| k <= t);
        upper.saturating_sub(1).min(self.segments.len() - 1)
    }
}

/// Knot second derivatives with natural ends (Thomas algorithm).
fn second_derivatives(h: &[f64], slopes: &[f64]) -> Vec<f64> {
    let n = h.len() + 1;
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    // Interior rows i = 1..n-1:
    // h[i-1]·m[i-1] + 2(h[i-1] + h[i])·m[i] + h[i]·m[i+1] = 6(slope[i] - slope[i-1])
    let interior = n - 2;
    let mut upper = vec![0.0; interior];
    let mut rhs = vec![0.0; interior];
    for row in 0..interior {
        let i = row + 1;
        let lower = h[i - 1];
        let diag = 2.0 * (h[i - 1] + h[i]);
        let r = 6.0 * (slopes[i] - slopes[i - 1]);
        let (prev_upper, prev_rhs) = if row == 0 {
            (0.0, 0.0)
        } else {
            (upper[row - 1], rhs[row - 1])
        };
        let denom = diag - lower * prev_upper;
        upper[row] = h[i] / denom;
        rhs[row] = (r - lower * prev_rhs) / denom;
    }
    for row in (0..interior).rev() {
        let next = m[row + 2];
        m[row + 1] = rhs[row] - upper[row] * next;
    }
    m
}

/// Fit both coordinate splines of `curve` with the same routine.
pub fn fit_axes(curve: &ParameterizedCurve) -> Result<(CubicSpline, CubicSpline), CurveError> {
    let fit_axis = |axis: Axis| CubicSpline::fit(&curve.t, axis.values(curve));
    Ok((fit_axis(Axis::X)?, fit_axis(Axis::Y)?))
}

/// Point on the planar curve `(x(t), y(t))`.
pub fn point_at(x: &CubicSpline, y: &CubicSpline, t: f64) -> Point {
    Point::new(x.evaluate(t), y.evaluate(t))
}

/// Exact cubic Bézier form of the planar spline.
///
/// Both splines must share knots (as from [`fit_axes`]).
pub fn to_bezpath(x: &CubicSpline, y: &CubicSpline) -> BezPath {
    let mut path = BezPath::new();
    let count = x.segment_count().min(y.segment_count());
    if count == 0 {
        return path;
    }
    path.move_to(point_at(x, y, x.knots[0]));
    for i in 0..count {
        let (t0, t1) = x.segment_span(i);
        let h = t1 - t0;
        let [_, p1, p2, p3] = control_points(x.segments[i], h);
        let [_, q1, q2, q3] = control_points(y.segments[i], h);
        path.curve_to(Point::new(p1, q1), Point::new(p2, q2), Point::new(p3, q3));
    }
    path
}

/// Bernstein coefficients of `a·s³ + b·s² + c·s + d` over `s ∈ [0, h]`.
fn control_points([a, b, c, d]: [f64; 4], h: f64) -> [f64; 4] {
    let c1 = c * h;
    let b2 = b * h * h;
    let a3 = a * h * h * h;
    [
        d,
        d + c1 / 3.0,
        d + 2.0 * c1 / 3.0 + b2 / 3.0,
        d + c1 + b2 + a3,
    ]
}
