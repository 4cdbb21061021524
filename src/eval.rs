//! Dense sampling of fitted models for plotting and comparison.
//!
//! Both samplers use the same evenly spaced grid over t ∈ [0, 1],
//! endpoints included, so their outputs line up index by index.

use kurbo::Point;

use crate::fourier::{FourierModel, Harmonics};
use crate::param::uniform;
use crate::spline::{point_at, CubicSpline};

/// Sample the planar spline at `resolution` evenly spaced parameters.
pub fn sample_spline(x: &CubicSpline, y: &CubicSpline, resolution: usize) -> Vec<Point> {
    uniform(resolution)
        .into_iter()
        .map(|t| point_at(x, y, t))
        .collect()
}

/// Sample the truncated Fourier series at `resolution` evenly spaced parameters.
pub fn sample_fourier(model: &FourierModel, harmonics: Harmonics, resolution: usize) -> Vec<Point> {
    uniform(resolution)
        .into_iter()
        .map(|t| model.evaluate(t, harmonics))
        .collect()
}

/// Mean squared distance between paired samples.
///
/// Only the common prefix is compared; empty input gives 0.
pub fn mean_squared_distance(a: &[Point], b: &[Point]) -> f64 {
    let count = a.len().min(b.len());
    if count == 0 {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(p, q)| (*p - *q).hypot2())
        .sum();
    sum / count as f64
}

/// Root mean squared distance between paired samples.
pub fn rms_distance(a: &[Point], b: &[Point]) -> f64 {
    mean_squared_distance(a, b).sqrt()
}

/// Mean squared gap between spline and series on the model's own grid.
///
/// The grid is the `n` half-open parameters `j / n` the model was
/// analyzed on. There the truncated series is an orthogonal projection
/// of the samples, so the error never grows with `harmonics`. The
/// inclusive grid of [`sample_spline`] counts the seam twice and can
/// rise slightly near `Harmonics::MAX`.
pub fn truncation_error(
    model: &FourierModel,
    x: &CubicSpline,
    y: &CubicSpline,
    harmonics: Harmonics,
) -> f64 {
    let n = model.sample_count();
    let (spline, series): (Vec<Point>, Vec<Point>) = (0..n)
        .map(|j| {
            let t = j as f64 / n as f64;
            (point_at(x, y, t), model.evaluate(t, harmonics))
        })
        .unzip();
    mean_squared_distance(&spline, &series)
}
