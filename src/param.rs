//! Arc-length parameterization of a polyline onto t ∈ [0, 1].

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Points paired with their curve parameter.
///
/// `t`, `x` and `y` always have the same length; `t` is non-decreasing,
/// starts at 0 and ends at 1 (a single point has `t = [0]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterizedCurve {
    pub t: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl ParameterizedCurve {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Point::new(x, y))
    }

    /// Drop points whose parameter repeats the previous one.
    ///
    /// The final point always survives so `t` still ends at 1.
    pub fn without_ties(self) -> Self {
        let n = self.len();
        let mut keep: Vec<usize> = Vec::with_capacity(n);
        for i in 0..n {
            match keep.last() {
                Some(&prev) if self.t[i] <= self.t[prev] => {
                    if i == n - 1 && keep.len() > 1 {
                        keep.pop();
                        keep.push(i);
                    }
                }
                _ => keep.push(i),
            }
        }
        if keep.len() == n {
            return self;
        }
        ParameterizedCurve {
            t: keep.iter().map(|&i| self.t[i]).collect(),
            x: keep.iter().map(|&i| self.x[i]).collect(),
            y: keep.iter().map(|&i| self.y[i]).collect(),
        }
    }
}

/// Assign each point its normalized cumulative path length.
///
/// When every point coincides the path has no length; t then falls back
/// to an even spread over [0, 1].
pub fn parameterize(points: &[Point]) -> ParameterizedCurve {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += points[i - 1].distance(*p);
        }
        cumulative.push(total);
    }

    let t = if total > 0.0 {
        cumulative.iter().map(|d| d / total).collect()
    } else {
        if points.len() > 1 {
            log::debug!("zero arc length over {} points, uniform parameter", points.len());
        }
        uniform(points.len())
    };

    ParameterizedCurve {
        t,
        x: points.iter().map(|p| p.x).collect(),
        y: points.iter().map(|p| p.y).collect(),
    }
}

/// `count` evenly spaced values from 0 to 1 inclusive.
pub(crate) fn uniform(count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![0.0],
        _ => {
            let last = (count - 1) as f64;
            (0..count).map(|i| i as f64 / last).collect()
        }
    }
}
