//! Stroke denoising and decimation.
//!
//! A raw pointer stroke is jittery and oversampled. Each axis gets a
//! local least-squares polynomial pass (Savitzky-Golay style), then the
//! polyline is decimated to roughly `target_points` control points.

use kurbo::Point;

use crate::config::SmoothingParams;

/// Smooth and decimate a raw stroke.
///
/// Total: degenerate fits fall back to plain decimation of the input.
pub fn smooth(points: &[Point], params: &SmoothingParams) -> Vec<Point> {
    let n = points.len();
    if n < params.min_points {
        return points.to_vec();
    }

    // Largest odd window not exceeding the stroke length.
    let odd_len = if n % 2 == 1 { n } else { n - 1 };
    let window = params.max_window.min(odd_len);

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let smoothed = polynomial_filter(&xs, window, params.poly_order).zip(polynomial_filter(
        &ys,
        window,
        params.poly_order,
    ));

    match smoothed {
        Some((sx, sy)) => {
            let pts: Vec<Point> = sx.into_iter().zip(sy).map(|(x, y)| Point::new(x, y)).collect();
            decimate(&pts, params.target_points)
        }
        None => {
            log::debug!("smoothing fit degenerate (window {}), decimating raw stroke", window);
            decimate(points, params.target_points)
        }
    }
}

/// Keep every `stride`-th sample, `stride = max(1, len / target)`.
pub fn decimate(points: &[Point], target: usize) -> Vec<Point> {
    let stride = (points.len() / target.max(1)).max(1);
    points.iter().step_by(stride).copied().collect()
}

/// Local polynomial fit over a sliding window.
///
/// Interior samples use the window centered on them. The first and last
/// `window / 2` samples reuse the first/last full window and evaluate its
/// polynomial off-center, so the window never leaves the data.
///
/// Returns `None` when the fit is undetermined.
fn polynomial_filter(values: &[f64], window: usize, order: usize) -> Option<Vec<f64>> {
    let n = values.len();
    if window % 2 == 0 || window > n || window <= order {
        return None;
    }
    let half = window / 2;

    // Abscissae are centered on the window, so the normal matrix is the
    // same for every window position. Factor it once.
    let abscissae: Vec<f64> = (0..window).map(|j| j as f64 - half as f64).collect();
    let normal = normal_matrix(&abscissae, order);

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let start = i.saturating_sub(half).min(n - window);
        let rhs = moment_vector(&abscissae, &values[start..start + window], order);
        let coeffs = solve(normal.clone(), rhs)?;
        let u = i as f64 - start as f64 - half as f64;
        let value = horner(&coeffs, u);
        if !value.is_finite() {
            return None;
        }
        out.push(value);
    }
    Some(out)
}

/// `AᵀA` for the Vandermonde matrix of `xs` up to degree `order`.
fn normal_matrix(xs: &[f64], order: usize) -> Vec<Vec<f64>> {
    let size = order + 1;
    let mut sums = vec![0.0; 2 * order + 1];
    for &x in xs {
        let mut power = 1.0;
        for sum in sums.iter_mut() {
            *sum += power;
            power *= x;
        }
    }
    (0..size)
        .map(|r| (0..size).map(|c| sums[r + c]).collect())
        .collect()
}

/// `Aᵀy` for the Vandermonde matrix of `xs`.
fn moment_vector(xs: &[f64], ys: &[f64], order: usize) -> Vec<f64> {
    let mut moments = vec![0.0; order + 1];
    for (&x, &y) in xs.iter().zip(ys) {
        let mut power = 1.0;
        for m in moments.iter_mut() {
            *m += power * y;
            power *= x;
        }
    }
    moments
}

/// Gaussian elimination with partial pivoting. `None` if singular.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let size = b.len();
    for col in 0..size {
        let pivot = (col..size).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..size {
            let factor = a[row][col] / a[col][col];
            for k in col..size {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut x = vec![0.0; size];
    for row in (0..size).rev() {
        let tail: f64 = (row + 1..size).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

/// Evaluate `c[0] + c[1]·u + c[2]·u² + …`.
fn horner(coeffs: &[f64], u: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * u + c)
}
