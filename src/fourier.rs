//! Fourier series of a closed planar spline.
//!
//! Both coordinate splines are sampled at `n` uniform parameters over
//! [0, 1), transformed with a DFT, and read back as real cosine/sine
//! coefficients. The series is periodic with period 1, so the
//! reconstruction closes the curve even where the spline does not.

use std::f64::consts::TAU;
use std::ops::{Add, Mul};

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::spline::CubicSpline;

/// Sample count fed to the DFT.
pub const FOURIER_SAMPLES: usize = 256;

/// Complex DFT coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `e^{iθ}`.
    pub fn from_angle(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    fn mul(self, rhs: f64) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

/// Harmonic truncation order, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Harmonics(u32);

impl Harmonics {
    pub const MIN: Harmonics = Harmonics(3);
    pub const MAX: Harmonics = Harmonics(50);
    pub const DEFAULT: Harmonics = Harmonics(15);

    /// Clamp any requested count into range.
    pub fn new(count: i64) -> Self {
        Harmonics(count.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// All valid counts, ascending.
    pub fn all() -> impl Iterator<Item = Harmonics> {
        (Self::MIN.0..=Self::MAX.0).map(Harmonics)
    }
}

impl Default for Harmonics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for Harmonics {
    fn from(count: u32) -> Self {
        Harmonics::new(count as i64)
    }
}

impl From<Harmonics> for u32 {
    fn from(h: Harmonics) -> u32 {
        h.0
    }
}

/// One row of the coefficient table.
///
/// `x(t) += a·cos(2πkt) + b·sin(2πkt)`, `y(t) += c·cos(2πkt) + d·sin(2πkt)`.
/// For `k = 0`, `a` and `c` are the means and `b = d = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicTerm {
    pub k: usize,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// Per-axis DFT of a sampled closed curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourierModel {
    n: usize,
    x_coeffs: Vec<Complex>,
    y_coeffs: Vec<Complex>,
}

impl FourierModel {
    /// Sample `x`/`y` at [`FOURIER_SAMPLES`] points over [0, 1) and transform.
    pub fn analyze(x: &CubicSpline, y: &CubicSpline) -> Self {
        Self::analyze_with(x, y, FOURIER_SAMPLES)
    }

    /// [`FourierModel::analyze`] with an explicit sample count.
    pub fn analyze_with(x: &CubicSpline, y: &CubicSpline, n: usize) -> Self {
        let n = n.max(1);
        let sample = |spline: &CubicSpline| -> Vec<f64> {
            (0..n).map(|j| spline.evaluate(j as f64 / n as f64)).collect()
        };
        Self::from_samples(&sample(x), &sample(y))
    }

    /// Transform equally long, uniformly spaced periodic samples.
    pub fn from_samples(xs: &[f64], ys: &[f64]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        Self {
            n: xs.len(),
            x_coeffs: dft(xs),
            y_coeffs: dft(ys),
        }
    }

    pub fn sample_count(&self) -> usize {
        self.n
    }

    pub fn x_coeffs(&self) -> &[Complex] {
        &self.x_coeffs
    }

    pub fn y_coeffs(&self) -> &[Complex] {
        &self.y_coeffs
    }

    /// Highest harmonic the samples can represent.
    pub fn max_harmonic(&self) -> usize {
        self.n / 2
    }

    /// Real coefficients of harmonic `k`, clamped to [`max_harmonic`].
    ///
    /// The mean and, for even `n`, the Nyquist bin have no conjugate
    /// partner, so they carry half weight and no sine part.
    ///
    /// [`max_harmonic`]: FourierModel::max_harmonic
    pub fn term(&self, k: usize) -> HarmonicTerm {
        let k = k.min(self.max_harmonic());
        let (Some(&x), Some(&y)) = (self.x_coeffs.get(k), self.y_coeffs.get(k)) else {
            return HarmonicTerm {
                k,
                a: 0.0,
                b: 0.0,
                c: 0.0,
                d: 0.0,
            };
        };
        let n = self.n as f64;
        if k == 0 || 2 * k == self.n {
            HarmonicTerm {
                k,
                a: x.re / n,
                b: 0.0,
                c: y.re / n,
                d: 0.0,
            }
        } else {
            HarmonicTerm {
                k,
                a: 2.0 * x.re / n,
                b: -2.0 * x.im / n,
                c: 2.0 * y.re / n,
                d: -2.0 * y.im / n,
            }
        }
    }

    /// Coefficient table for `k = 0..=harmonics`.
    pub fn coefficients(&self, harmonics: Harmonics) -> Vec<HarmonicTerm> {
        (0..=self.order(harmonics)).map(|k| self.term(k)).collect()
    }

    /// Truncated series at `t`.
    pub fn evaluate(&self, t: f64, harmonics: Harmonics) -> Point {
        let mean = self.term(0);
        let mut p = Point::new(mean.a, mean.c);
        for k in 1..=self.order(harmonics) {
            let term = self.term(k);
            let (sin, cos) = (TAU * k as f64 * t).sin_cos();
            p.x += term.a * cos + term.b * sin;
            p.y += term.c * cos + term.d * sin;
        }
        p
    }

    /// Truncation order actually summed: never past `n / 2`.
    fn order(&self, harmonics: Harmonics) -> usize {
        (harmonics.get() as usize).min(self.max_harmonic())
    }
}

/// Direct DFT: `X[k] = Σ x[j]·e^{-2πi·jk/n}`.
fn dft(samples: &[f64]) -> Vec<Complex> {
    let n = samples.len();
    if n == 0 {
        return vec![];
    }
    let twiddles: Vec<Complex> = (0..n)
        .map(|m| Complex::from_angle(-TAU * m as f64 / n as f64))
        .collect();
    (0..n)
        .map(|k| {
            samples
                .iter()
                .enumerate()
                .fold(Complex::ZERO, |acc, (j, &x)| acc + twiddles[(j * k) % n] * x)
        })
        .collect()
}
