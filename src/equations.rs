//! Plain-text equations for display and clipboard export.
//!
//! Pure formatting over a [`CurveResult`]; nothing here feeds back
//! into the models.

use std::fmt::Write;

use crate::fourier::{FourierModel, Harmonics};
use crate::{CurveResult, DisplayMode};

/// Polynomial coefficients at or below this are omitted.
const POLY_EPSILON: f64 = 1e-10;

/// Fourier coefficients at or below this are omitted.
const FOURIER_EPSILON: f64 = 1e-6;

const RULE_WIDTH: usize = 80;

/// How closely a harmonic count tracks the drawn curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproximationQuality {
    Low,
    Medium,
    High,
}

impl ApproximationQuality {
    pub fn for_harmonics(harmonics: Harmonics) -> Self {
        match harmonics.get() {
            h if h < 10 => Self::Low,
            h if h < 25 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Low => "Low (increase harmonics for a closer fit)",
            Self::Medium => "Medium (balances accuracy and length)",
            Self::High => "High (close fit, long expression)",
        }
    }
}

/// Equations for `mode`. Fourier mode on an open curve shows the spline.
pub fn format_equations(result: &CurveResult, mode: DisplayMode, harmonics: Harmonics) -> String {
    match (mode, result.fourier()) {
        (DisplayMode::Fourier, Some(model)) => fourier_equations(model, harmonics),
        _ => parametric_equations(result),
    }
}

/// Piecewise cubic equations, one `x(t)`/`y(t)` pair per segment.
pub fn parametric_equations(result: &CurveResult) -> String {
    let segments = result.segment_coefficients();
    let mut out = String::new();
    out.push_str("PARAMETRIC EQUATIONS\n\n");
    let _ = writeln!(
        out,
        "Curve defined by {} piecewise cubic segments:\n",
        segments.len()
    );

    for seg in &segments {
        let _ = writeln!(out, "Segment {}: t \u{2208} [{:.4}, {:.4}]", seg.index + 1, seg.t0, seg.t1);
        let _ = writeln!(out, "  x(t) = {}", cubic_terms(seg.x, seg.t0));
        let _ = writeln!(out, "  y(t) = {}\n", cubic_terms(seg.y, seg.t0));
    }

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\nSummary\n");
    let _ = writeln!(out, "  Segments: {}", segments.len());
    out.push_str("  Parameter range: t \u{2208} [0, 1]\n");
    let _ = writeln!(
        out,
        "  Curve type: {}",
        if result.is_closed() { "Closed loop" } else { "Open path" }
    );
    out
}

/// `x(t)`/`y(t)` as truncated Fourier sums, followed by the quality label.
pub fn fourier_equations(model: &FourierModel, harmonics: Harmonics) -> String {
    let table = model.coefficients(harmonics);
    let mut x_parts = Vec::new();
    let mut y_parts = Vec::new();
    for term in &table {
        if term.k == 0 {
            x_parts.push(format!("{:.6}", term.a));
            y_parts.push(format!("{:.6}", term.c));
            continue;
        }
        push_trig(&mut x_parts, term.a, "cos", term.k);
        push_trig(&mut x_parts, term.b, "sin", term.k);
        push_trig(&mut y_parts, term.c, "cos", term.k);
        push_trig(&mut y_parts, term.d, "sin", term.k);
    }

    let mut out = String::new();
    out.push_str("FOURIER SERIES APPROXIMATION\n\n");
    let _ = writeln!(out, "Using {} harmonics:\n", harmonics.get());
    let _ = writeln!(out, "x(t) = {}\n", x_parts.join(" "));
    let _ = writeln!(out, "y(t) = {}\n", y_parts.join(" "));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");
    out.push_str("x(t) = a\u{2080} + \u{3a3}[a\u{2096}\u{b7}cos(2\u{3c0}kt) + b\u{2096}\u{b7}sin(2\u{3c0}kt)]\n");
    out.push_str("y(t) = c\u{2080} + \u{3a3}[c\u{2096}\u{b7}cos(2\u{3c0}kt) + d\u{2096}\u{b7}sin(2\u{3c0}kt)]\n\n");
    let _ = writeln!(
        out,
        "Approximation quality: {}",
        ApproximationQuality::for_harmonics(harmonics).describe()
    );
    out
}

/// `a·(t - t0)³ + b·(t - t0)² + c·(t - t0) + d`, skipping negligible terms.
fn cubic_terms([a, b, c, d]: [f64; 4], t0: f64) -> String {
    let offset = format!("(t - {:.4})", t0);
    let mut terms = Vec::new();
    if a.abs() > POLY_EPSILON {
        terms.push(format!("{:.6}\u{b7}{}\u{b3}", a, offset));
    }
    if b.abs() > POLY_EPSILON {
        terms.push(format!("{:+.6}\u{b7}{}\u{b2}", b, offset));
    }
    if c.abs() > POLY_EPSILON {
        terms.push(format!("{:+.6}\u{b7}{}", c, offset));
    }
    if d.abs() > POLY_EPSILON || terms.is_empty() {
        terms.push(format!("{:+.6}", d));
    }
    terms.join(" ")
}

fn push_trig(parts: &mut Vec<String>, coeff: f64, func: &str, k: usize) {
    if coeff.abs() <= FOURIER_EPSILON {
        return;
    }
    let sign = if coeff >= 0.0 { '+' } else { '-' };
    parts.push(format!("{} {:.6}\u{b7}{}({}\u{b7}2\u{3c0}t)", sign, coeff.abs(), func, k));
}
