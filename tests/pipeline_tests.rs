use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use curvecraft::eval::{mean_squared_distance, rms_distance, sample_fourier, sample_spline};
use curvecraft::kurbo::Point;
use curvecraft::{
    build_curve, closure, parameterize, CurveConfig, CurveError, DisplayMode, Harmonics,
    StrokePipeline,
};

/// `n` points around a closed loop, first and last coincident.
fn loop_points(n: usize, radius: impl Fn(f64) -> f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f64 / (n - 1) as f64 * TAU;
            let r = radius(a);
            Point::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

/// Angles span [0, 2π] so the ends meet; 30 points over [0, 2π) leave a gap wider than the closure tolerance.
fn unit_circle(n: usize) -> Vec<Point> {
    loop_points(n, |_| 1.0)
}

/// Deterministic jitter in [-amp, amp].
fn jitter(points: &[Point], amp: f64) -> Vec<Point> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    };
    points
        .iter()
        .map(|p| Point::new(p.x + amp * next(), p.y + amp * next()))
        .collect()
}

fn draw(pipeline: &mut StrokePipeline, points: &[Point]) {
    pipeline.begin_stroke();
    for p in points {
        pipeline.append_point(p.x, p.y);
    }
}

#[test]
fn spline_interpolates_every_knot() {
    let noisy = jitter(&loop_points(80, |a| 1.0 + 0.3 * (2.0 * a).sin()), 0.02);
    let result = build_curve(&noisy, &CurveConfig::default()).unwrap();
    let curve = result.curve();
    assert_eq!(result.x_spline().knots(), curve.t.as_slice());
    for i in 0..curve.len() {
        let t = curve.t[i];
        assert_abs_diff_eq!(result.x_spline().evaluate(t), curve.x[i], epsilon = 1e-9);
        assert_abs_diff_eq!(result.y_spline().evaluate(t), curve.y[i], epsilon = 1e-9);
    }
}

#[test]
fn splines_have_natural_ends() {
    let stroke: Vec<Point> = (0..40)
        .map(|i| {
            let s = i as f64 / 39.0;
            Point::new(s, (3.0 * s).sin())
        })
        .collect();
    let result = build_curve(&stroke, &CurveConfig::default()).unwrap();
    for spline in [result.x_spline(), result.y_spline()] {
        assert_abs_diff_eq!(spline.derivative(0.0, 2), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spline.derivative(1.0, 2), 0.0, epsilon = 1e-6);
    }
}

#[test]
fn arc_length_parameter_is_monotonic() {
    let noisy = jitter(&unit_circle(120), 0.05);
    let result = build_curve(&noisy, &CurveConfig::default()).unwrap();
    let t = &result.curve().t;
    assert_eq!(t[0], 0.0);
    assert_eq!(*t.last().unwrap(), 1.0);
    assert!(t.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn coincident_stroke_gets_uniform_parameter() {
    let same = vec![Point::new(0.4, -0.1); 7];
    let curve = parameterize(&same);
    assert_eq!(curve.len(), 7);
    assert!(curve.t.windows(2).all(|w| w[0] < w[1]));
    for (i, t) in curve.t.iter().enumerate() {
        assert_abs_diff_eq!(*t, i as f64 / 6.0, epsilon = 1e-15);
    }
    assert!(build_curve(&same, &CurveConfig::default()).is_ok());
}

#[test]
fn closure_threshold_scales_with_range() {
    assert!(closure::is_closed(Point::ZERO, Point::new(0.05, 0.05), 1.2, 1.2));
    assert!(!closure::is_closed(Point::ZERO, Point::new(0.5, 0.5), 1.2, 1.2));
}

/// Closed loops of several sizes and radius profiles.
fn loop_family() -> Vec<(usize, f64, f64, Vec<Point>)> {
    let profiles = [(0.0, 1.0), (0.2, 3.0), (0.3, 5.0), (0.15, 2.0)];
    let mut family = Vec::new();
    for n in [12, 20, 30, 31, 40, 60, 100, 200, 333] {
        for (amp, lobes) in profiles {
            let stroke = loop_points(n, |a| 1.0 + amp * (lobes * a).cos());
            family.push((n, amp, lobes, stroke));
        }
    }
    family
}

#[test]
fn fourier_error_shrinks_with_more_harmonics() {
    for (n, amp, lobes, stroke) in loop_family() {
        let result = build_curve(&stroke, &CurveConfig::default()).unwrap();
        let errors: Vec<f64> = Harmonics::all()
            .map(|h| result.fourier_error(h).expect("closed stroke"))
            .collect();
        for (i, pair) in errors.windows(2).enumerate() {
            // Rounding only: the projection itself is exact.
            assert!(
                pair[1] <= pair[0] * (1.0 + 1e-9) + 1e-15,
                "n={} amp={} lobes={}: error grew from H={} to H={}: {} -> {}",
                n,
                amp,
                lobes,
                i + 3,
                i + 4,
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn dense_samples_get_closer_with_more_harmonics() {
    for (n, amp, lobes, stroke) in loop_family() {
        let result = build_curve(&stroke, &CurveConfig::default()).unwrap();
        let model = result.fourier().expect("closed stroke");
        let reference = sample_spline(result.x_spline(), result.y_spline(), 200);
        let error = |h| mean_squared_distance(&sample_fourier(model, h, 200), &reference);
        assert!(
            error(Harmonics::MAX) < error(Harmonics::MIN),
            "n={} amp={} lobes={}",
            n,
            amp,
            lobes
        );
    }
}

#[test]
fn fourier_reconstruction_is_periodic() {
    let stroke = jitter(&loop_points(90, |a| 1.0 + 0.25 * (2.0 * a).cos()), 0.01);
    let result = build_curve(&stroke, &CurveConfig::default()).unwrap();
    let model = result.fourier().expect("closed stroke");
    for h in [20, 35, 50] {
        let h = Harmonics::new(h);
        let start = model.evaluate(0.0, h);
        let end = model.evaluate(1.0 - 1e-9, h);
        assert!(start.distance(end) < 1e-4, "seam gap {} at H={}", start.distance(end), h.get());
        let samples = sample_fourier(model, h, 200);
        assert!(samples[0].distance(samples[199]) < 1e-9);
    }
}

#[test]
fn unit_circle_end_to_end() {
    let config = CurveConfig::with_ranges(1.2, 1.2).unwrap();
    let mut pipeline = StrokePipeline::new(config);
    draw(&mut pipeline, &unit_circle(30));
    let result = pipeline.end_stroke().unwrap();

    // (a) closed
    assert!(result.is_closed());

    // (b) first harmonic dominates
    let table = result.fourier_table(Harmonics::MAX).unwrap();
    let a1 = table[1].a.abs();
    let d1 = table[1].d.abs();
    assert!(a1 > 0.9 && d1 > 0.9, "a1={} d1={}", a1, d1);
    for term in &table[2..] {
        for coeff in [term.a, term.b, term.c, term.d] {
            assert!(coeff.abs() < 0.05 * a1.min(d1), "k={} coeff={}", term.k, coeff);
        }
    }
    assert_abs_diff_eq!(table[0].a, 0.0, epsilon = 0.05);
    assert_abs_diff_eq!(table[0].c, 0.0, epsilon = 0.05);

    // (c) five harmonics reproduce the circle
    let h = pipeline.set_harmonics(5);
    let samples = result.sample(DisplayMode::Fourier, h, 200);
    let circle: Vec<Point> = (0..200)
        .map(|i| {
            let a = i as f64 / 199.0 * TAU;
            Point::new(a.cos(), a.sin())
        })
        .collect();
    let rms = rms_distance(&samples, &circle);
    assert!(rms < 0.05, "rms {}", rms);
    let radial: f64 = samples
        .iter()
        .map(|p| (p.to_vec2().hypot() - 1.0).powi(2))
        .sum::<f64>()
        / samples.len() as f64;
    assert!(radial.sqrt() < 0.05);
}

#[test]
fn three_point_stroke_is_rejected() {
    let mut pipeline = StrokePipeline::default();
    draw(&mut pipeline, &unit_circle(30)[..3]);
    let err = pipeline.end_stroke().unwrap_err();
    assert_eq!(err, CurveError::InsufficientPoints { found: 3, required: 5 });
    assert!(pipeline.current().is_none());
}

#[test]
fn sampling_does_not_touch_the_model() {
    let result = build_curve(&unit_circle(40), &CurveConfig::default()).unwrap();
    let before = result.clone();
    for h in Harmonics::all() {
        let _ = result.sample(DisplayMode::Fourier, h, 17);
    }
    assert_eq!(result, before);
}

#[test]
fn long_strokes_are_decimated() {
    let stroke = jitter(&unit_circle(500), 0.01);
    let result = build_curve(&stroke, &CurveConfig::default()).unwrap();
    assert_eq!(result.curve().len(), 25);
    assert_eq!(result.segment_count(), 24);
}

#[test]
fn result_round_trips_through_json() {
    let result = build_curve(&unit_circle(30), &CurveConfig::default()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: curvecraft::CurveResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.segment_count(), result.segment_count());
    assert_eq!(back.is_closed(), result.is_closed());
}
