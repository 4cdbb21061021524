//! Raster preview of fitted curves.
//!
//! Converts the spline (as a kurbo `BezPath`) and the Fourier
//! reconstruction to tiny-skia paths and writes a PNG framed on the
//! drawing surface `[-x_range, x_range] × [-y_range, y_range]`.

use std::io;
use std::path::Path;

use kurbo::{BezPath, PathEl, Point};

use crate::fourier::Harmonics;
use crate::{CurveResult, DisplayMode};

/// Image size and sampling density for a preview.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    /// Samples along the Fourier reconstruction.
    pub resolution: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            padding: 20,
            resolution: 200,
        }
    }
}

/// World → pixel mapping with Y pointing up.
#[derive(Debug, Clone, Copy)]
struct Frame {
    sx: f32,
    sy: f32,
    tx: f32,
    ty: f32,
}

impl Frame {
    fn new(options: &RenderOptions, x_range: f64, y_range: f64) -> Self {
        let content_w = options.width.saturating_sub(2 * options.padding) as f32;
        let content_h = options.height.saturating_sub(2 * options.padding) as f32;
        Self {
            sx: content_w / (2.0 * x_range as f32),
            sy: -content_h / (2.0 * y_range as f32),
            tx: options.width as f32 / 2.0,
            ty: options.height as f32 / 2.0,
        }
    }

    fn map(&self, p: Point) -> (f32, f32) {
        (self.sx * p.x as f32 + self.tx, self.sy * p.y as f32 + self.ty)
    }
}

/// Convert a kurbo `BezPath` to a `tiny_skia::Path` in pixel space.
fn kurbo_to_tinyskia(bezpath: &BezPath, frame: &Frame) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in bezpath.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                let (x, y) = frame.map(p);
                pb.move_to(x, y);
            }
            PathEl::LineTo(p) => {
                let (x, y) = frame.map(p);
                pb.line_to(x, y);
            }
            PathEl::QuadTo(c, p) => {
                let (cx, cy) = frame.map(c);
                let (px, py) = frame.map(p);
                pb.quad_to(cx, cy, px, py);
            }
            PathEl::CurveTo(c1, c2, p) => {
                let (c1x, c1y) = frame.map(c1);
                let (c2x, c2y) = frame.map(c2);
                let (px, py) = frame.map(p);
                pb.cubic_to(c1x, c1y, c2x, c2y, px, py);
            }
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some(&first) = points.first() {
        path.move_to(first);
        for &p in &points[1..] {
            path.line_to(p);
        }
    }
    path
}

/// Encode a pixmap to PNG bytes.
fn encode_png(pixmap: &tiny_skia::Pixmap) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(io::Error::other)?;
    writer
        .write_image_data(pixmap.data())
        .map_err(io::Error::other)?;
    drop(writer);
    Ok(buf)
}

fn paint(r: u8, g: u8, b: u8, a: u8) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke_style(width: f32, dash: Option<[f32; 2]>) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width,
        dash: dash.and_then(|d| tiny_skia::StrokeDash::new(d.to_vec(), 0.0)),
        ..tiny_skia::Stroke::default()
    }
}

/// Draw the surface grid: lines every fifth of each range, heavier axes.
fn draw_grid(pixmap: &mut tiny_skia::Pixmap, frame: &Frame, x_range: f64, y_range: f64) {
    let mut grid = BezPath::new();
    for i in -5..=5 {
        let x = x_range * i as f64 / 5.0;
        let y = y_range * i as f64 / 5.0;
        grid.move_to(Point::new(x, -y_range));
        grid.line_to(Point::new(x, y_range));
        grid.move_to(Point::new(-x_range, y));
        grid.line_to(Point::new(x_range, y));
    }
    let mut axes = BezPath::new();
    axes.move_to(Point::new(-x_range, 0.0));
    axes.line_to(Point::new(x_range, 0.0));
    axes.move_to(Point::new(0.0, -y_range));
    axes.line_to(Point::new(0.0, y_range));

    let identity = tiny_skia::Transform::identity();
    if let Some(path) = kurbo_to_tinyskia(&grid, frame) {
        pixmap.stroke_path(&path, &paint(224, 224, 224, 255), &stroke_style(1.0, None), identity, None);
    }
    if let Some(path) = kurbo_to_tinyskia(&axes, frame) {
        pixmap.stroke_path(&path, &paint(120, 120, 120, 255), &stroke_style(1.5, None), identity, None);
    }
}

/// Render `result` as it appears in `mode` and write a PNG to `output_path`.
///
/// Parametric: the spline with its control points.
/// Fourier: the reconstruction over a dashed spline. On an open curve
/// Fourier mode draws the parametric view.
pub fn render_curves(
    result: &CurveResult,
    mode: DisplayMode,
    harmonics: Harmonics,
    x_range: f64,
    y_range: f64,
    output_path: &Path,
    options: &RenderOptions,
) -> io::Result<()> {
    let mut pixmap = tiny_skia::Pixmap::new(options.width, options.height)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty render size"))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let frame = Frame::new(options, x_range, y_range);
    draw_grid(&mut pixmap, &frame, x_range, y_range);

    let identity = tiny_skia::Transform::identity();
    let spline = result.to_bezpath();

    match (mode, result.fourier()) {
        (DisplayMode::Fourier, Some(model)) => {
            if let Some(path) = kurbo_to_tinyskia(&spline, &frame) {
                pixmap.stroke_path(
                    &path,
                    &paint(30, 136, 229, 100),
                    &stroke_style(2.0, Some([8.0, 6.0])),
                    identity,
                    None,
                );
            }
            let samples = crate::eval::sample_fourier(model, harmonics, options.resolution);
            if let Some(path) = kurbo_to_tinyskia(&polyline(&samples), &frame) {
                pixmap.stroke_path(&path, &paint(229, 57, 53, 230), &stroke_style(3.0, None), identity, None);
            }
        }
        _ => {
            if let Some(path) = kurbo_to_tinyskia(&spline, &frame) {
                pixmap.stroke_path(&path, &paint(30, 136, 229, 230), &stroke_style(3.0, None), identity, None);
            }
            let dots = paint(255, 152, 0, 180);
            for p in result.curve().points() {
                let (x, y) = frame.map(p);
                if let Some(circle) = tiny_skia::PathBuilder::from_circle(x, y, 4.0) {
                    pixmap.fill_path(&circle, &dots, tiny_skia::FillRule::Winding, identity, None);
                }
            }
        }
    }

    std::fs::write(output_path, encode_png(&pixmap)?)?;
    log::debug!("rendered {:?} view to {}", mode, output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_curve, CurveConfig};

    #[test]
    fn frame_maps_surface_corners() {
        let options = RenderOptions::default();
        let frame = Frame::new(&options, 1.2, 1.2);
        assert_eq!(frame.map(Point::ZERO), (400.0, 400.0));
        let (x, y) = frame.map(Point::new(1.2, 1.2));
        assert!((x - 780.0).abs() < 1e-3 && (y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn writes_png_for_both_modes() {
        let stroke: Vec<Point> = (0..=24)
            .map(|i| {
                let a = i as f64 / 24.0 * std::f64::consts::TAU;
                Point::new(a.cos(), 0.5 * a.sin())
            })
            .collect();
        let result = build_curve(&stroke, &CurveConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            width: 120,
            height: 120,
            padding: 10,
            resolution: 64,
        };
        for (mode, name) in [(DisplayMode::Parametric, "p.png"), (DisplayMode::Fourier, "f.png")] {
            let path = dir.path().join(name);
            render_curves(&result, mode, Harmonics::DEFAULT, 1.2, 1.2, &path, &options).unwrap();
            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
        }
    }
}
