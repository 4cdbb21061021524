use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use curvecraft::kurbo::Point;
use curvecraft::{build_curve, equations, CurveConfig, CurveError, DisplayMode, Harmonics};

#[derive(Parser)]
#[command(name = "curvecraft", about = "Freehand stroke to spline and Fourier equations")]
struct Cli {
    /// Stroke file: JSON array of [x, y] pairs, or one "x,y" / "x y" pair per line
    #[arg(short, long)]
    input: PathBuf,

    /// TOML config file (defaults apply to missing keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drawing surface half-extent along x (overrides config)
    #[arg(long)]
    x_range: Option<f64>,

    /// Drawing surface half-extent along y (overrides config)
    #[arg(long)]
    y_range: Option<f64>,

    /// Fourier harmonics, clamped to 3-50 (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    harmonics: Option<i64>,

    /// Which equations to print
    #[arg(short, long, value_enum, default_value = "parametric")]
    mode: Mode,

    /// Write the fitted models as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the spline as an SVG path
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write a PNG preview of the chosen mode
    #[cfg(feature = "render")]
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Parametric,
    Fourier,
}

impl From<Mode> for DisplayMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Parametric => DisplayMode::Parametric,
            Mode::Fourier => DisplayMode::Fourier,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CurveConfig::load(path)?,
        None => CurveConfig::default(),
    };
    if let Some(x) = cli.x_range {
        config.x_range = x;
    }
    if let Some(y) = cli.y_range {
        config.y_range = y;
    }
    config.validate()?;
    let harmonics = Harmonics::new(cli.harmonics.unwrap_or(config.harmonics as i64));
    let mode = DisplayMode::from(cli.mode);

    let points = read_stroke(&cli.input)?;
    eprintln!();
    eprintln!("  Stroke      {} points from {}", points.len(), cli.input.display());

    let result = build_curve(&points, &config)?;
    eprintln!(
        "  Fit         {} control points \u{2192} {} segments",
        result.curve().len(),
        result.segment_count()
    );
    match result.fourier_error(harmonics) {
        Some(mse) => eprintln!(
            "  Closed      Fourier with {} harmonics, RMS {:.6} from spline",
            harmonics.get(),
            mse.sqrt()
        ),
        None => eprintln!("  Open        Fourier unavailable"),
    }
    eprintln!();

    println!("{}", equations::format_equations(&result, mode, harmonics));

    if let Some(path) = &cli.json {
        std::fs::write(path, serde_json::to_string_pretty(&result)?)?;
        eprintln!("  JSON        {}", path.display());
    }
    if let Some(path) = &cli.svg {
        std::fs::write(path, svg_document(&result.to_bezpath().to_svg(), &config))?;
        eprintln!("  SVG         {}", path.display());
    }
    #[cfg(feature = "render")]
    if let Some(path) = &cli.png {
        curvecraft::render::render_curves(
            &result,
            mode,
            harmonics,
            config.x_range,
            config.y_range,
            path,
            &curvecraft::render::RenderOptions::default(),
        )?;
        eprintln!("  PNG         {}", path.display());
    }

    Ok(())
}

/// Parse a stroke file as JSON pairs, falling back to delimited text.
fn read_stroke(path: &Path) -> Result<Vec<Point>, CurveError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CurveError::InputParse(format!("{}: {}", path.display(), e)))?;
    if let Ok(pairs) = serde_json::from_str::<Vec<[f64; 2]>>(&content) {
        return Ok(pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect());
    }
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|f| !f.is_empty())
                .collect();
            match fields.as_slice() {
                [x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
                    (Ok(x), Ok(y)) => Ok(Point::new(x, y)),
                    _ => Err(CurveError::InputParse(format!("line {}: not a number", i + 1))),
                },
                _ => Err(CurveError::InputParse(format!(
                    "line {}: expected 2 fields, got {}",
                    i + 1,
                    fields.len()
                ))),
            }
        })
        .collect()
}

/// Wrap path data in an SVG document framed on the drawing surface (Y up).
fn svg_document(path_data: &str, config: &CurveConfig) -> String {
    let (w, h) = (2.0 * config.x_range, 2.0 * config.y_range);
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n  \
         <g transform=\"scale(1,-1)\">\n    \
         <path d=\"{}\" fill=\"none\" stroke=\"#1e88e5\" stroke-width=\"{}\"/>\n  \
         </g>\n</svg>\n",
        -config.x_range,
        -config.y_range,
        w,
        h,
        path_data,
        w.min(h) / 200.0
    )
}
