//! The svg-to-gcode conversion pipeline.

use anyhow::{Context, Result};
use plotkit_core::{Bounds, Point};
use plotkit_gcode::{GcodeConfig, GcodeWriter};
use plotkit_paths::{clip, from_svg, simplify, sort, write_svg, SortConfig};
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Settings for one conversion run. All distances are in millimeters.
#[derive(Debug, Clone)]
pub struct Config {
    /// SVG input file.
    pub in_file: String,
    /// Output file; a `.svg` suffix selects SVG output, anything else
    /// G-code.
    pub out_file: String,
    /// Displacement of the image origin from the pen origin.
    pub offset: Point,
    /// Target size of the image; zero dimensions are derived from the
    /// content so its aspect ratio is preserved.
    pub size: Point,
    /// Target paper size, if the image should be bounds-checked against
    /// one.
    pub paper: Point,
    /// Center the image on the paper.
    pub center: bool,
    /// Pen lift height for travel moves.
    pub pen_up: i32,
    /// Feed rate while drawing (mm/min).
    pub feed_rate: i32,
    /// Allow polylines to be split to reduce pen movement.
    pub split: bool,
    /// Allow polylines to be drawn backwards to reduce pen movement.
    pub reverse: bool,
    /// Simplification tolerance; zero disables simplification.
    pub simplify: f64,
    /// Rotate the input by this many degrees about its center.
    pub rotate_degrees: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            in_file: String::new(),
            out_file: "out.gcode".to_string(),
            offset: Point::ZERO,
            size: Point::ZERO,
            paper: Point::ZERO,
            center: false,
            pen_up: 40,
            feed_rate: 800,
            split: true,
            reverse: true,
            simplify: 0.1,
            rotate_degrees: 0.0,
        }
    }
}

/// Errors in the combination of size, paper, offset and centering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("input file must be specified")]
    MissingInput,

    #[error("target image size {sx},{sy} not compatible with image size {ow},{oh}")]
    IncompatibleSize { sx: f64, sy: f64, ow: f64, oh: f64 },

    #[error("paper size {x},{y} doesn't make sense")]
    BadPaper { x: f64, y: f64 },

    #[error("paper size {px},{py} is smaller than image {sx},{sy}")]
    PaperTooSmall { px: f64, py: f64, sx: f64, sy: f64 },

    #[error("paper size must be set to center the image")]
    CenterWithoutPaper,
}

/// Resolves the target bounds for the drawing on the page.
///
/// A fully zero size takes the content size as-is; a single zero
/// dimension is filled in to preserve the content's aspect ratio.
/// Otherwise the requested aspect must match the content's within 1e-3.
/// The paper, when given, must have both dimensions set and fit the
/// image; centering shifts the offset by half the leftover paper.
fn adjust_size(
    size: Point,
    paper: Point,
    offset: Point,
    center: bool,
    b: Bounds,
) -> Result<Bounds, ConfigError> {
    let ow = b.width();
    let oh = b.height();
    let mut sz = size;
    if sz.x == 0.0 && sz.y == 0.0 {
        sz = Point::new(ow, oh);
    } else if sz.y == 0.0 {
        sz.y = sz.x * oh / ow;
    } else if sz.x == 0.0 {
        sz.x = sz.y * ow / oh;
    }

    if !((sz.x / sz.y - ow / oh).abs() < 1e-3) {
        return Err(ConfigError::IncompatibleSize {
            sx: sz.x,
            sy: sz.y,
            ow,
            oh,
        });
    }

    if paper.x != 0.0 || paper.y != 0.0 {
        if paper.x == 0.0 || paper.y == 0.0 {
            return Err(ConfigError::BadPaper {
                x: paper.x,
                y: paper.y,
            });
        }
        if sz.x > paper.x || sz.y > paper.y {
            return Err(ConfigError::PaperTooSmall {
                px: paper.x,
                py: paper.y,
                sx: sz.x,
                sy: sz.y,
            });
        }
    }

    let mut delta = offset;
    if center {
        if paper.x == 0.0 {
            return Err(ConfigError::CenterWithoutPaper);
        }
        delta.x += (paper.x - sz.x) / 2.0;
        delta.y += (paper.y - sz.y) / 2.0;
    }

    Ok(Bounds::new(delta, Point::new(sz.x + delta.x, sz.y + delta.y)))
}

/// Runs the whole pipeline: ingest, rotate, fit, clip, simplify, sort,
/// emit.
pub fn convert(config: &Config) -> Result<()> {
    if config.in_file.is_empty() {
        return Err(ConfigError::MissingInput.into());
    }

    let mut drawing = {
        let f = File::open(&config.in_file)
            .with_context(|| format!("failed to open {}", config.in_file))?;
        from_svg(f).with_context(|| format!("failed to parse {}", config.in_file))?
    };
    debug!(
        polylines = drawing.polylines.len(),
        "parsed {}", config.in_file
    );

    if config.rotate_degrees != 0.0 {
        drawing.rotate(config.rotate_degrees.to_radians());
    }

    let bounds = adjust_size(
        config.size,
        config.paper,
        config.offset,
        config.center,
        drawing.bounds,
    )?;
    drawing.fit_to(bounds);
    clip(&mut drawing, bounds);
    if config.simplify > 0.0 {
        simplify(&mut drawing, config.simplify);
    }
    sort(
        &mut drawing,
        &SortConfig {
            split: config.split,
            reverse: config.reverse,
        },
    );

    let out = File::create(&config.out_file)
        .with_context(|| format!("failed to open output file {}", config.out_file))?;

    if Path::new(&config.out_file).extension().and_then(|e| e.to_str()) == Some("svg") {
        write_svg(&drawing, out)
            .with_context(|| format!("failed to write svg file {}", config.out_file))?;
        return Ok(());
    }

    let mut gcode = GcodeWriter::new(
        out,
        GcodeConfig {
            pen_up: config.pen_up,
            feed_rate: config.feed_rate,
        },
    );
    gcode.preamble()?;
    for polyline in &drawing.polylines {
        for (i, v) in polyline.points.iter().enumerate() {
            if i == 0 {
                gcode.move_to(v.x, v.y)?;
            } else {
                gcode.line_to(v.x, v.y)?;
            }
        }
    }
    gcode.postamble()?;
    gcode.flush().context("failed to write gcode")?;
    Ok(())
}
