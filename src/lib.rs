//! # Plotkit
//!
//! Converts 2D vector drawings (SVG) into motion plans for an XY pen
//! plotter, emitted either as G-code or as a minimal SVG re-rendering.
//! It can also typeset text as pen strokes using a hand-designed stroke
//! font described by a glyph-bearing SVG.
//!
//! ## Architecture
//!
//! Plotkit is organized as a workspace with multiple crates:
//!
//! 1. **plotkit-core** - geometry primitives and affine transforms
//! 2. **plotkit-paths** - SVG ingest and the polyline pipeline stages
//!    (clip, simplify, sort) plus the SVG writer
//! 3. **plotkit-font** - the stroke-font engine
//! 4. **plotkit-gcode** - the G-code emitter
//! 5. **plotkit** - the binaries tying the pipeline together
//!
//! The pipeline is ingest → fit → clip → simplify → sort → emit; see
//! [`convert`] for the composition.

pub mod convert;

pub use convert::{convert, Config, ConfigError};

pub use plotkit_core::{Bounds, Drawing, Point, Polyline, Transform};
pub use plotkit_font::{
    blockscript, placed_to_drawing, Font, FontConfig, FontError, Glyph, PlacedGlyph,
};
pub use plotkit_gcode::{GcodeConfig, GcodeWriter};
pub use plotkit_paths::{
    clip, from_svg, ids_from_svg, simplify, sort, write_svg, SortConfig, SvgError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration.
///
/// Diagnostics (such as warnings about skipped SVG elements) go to
/// stderr; `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
