//! # Plotkit Paths
//!
//! The polyline pipeline for pen plotting. This crate turns a restricted
//! SVG dialect into a flat [`Drawing`](plotkit_core::Drawing) and provides
//! the stages that prepare it for a physical plotter:
//!
//! - **Import**: parse `path`/`line`/`g` elements with nested transforms,
//!   flattening cubic Béziers into line segments.
//! - **Clip**: Cohen–Sutherland segment clipping against the view bounds,
//!   splitting polylines that cross the edge.
//! - **Simplify**: Ramer–Douglas–Peucker point reduction to a metric
//!   tolerance.
//! - **Sort**: greedy nearest-endpoint reordering over a kd-tree to cut
//!   pen-up travel, optionally reversing and splitting polylines.
//! - **SVG rendering**: serialize a drawing back to a minimal stroked SVG.

pub mod clip;
pub mod error;
pub mod import;
pub mod simplify;
pub mod sort;
pub mod svg_renderer;

pub use clip::clip;
pub use error::{Result, SvgError};
pub use import::{from_svg, ids_from_svg};
pub use simplify::simplify;
pub use sort::{sort, SortConfig};
pub use svg_renderer::write_svg;
