//! # Plotkit Core
//!
//! Geometry primitives shared by every stage of the plotter pipeline:
//! 2D points, axis-aligned bounds, polylines, drawings, and the 3×3
//! homogeneous affine transform used both by SVG ingest and by the
//! whole-drawing fit/translate/rotate operations.

pub mod geometry;
pub mod transform;

pub use geometry::{Bounds, Drawing, Point, Polyline};
pub use transform::Transform;
