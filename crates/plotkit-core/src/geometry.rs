//! Points, bounds, polylines, and drawings.
//!
//! A [`Drawing`] is an ordered set of polylines together with an explicit
//! view bounds. The bounds are a frame, not a tight hull: transform and
//! clip stages operate relative to it, and [`Drawing::tighten_bounds`]
//! recomputes it from the content when a tight hull is wanted.

use crate::transform::Transform;
use std::ops::{Add, Sub};

/// A 2D point (or displacement) in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A contiguous series of line segments, from the first point to the last.
///
/// A polyline with a single point is degenerate (a pen-down anchor with no
/// extent); stages that produce output for rendering discard those.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the polyline has fewer than two points and so draws nothing.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Distance from a point to the box. Points inside return 0.
    pub fn distance_to(&self, p: Point) -> f64 {
        let clamped = Point::new(
            p.x.max(self.min.x).min(self.max.x),
            p.y.max(self.min.y).min(self.max.y),
        );
        p.distance(clamped)
    }
}

/// A set of polylines, along with a view bounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    pub bounds: Bounds,
    pub polylines: Vec<Polyline>,
}

impl Drawing {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            polylines: Vec::new(),
        }
    }

    /// Starts a new polyline at `p`, unless the last polyline already ends
    /// exactly there, in which case subsequent segments chain onto it.
    pub fn move_to(&mut self, p: Point) {
        if let Some(last) = self.polylines.last() {
            if last.points.last() == Some(&p) {
                return;
            }
        }
        self.polylines.push(Polyline::new(vec![p]));
    }

    /// Extends the last polyline with an edge to `p`.
    pub fn line_to(&mut self, p: Point) {
        match self.polylines.last_mut() {
            Some(last) => last.points.push(p),
            None => self.polylines.push(Polyline::new(vec![p])),
        }
    }

    /// Adjusts the bounds to exactly contain the polylines.
    /// If there are no points, the bounds are set to zero.
    pub fn tighten_bounds(&mut self) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut seen = false;
        for polyline in &self.polylines {
            for v in &polyline.points {
                seen = true;
                min.x = min.x.min(v.x);
                min.y = min.y.min(v.y);
                max.x = max.x.max(v.x);
                max.y = max.y.max(v.y);
            }
        }
        self.bounds = if seen {
            Bounds::new(min, max)
        } else {
            Bounds::default()
        };
    }

    /// Moves all polylines and the bounds by the given displacement.
    pub fn translate(&mut self, delta: Point) {
        for polyline in &mut self.polylines {
            for v in &mut polyline.points {
                *v = *v + delta;
            }
        }
        self.bounds = Bounds::new(self.bounds.min + delta, self.bounds.max + delta);
    }

    /// Rotates all polylines by `theta` radians about the center of the
    /// bounds. The bounds become the axis-aligned box containing the four
    /// rotated corners of the original bounds, which keeps the framing
    /// stable even when the content hull shrinks.
    pub fn rotate(&mut self, theta: f64) {
        let c = self.bounds.center();
        let m = Transform::translate(c.x, c.y)
            .compose(&Transform::rotate(theta))
            .compose(&Transform::translate(-c.x, -c.y));
        for polyline in &mut self.polylines {
            for v in &mut polyline.points {
                *v = m.apply(*v);
            }
        }

        let corners = [self.bounds.min.x, self.bounds.max.x];
        let corners_y = [self.bounds.min.y, self.bounds.max.y];
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &x in &corners {
            for &y in &corners_y {
                let v = m.apply(Point::new(x, y));
                min.x = min.x.min(v.x);
                min.y = min.y.min(v.y);
                max.x = max.x.max(v.x);
                max.y = max.y.max(v.y);
            }
        }
        self.bounds = Bounds::new(min, max);
    }

    /// Resizes all polylines so that the rectangle forming the current
    /// bounds becomes the new bounds, scaling each axis independently.
    /// The bounds are updated to the new bounds.
    ///
    /// Only meaningful when the current bounds have positive width and
    /// height. Fitting the bounds onto themselves is an exact no-op.
    pub fn fit_to(&mut self, nb: Bounds) {
        let ob = self.bounds;
        for polyline in &mut self.polylines {
            for v in &mut polyline.points {
                let mut x = v.x;
                x -= ob.min.x;
                x /= ob.max.x - ob.min.x;
                x *= nb.max.x - nb.min.x;
                x += nb.min.x;

                let mut y = v.y;
                y -= ob.min.y;
                y /= ob.max.y - ob.min.y;
                y *= nb.max.y - nb.min.y;
                y += nb.min.y;

                *v = Point::new(x, y);
            }
        }
        self.bounds = nb;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polyline(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn translate_shifts_points_and_bounds() {
        let mut d = Drawing::new(Bounds::new(Point::ZERO, Point::new(200.0, 100.0)));
        d.polylines.push(polyline(&[(50.0, 20.0), (100.0, 40.0)]));
        d.translate(Point::new(100.0, 0.0));
        assert_eq!(
            d.bounds,
            Bounds::new(Point::new(100.0, 0.0), Point::new(300.0, 100.0))
        );
        assert_eq!(d.polylines, vec![polyline(&[(150.0, 20.0), (200.0, 40.0)])]);
    }

    #[test]
    fn fit_to_own_bounds_is_identity() {
        let bounds = Bounds::new(Point::new(10.0, 20.0), Point::new(110.0, 220.0));
        let mut d = Drawing::new(bounds);
        d.polylines
            .push(polyline(&[(10.0, 20.0), (60.0, 120.0), (110.0, 220.0)]));
        let before = d.clone();
        d.fit_to(bounds);
        assert_eq!(d, before);
    }

    #[test]
    fn fit_to_scales_each_axis_independently() {
        let mut d = Drawing::new(Bounds::new(Point::ZERO, Point::new(10.0, 10.0)));
        d.polylines.push(polyline(&[(0.0, 0.0), (5.0, 10.0)]));
        d.fit_to(Bounds::new(Point::ZERO, Point::new(100.0, 20.0)));
        assert_eq!(d.polylines, vec![polyline(&[(0.0, 0.0), (50.0, 20.0)])]);
    }

    #[test]
    fn tighten_bounds_hugs_content() {
        let mut d = Drawing::new(Bounds::new(Point::ZERO, Point::new(1000.0, 1000.0)));
        d.polylines.push(polyline(&[(5.0, 7.0), (30.0, -2.0)]));
        d.tighten_bounds();
        assert_eq!(
            d.bounds,
            Bounds::new(Point::new(5.0, -2.0), Point::new(30.0, 7.0))
        );
    }

    #[test]
    fn tighten_bounds_of_empty_drawing_is_zero() {
        let mut d = Drawing::new(Bounds::new(Point::ZERO, Point::new(100.0, 100.0)));
        d.tighten_bounds();
        assert_eq!(d.bounds, Bounds::default());
    }

    #[test]
    fn rotate_half_turn_maps_corners_onto_frame() {
        let mut d = Drawing::new(Bounds::new(Point::ZERO, Point::new(100.0, 50.0)));
        d.polylines.push(polyline(&[(0.0, 0.0), (100.0, 50.0)]));
        d.rotate(std::f64::consts::PI);
        // A half turn about the center maps the bounds onto themselves.
        assert!((d.bounds.min.x - 0.0).abs() < 1e-9);
        assert!((d.bounds.min.y - 0.0).abs() < 1e-9);
        assert!((d.bounds.max.x - 100.0).abs() < 1e-9);
        assert!((d.bounds.max.y - 50.0).abs() < 1e-9);
        let p = d.polylines[0].points[0];
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn move_to_merges_when_continuing_from_last_point() {
        let mut d = Drawing::default();
        d.move_to(Point::new(0.0, 0.0));
        d.line_to(Point::new(1.0, 0.0));
        d.move_to(Point::new(1.0, 0.0));
        d.line_to(Point::new(2.0, 0.0));
        assert_eq!(d.polylines.len(), 1);
        assert_eq!(d.polylines[0].len(), 3);

        d.move_to(Point::new(5.0, 5.0));
        d.line_to(Point::new(6.0, 5.0));
        assert_eq!(d.polylines.len(), 2);
    }

    #[test]
    fn distance_to_bounds_is_zero_inside() {
        let b = Bounds::new(Point::ZERO, Point::new(10.0, 10.0));
        assert_eq!(b.distance_to(Point::new(5.0, 5.0)), 0.0);
        assert_eq!(b.distance_to(Point::new(13.0, 14.0)), 5.0);
    }
}
