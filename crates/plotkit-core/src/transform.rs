//! 3×3 homogeneous affine transforms.

use crate::geometry::Point;

/// An affine map on homogeneous (x, y, 1) coordinates.
///
/// Composition is matrix multiplication; application divides by the
/// homogeneous coordinate, which is always 1 for the transforms this
/// crate constructs but is preserved for generality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub m: [[f64; 3]; 3],
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            m: [[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]],
        }
    }

    pub fn scale(x: f64, y: f64) -> Self {
        Self {
            m: [[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotation by `theta` radians.
    pub fn rotate(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            m: [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// The SVG `matrix(a, b, c, d, e, f)` form: `[[a, c, e], [b, d, f], [0, 0, 1]]`.
    pub fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            m: [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]],
        }
    }

    /// Returns `self * other`, the transform applying `other` first.
    pub fn compose(&self, other: &Transform) -> Transform {
        let mut r = [[0.0; 3]; 3];
        for (i, row) in r.iter_mut().enumerate() {
            for j in 0..3 {
                for (k, cell) in row.iter_mut().enumerate() {
                    *cell += self.m[i][j] * other.m[j][k];
                }
            }
        }
        Transform { m: r }
    }

    /// Applies the transform to a point.
    pub fn apply(&self, v: Point) -> Point {
        let x = [v.x, v.y, 1.0];
        let mut r = [0.0; 3];
        for i in 0..3 {
            for (j, &c) in x.iter().enumerate() {
                r[i] += self.m[i][j] * c;
            }
        }
        Point::new(r[0] / r[2], r[1] / r[2])
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn identity_leaves_points_alone() {
        let p = Point::new(3.5, -2.25);
        assert_eq!(Transform::identity().apply(p), p);
    }

    #[test]
    fn translate_then_scale_composes_left_to_right() {
        // translate(200, 100) followed by scale(2): the scale applies in
        // the translated frame, so (100, 50) -> (400, 200).
        let m = Transform::translate(200.0, 100.0).compose(&Transform::scale(2.0, 2.0));
        assert!(close(m.apply(Point::new(100.0, 50.0)), Point::new(400.0, 200.0)));
    }

    #[test]
    fn matrix_constructor_matches_svg_column_order() {
        let m = Transform::matrix(2.0, 0.0, 0.0, 3.0, 10.0, 20.0);
        assert!(close(m.apply(Point::new(1.0, 1.0)), Point::new(12.0, 23.0)));
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let m = Transform::rotate(std::f64::consts::FRAC_PI_2);
        assert!(close(m.apply(Point::new(1.0, 0.0)), Point::new(0.0, -1.0)));
        assert!(close(m.apply(Point::new(0.0, 1.0)), Point::new(1.0, 0.0)));
    }
}
