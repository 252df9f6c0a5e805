//! Ramer–Douglas–Peucker polyline simplification.

use plotkit_core::{Drawing, Point};

/// Distance from `v` to the segment from `s` to `e`, clamped to the
/// endpoint distances so a point whose perpendicular foot falls outside
/// the segment is measured to the nearer endpoint.
fn segment_distance(v: Point, s: Point, e: Point) -> f64 {
    let ds = v.distance(s);
    let de = v.distance(e);
    let diff = e - s;
    let dlen = (diff.x * diff.x + diff.y * diff.y).sqrt();
    if dlen == 0.0 {
        return ds;
    }
    let dp = (diff.y * v.x - diff.x * v.y + e.x * s.y - e.y * s.x).abs() / dlen;
    dp.min(ds).min(de)
}

fn simplify_points(v: &[Point], tol: f64) -> Vec<Point> {
    if v.len() <= 2 {
        return v.to_vec();
    }
    let mut worst = 0;
    let mut worst_d = 0.0;
    for i in 1..v.len() - 1 {
        let d = segment_distance(v[i], v[0], v[v.len() - 1]);
        if d > worst_d {
            worst = i;
            worst_d = d;
        }
    }
    if worst_d <= tol {
        return vec![v[0], v[v.len() - 1]];
    }
    let mut left = simplify_points(&v[..=worst], tol);
    let right = simplify_points(&v[worst..], tol);
    left.extend_from_slice(&right[1..]);
    left
}

/// Removes points from polylines, with the guarantee that every removed
/// point is within the given tolerance of the simplified polyline.
/// A tolerance of zero or less disables simplification entirely.
pub fn simplify(drawing: &mut Drawing, tol: f64) {
    if tol <= 0.0 {
        return;
    }
    for p in &mut drawing.polylines {
        p.points = simplify_points(&p.points, tol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_core::{Bounds, Polyline};

    fn polyline(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    fn simplified(p: Polyline, tol: f64) -> Vec<Polyline> {
        let mut d = Drawing {
            bounds: Bounds::new(Point::new(-1000.0, -1000.0), Point::new(1000.0, 1000.0)),
            polylines: vec![p],
        };
        simplify(&mut d, tol);
        d.polylines
    }

    #[test]
    fn removes_midpoint_within_tolerance() {
        let got = simplified(polyline(&[(-1.0, 0.0), (0.0, 0.25), (1.0, 0.0)]), 0.5);
        assert_eq!(got, vec![polyline(&[(-1.0, 0.0), (1.0, 0.0)])]);
    }

    #[test]
    fn keeps_midpoint_beyond_tolerance() {
        let original = polyline(&[(-1.0, 0.0), (0.0, 0.5), (1.0, 0.0)]);
        let got = simplified(original.clone(), 0.2);
        assert_eq!(got, vec![original]);
    }

    #[test]
    fn square_with_displaced_edge_midpoints() {
        let got = simplified(
            polyline(&[
                (-1.0, -1.0),
                (0.0, -1.1),
                (1.0, -1.0),
                (0.9, 0.0),
                (1.0, 1.0),
                (0.0, 1.1),
                (-1.0, 1.0),
                (-0.9, 0.0),
                (-1.0, -1.0),
            ]),
            0.2,
        );
        assert_eq!(
            got,
            vec![polyline(&[
                (-1.0, -1.0),
                (1.0, -1.0),
                (1.0, 1.0),
                (-1.0, 1.0),
                (-1.0, -1.0),
            ])]
        );
    }

    #[test]
    fn zero_tolerance_disables_simplification() {
        let original = polyline(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let got = simplified(original.clone(), 0.0);
        assert_eq!(got, vec![original]);
    }

    #[test]
    fn removed_points_stay_within_tolerance() {
        // A sine-ish wiggle: every dropped point must be within tol of the
        // simplified polyline.
        let tol = 0.3;
        let original: Vec<Point> = (0..=40)
            .map(|i| {
                let x = i as f64 * 0.25;
                Point::new(x, (x * 0.7).sin() * 0.2)
            })
            .collect();
        let got = simplified(Polyline::new(original.clone()), tol);
        let kept = &got[0].points;
        for v in &original {
            let mut best = f64::INFINITY;
            for seg in kept.windows(2) {
                best = best.min(segment_distance(*v, seg[0], seg[1]));
            }
            assert!(best <= tol + 1e-9, "point {v:?} drifted {best}");
        }
    }
}
