//! Cohen–Sutherland segment clipping.
//!
//! Each segment of a polyline is clipped against an axis-aligned box
//! independently; surviving pieces are stitched back into sub-polylines,
//! so a polyline that crosses the box edge becomes several polylines.

use plotkit_core::{Bounds, Drawing, Point, Polyline};

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// The 4-bit region code classifying a point against the clip box.
fn outcode(v: Point, b: &Bounds) -> u8 {
    let mut code = 0;
    if v.x < b.min.x {
        code |= LEFT;
    } else if v.x > b.max.x {
        code |= RIGHT;
    }
    if v.y < b.min.y {
        code |= BOTTOM;
    } else if v.y > b.max.y {
        code |= TOP;
    }
    code
}

/// Clips one segment, returning the surviving portion if any.
fn clip_segment(mut v0: Point, mut v1: Point, b: &Bounds) -> Option<(Point, Point)> {
    let mut code0 = outcode(v0, b);
    let mut code1 = outcode(v1, b);
    loop {
        if code0 == 0 && code1 == 0 {
            return Some((v0, v1));
        }
        if code0 & code1 != 0 {
            return None;
        }
        let out = code0.max(code1);
        // The out endpoint has at least one edge bit set and the other
        // endpoint is on the opposite side of that edge, so the divisor
        // below is never zero.
        let v = if out & TOP != 0 {
            Point::new(
                v0.x + (v1.x - v0.x) * (b.max.y - v0.y) / (v1.y - v0.y),
                b.max.y,
            )
        } else if out & BOTTOM != 0 {
            Point::new(
                v0.x + (v1.x - v0.x) * (b.min.y - v0.y) / (v1.y - v0.y),
                b.min.y,
            )
        } else if out & RIGHT != 0 {
            Point::new(
                b.max.x,
                v0.y + (v1.y - v0.y) * (b.max.x - v0.x) / (v1.x - v0.x),
            )
        } else {
            Point::new(
                b.min.x,
                v0.y + (v1.y - v0.y) * (b.min.x - v0.x) / (v1.x - v0.x),
            )
        };
        if out == code0 {
            v0 = v;
            code0 = outcode(v0, b);
        } else {
            v1 = v;
            code1 = outcode(v1, b);
        }
    }
}

/// Clips a polyline, splitting it wherever segments leave the box.
fn clip_polyline(p: &Polyline, b: &Bounds) -> Vec<Polyline> {
    let mut parts: Vec<Polyline> = Vec::new();
    let mut continued = false;
    for i in 1..p.points.len() {
        let (v0, v1) = match clip_segment(p.points[i - 1], p.points[i], b) {
            Some(seg) => seg,
            None => {
                continued = false;
                continue;
            }
        };
        if v0 != p.points[i - 1] || !continued {
            parts.push(Polyline::new(vec![v0]));
        }
        if let Some(part) = parts.last_mut() {
            part.points.push(v1);
        }
        continued = v1 == p.points[i];
    }
    parts.retain(|part| part.len() >= 2);
    parts
}

/// Removes all line segments outside the given bounds.
/// Polylines that cross the bounds are broken into multiple polylines.
pub fn clip(drawing: &mut Drawing, b: Bounds) {
    let mut result = Vec::new();
    for p in &drawing.polylines {
        result.extend(clip_polyline(p, &b));
    }
    drawing.polylines = result;
}
