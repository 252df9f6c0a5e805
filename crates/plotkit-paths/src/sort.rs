//! Greedy nearest-endpoint path ordering.
//!
//! Reorders polylines to reduce pen-up travel between the end of one
//! polyline and the start of the next. Candidate traversals ("verticles")
//! are indexed in a kd-tree on their start points; the tour greedily pops
//! the nearest live verticle to the current pen position, expanding the
//! search radius until one is found.

use plotkit_core::{Bounds, Drawing, Point};
use std::collections::HashSet;

/// Options for path sorting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortConfig {
    /// Allow continuous polylines to be split into their segments.
    pub split: bool,
    /// Allow polylines to be drawn in the reverse direction.
    pub reverse: bool,
}

/// One directed traversal of a contiguous run of a polyline: from the
/// point at `start` to the point at `end`. When `end < start` the run is
/// drawn backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Verticle {
    path: usize,
    start: usize,
    end: usize,
}

impl Verticle {
    fn reversed(self) -> Self {
        Verticle {
            path: self.path,
            start: self.end,
            end: self.start,
        }
    }
}

fn start_point(drawing: &Drawing, v: Verticle) -> Point {
    drawing.polylines[v.path].points[v.start]
}

fn end_point(drawing: &Drawing, v: Verticle) -> Point {
    drawing.polylines[v.path].points[v.end]
}

const LEAF_THRESHOLD: usize = 20;

/// A kd-tree node over verticle start points. Kept as a tagged variant
/// rather than trait objects; the radius search is a hot path.
enum Node {
    Internal {
        at: Point,
        v: Verticle,
        yaxis: bool,
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
    Leaf(Vec<(Point, Verticle)>),
}

fn build_node(drawing: &Drawing, vs: &mut [Verticle], yaxis: bool) -> Option<Box<Node>> {
    if vs.is_empty() {
        return None;
    }
    if vs.len() < LEAF_THRESHOLD {
        let entries = vs.iter().map(|&v| (start_point(drawing, v), v)).collect();
        return Some(Box::new(Node::Leaf(entries)));
    }
    // Median by sorting: not optimal, but fast enough. Verticles that
    // share a coordinate may land on either side.
    vs.sort_unstable_by(|a, b| {
        let pa = start_point(drawing, *a);
        let pb = start_point(drawing, *b);
        let (ka, kb) = if yaxis { (pa.y, pb.y) } else { (pa.x, pb.x) };
        ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
    });
    let k = vs.len() / 2;
    let at = start_point(drawing, vs[k]);
    let v = vs[k];
    let (lo, rest) = vs.split_at_mut(k);
    let (_, hi) = rest.split_at_mut(1);
    Some(Box::new(Node::Internal {
        at,
        v,
        yaxis,
        left: build_node(drawing, lo, !yaxis),
        right: build_node(drawing, hi, !yaxis),
    }))
}

/// Spatial index of verticles. Consumed verticles are marked dead in the
/// live set instead of being removed from the tree; rebalancing costs
/// more than filtering.
struct VerticleIndex {
    min_radius: f64,
    live: HashSet<Verticle>,
    root: Option<Box<Node>>,
}

impl VerticleIndex {
    fn new(drawing: &Drawing, mut vs: Vec<Verticle>, min_radius: f64) -> Self {
        let live = vs.iter().copied().collect();
        let root = build_node(drawing, &mut vs, false);
        Self {
            min_radius,
            live,
            root,
        }
    }

    /// Collects all live verticles within `r` of `pos`. `bounds` is the
    /// slab accumulated from the split values along the path from the
    /// root, used to prune subtrees that cannot intersect the circle.
    fn find_radius(
        &self,
        node: Option<&Node>,
        pos: Point,
        r: f64,
        bounds: Bounds,
        out: &mut Vec<(f64, Verticle)>,
    ) {
        let node = match node {
            Some(n) => n,
            None => return,
        };
        match node {
            Node::Leaf(entries) => {
                for &(x, v) in entries {
                    let d = x.distance(pos);
                    if d <= r && self.live.contains(&v) {
                        out.push((d, v));
                    }
                }
            }
            Node::Internal {
                at,
                v,
                yaxis,
                left,
                right,
            } => {
                let d = at.distance(pos);
                if d <= r && self.live.contains(v) {
                    out.push((d, *v));
                }

                let (pos_c, split_c) = if *yaxis { (pos.y, at.y) } else { (pos.x, at.x) };
                let axdist = (pos_c - split_c).abs();
                let on_left = pos_c <= split_c;

                let mut low = bounds;
                let mut high = bounds;
                if *yaxis {
                    low.max.y = split_c;
                    high.min.y = split_c;
                } else {
                    low.max.x = split_c;
                    high.min.x = split_c;
                }
                let (near, near_b, far, far_b) = if on_left {
                    (left, low, right, high)
                } else {
                    (right, high, left, low)
                };
                self.find_radius(near.as_deref(), pos, r, near_b, out);
                if axdist <= r && far_b.distance_to(pos) <= r {
                    self.find_radius(far.as_deref(), pos, r, far_b, out);
                }
            }
        }
    }

    /// Removes and returns the nearest live verticle to `pos`, retrying
    /// with a doubled radius until one is found. Its reverse, if indexed,
    /// dies with it.
    fn pop_nearest(&mut self, pos: Point) -> Verticle {
        let mut r = self.min_radius;
        let mut cands = Vec::new();
        loop {
            let slab = Bounds::new(Point::new(-1e19, -1e19), Point::new(1e19, 1e19));
            cands.clear();
            self.find_radius(self.root.as_deref(), pos, r, slab, &mut cands);
            if !cands.is_empty() {
                // Strict comparison keeps the first-encountered candidate
                // on ties.
                let mut best = 0;
                for i in 1..cands.len() {
                    if cands[i].0 < cands[best].0 {
                        best = i;
                    }
                }
                let v = cands[best].1;
                self.live.remove(&v);
                self.live.remove(&v.reversed());
                return v;
            }
            r *= 2.0;
        }
    }
}

/// Greedily orders `want` verticles starting from the pen origin,
/// following each chosen verticle to its end point.
fn sort_verticles(drawing: &Drawing, vs: Vec<Verticle>, want: usize) -> Vec<Verticle> {
    // Start the radius at a hundredth of the drawing width, clamped away
    // from zero so the doubling search always terminates.
    let min_radius = (drawing.bounds.width() / 100.0).max(1e-9);
    let mut index = VerticleIndex::new(drawing, vs, min_radius);
    let mut result = Vec::with_capacity(want);
    let mut pos = Point::ZERO;
    while result.len() < want {
        let v = index.pop_nearest(pos);
        pos = end_point(drawing, v);
        result.push(v);
    }
    result
}

/// Reorders polylines to reduce the movement between the end of one
/// polyline and the start of the next, to improve rendering time on a
/// physical xy plotter.
pub fn sort(drawing: &mut Drawing, cfg: &SortConfig) {
    // Construct the verticles: one per segment when splitting is allowed,
    // one per polyline otherwise, plus the reversed form of each when
    // reversal is allowed.
    let mut vs = Vec::new();
    for (i, p) in drawing.polylines.iter().enumerate() {
        if p.points.is_empty() {
            continue;
        }
        if cfg.split {
            for j in 0..p.points.len().saturating_sub(1) {
                vs.push(Verticle {
                    path: i,
                    start: j,
                    end: j + 1,
                });
                if cfg.reverse {
                    vs.push(Verticle {
                        path: i,
                        start: j + 1,
                        end: j,
                    });
                }
            }
        } else {
            vs.push(Verticle {
                path: i,
                start: 0,
                end: p.points.len() - 1,
            });
            if cfg.reverse {
                vs.push(Verticle {
                    path: i,
                    start: p.points.len() - 1,
                    end: 0,
                });
            }
        }
    }
    let mut want = vs.len();
    if cfg.reverse {
        want /= 2;
    }
    let tour = sort_verticles(drawing, vs, want);

    let mut sorted = Drawing::new(drawing.bounds);
    for v in tour {
        let step: isize = if v.end < v.start { -1 } else { 1 };
        let mut i = v.start as isize;
        while i != v.end as isize {
            sorted.move_to(drawing.polylines[v.path].points[i as usize]);
            sorted.line_to(drawing.polylines[v.path].points[(i + step) as usize]);
            i += step;
        }
    }
    *drawing = sorted;
}
