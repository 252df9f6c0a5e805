//! End-to-end pipeline coverage: ingest, fit, clip, simplify, sort.

use plotkit_core::{Bounds, Point};
use plotkit_paths::{clip, from_svg, simplify, sort, SortConfig};

#[test]
fn full_pipeline_produces_a_plot_ready_drawing() {
    let svg = r#"
<svg width="100" height="100">
   <path d="M 10 10 90 10 90 90 10 90 Z"/>
   <g transform="translate(50, 50)">
       <path d="M -60 0 60 0"/>
   </g>
   <path d="M 20 20 C 20 20 80 20 80 20"/>
</svg>"#;

    let mut drawing = from_svg(svg.as_bytes()).expect("parse failed");
    assert_eq!(drawing.polylines.len(), 3);

    // Scale the 100x100 source onto a 200x200 target with a 10mm offset.
    let target = Bounds::new(Point::new(10.0, 10.0), Point::new(210.0, 210.0));
    drawing.fit_to(target);
    assert_eq!(drawing.bounds, target);

    // The translated horizontal rule pokes out both sides and gets
    // trimmed back to the frame.
    let bounds = drawing.bounds;
    clip(&mut drawing, bounds);
    for p in &drawing.polylines {
        for v in &p.points {
            assert!(v.x >= bounds.min.x - 1e-9 && v.x <= bounds.max.x + 1e-9);
            assert!(v.y >= bounds.min.y - 1e-9 && v.y <= bounds.max.y + 1e-9);
        }
    }

    // The flattened Bézier collapses back to its chord.
    simplify(&mut drawing, 0.1);
    let flat_rule = drawing
        .polylines
        .iter()
        .find(|p| p.points.iter().all(|v| (v.y - 50.0).abs() < 1e-6))
        .expect("flattened curve missing");
    assert_eq!(flat_rule.len(), 2);

    let total_segments: usize = drawing
        .polylines
        .iter()
        .map(|p| p.points.len().saturating_sub(1))
        .sum();
    sort(
        &mut drawing,
        &SortConfig {
            split: true,
            reverse: true,
        },
    );
    let sorted_segments: usize = drawing
        .polylines
        .iter()
        .map(|p| p.points.len().saturating_sub(1))
        .sum();
    assert_eq!(sorted_segments, total_segments);
}
