//! Parse → serialize → parse round trips.

use plotkit_paths::{from_svg, write_svg};

// A representative input containing paths and groups with nested
// transforms applied to them.
const NESTED_TRANSFORMS: &str = r#"
<svg width="2000" height="1000">
   <path d="M 123, 456 321, 654"/>
   <g transform="translate(200, 100) scale(2)" stroke="black" fill="none">
       <path d="M100,50 300, 200"/>
       <g transform="translate(50,50)">
           <path d="M 50, 50 250, 50 150, 100"/>
       </g>
   </g>
</svg>"#;

#[test]
fn svg_round_trip_is_identity() {
    let first = from_svg(NESTED_TRANSFORMS.as_bytes()).expect("failed to parse svg");
    assert!(!first.polylines.is_empty(), "expected some polylines");

    let mut buf = Vec::new();
    write_svg(&first, &mut buf).expect("failed to write svg");

    let second = from_svg(buf.as_slice()).expect("failed to re-parse svg");
    assert_eq!(first, second);
}
