//! Serializes a drawing back to a minimal stroked SVG.

use plotkit_core::Drawing;
use std::io::{self, BufWriter, Write};

/// Writes an SVG document containing black strokes along the polylines.
///
/// The width, height and view box are the drawing's bounds rounded down
/// to integers; content reaching beyond those rounded bounds may be
/// clipped if the output is ingested again. Degenerate polylines are
/// skipped. Output is buffered and the first I/O error is returned.
pub fn write_svg<W: Write>(drawing: &Drawing, w: W) -> io::Result<()> {
    let mut out = BufWriter::new(w);
    let b = &drawing.bounds;
    writeln!(
        out,
        r#"<svg height="{}mm" width="{}mm" viewBox="{} {} {} {}" version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#,
        b.max.y as i64,
        b.max.x as i64,
        b.min.x as i64,
        b.min.y as i64,
        (b.max.x - b.min.x) as i64,
        (b.max.y - b.min.y) as i64,
    )?;
    writeln!(out, r#"<g fill="none" stroke="black" stroke-width="0.1">"#)?;
    for p in &drawing.polylines {
        if p.is_degenerate() {
            continue;
        }
        write!(out, r#"<path d=""#)?;
        for (i, v) in p.points.iter().enumerate() {
            if i == 0 {
                write!(out, "M {:.2} {:.2}", v.x, v.y)?;
            } else {
                write!(out, " {:.2} {:.2}", v.x, v.y)?;
            }
        }
        writeln!(out, r#""/>"#)?;
    }
    write!(out, "</g></svg>")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_core::{Bounds, Point, Polyline};

    #[test]
    fn writes_single_group_with_stroked_paths() {
        let drawing = Drawing {
            bounds: Bounds::new(Point::ZERO, Point::new(200.0, 100.0)),
            polylines: vec![
                Polyline::new(vec![Point::new(1.0, 2.0), Point::new(3.5, 4.25)]),
                Polyline::new(vec![Point::new(9.0, 9.0)]),
            ],
        };
        let mut buf = Vec::new();
        write_svg(&drawing, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(
            r#"<svg height="100mm" width="200mm" viewBox="0 0 200 100" version="1.1""#
        ));
        assert!(text.contains(r#"<g fill="none" stroke="black" stroke-width="0.1">"#));
        assert!(text.contains(r#"<path d="M 1.00 2.00 3.50 4.25"/>"#));
        // The single-point polyline draws nothing and is dropped.
        assert!(!text.contains("9.00"));
        assert!(text.ends_with("</g></svg>"));
    }
}
