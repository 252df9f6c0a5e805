//! The builtin block-script font description.
//!
//! The block-script glyph SVG lays its characters out on a 10mm grid,
//! six rows of them, each glyph in a group named after the character
//! (`capital_A`, `lower_a`, `digit_0`, and spelled-out names for the
//! punctuation). The dot of each glyph sits 2mm in from the left of its
//! cell and 2mm up from the cell bottom.

use crate::{FontConfig, GlyphConfig};
use plotkit_core::Point;
use std::collections::HashMap;

const ROWS: [&str; 6] = [
    "ABCDEFGHIJKLM",
    "NOPQRSTUVWXYZ",
    "abcdefghijklm",
    "nopqrstuvwxyz",
    "012345679",
    ".,-'",
];

fn glyph_id(c: char) -> String {
    match c {
        '.' => "stop".to_string(),
        ',' => "comma".to_string(),
        '-' => "dash".to_string(),
        '\'' => "apostrophe".to_string(),
        c if c.is_ascii_uppercase() => format!("capital_{c}"),
        c if c.is_ascii_lowercase() => format!("lower_{c}"),
        c => format!("digit_{c}"),
    }
}

/// The font description matching `data/blockscript.svg`.
pub fn config() -> FontConfig {
    let mut glyphs = HashMap::new();
    for (i, row) in ROWS.iter().enumerate() {
        for (j, c) in row.chars().enumerate() {
            glyphs.insert(
                c,
                GlyphConfig {
                    dot: Point::new(j as f64 * 10.0 + 2.0, (i as f64 + 1.0) * 10.0 - 2.0),
                    id: glyph_id(c),
                    delta_advance: 0.0,
                },
            );
        }
    }
    FontConfig {
        glyphs,
        advance_char: Some('x'),
        advance_factor: 0.15,
        space_char: Some('x'),
        space_factor: 1.3,
        line_char: Some('I'),
        line_factor: 1.9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_grid_character_is_mapped() {
        let config = config();
        assert_eq!(config.glyphs.len(), 13 * 4 + 9 + 4);
        assert_eq!(config.glyphs[&'A'].id, "capital_A");
        assert_eq!(config.glyphs[&'A'].dot, Point::new(2.0, 8.0));
        assert_eq!(config.glyphs[&'z'].id, "lower_z");
        assert_eq!(config.glyphs[&'z'].dot, Point::new(122.0, 38.0));
        assert_eq!(config.glyphs[&'0'].id, "digit_0");
        assert_eq!(config.glyphs[&'\''].id, "apostrophe");
    }
}
