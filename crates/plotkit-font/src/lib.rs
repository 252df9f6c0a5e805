//! # Plotkit Font
//!
//! A stroke-font engine for pen plotters. A font here is not an outline
//! font: it is an ordinary SVG file whose groups or paths carry ids
//! naming each glyph, drawn as pen strokes. A [`FontConfig`] says where
//! each glyph sits in that file (its "dot", the baseline/left-bearing
//! origin) and how advances are derived; [`Font::new`] extracts the
//! glyph geometry, and [`Font::layout`] typesets a string into positioned
//! glyph references that [`placed_to_drawing`] flattens into a
//! [`Drawing`].

pub mod blockscript;
pub mod error;

pub use error::{FontError, Result};

use plotkit_core::{Drawing, Point, Polyline, Transform};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Where to find one glyph in the font's SVG file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphConfig {
    /// The glyph origin in the SVG: baseline height, left side-bearing.
    pub dot: Point,
    /// The id of the group or path carrying the glyph's strokes.
    pub id: String,
    /// Extra advance for this glyph on top of the computed one.
    #[serde(default)]
    pub delta_advance: f64,
}

/// Describes an SVG file that contains glyphs for a font.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// How to extract glyphs from the SVG, per character.
    pub glyphs: HashMap<char, GlyphConfig>,
    /// If set, the advance is scaled by the width of this character.
    pub advance_char: Option<char>,
    /// Advance added to each glyph's width.
    pub advance_factor: f64,
    /// If set, the space advance is scaled by the width of this character.
    pub space_char: Option<char>,
    /// Advance used for a space.
    pub space_factor: f64,
    /// If set, the line advance is scaled by the height of this character.
    pub line_char: Option<char>,
    /// How much to advance the y coordinate to start a new line.
    pub line_factor: f64,
}

impl FontConfig {
    /// Loads a font description from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// The strokes of a single character, in glyph-local coordinates: the
/// dot at (0, 0), ink extending into positive x and negative y.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub width: f64,
    pub height: f64,
    pub advance: f64,
    pub drawing: Drawing,
}

/// A typeface made up of pen strokes.
#[derive(Debug, Clone)]
pub struct Font {
    pub line_advance: f64,
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    /// Builds a font from the given SVG stream.
    ///
    /// Each configured glyph is extracted by id, its bounds tightened,
    /// and its geometry translated so the configured dot lands on the
    /// origin. A space glyph with zero geometry is always inserted.
    pub fn new<R: Read>(svg: R, config: &FontConfig) -> Result<Font> {
        let ids: Vec<String> = config.glyphs.values().map(|g| g.id.clone()).collect();
        let mut by_id = plotkit_paths::ids_from_svg(svg, &ids)?;

        let mut glyphs = HashMap::new();
        for (&ch, gc) in &config.glyphs {
            let mut drawing = by_id.remove(&gc.id).unwrap_or_default();
            if drawing.polylines.is_empty() {
                return Err(FontError::EmptyGlyph(gc.id.clone()));
            }
            drawing.tighten_bounds();
            drawing.translate(Point::new(-gc.dot.x, -gc.dot.y));
            let width = drawing.bounds.max.x;
            let height = -drawing.bounds.min.y;
            glyphs.insert(
                ch,
                Glyph {
                    width,
                    height,
                    advance: 0.0,
                    drawing,
                },
            );
        }

        fn reference_metric(
            glyphs: &HashMap<char, Glyph>,
            c: Option<char>,
            purpose: &'static str,
            metric: impl Fn(&Glyph) -> f64,
        ) -> Result<f64> {
            match c {
                None => Ok(1.0),
                Some(ch) => glyphs
                    .get(&ch)
                    .map(metric)
                    .ok_or(FontError::MissingReference { purpose, ch }),
            }
        }

        let line_advance =
            reference_metric(&glyphs, config.line_char, "line", |g| g.height)? * config.line_factor;

        let advance = reference_metric(&glyphs, config.advance_char, "advance", |g| g.width)?
            * config.advance_factor;
        for (ch, glyph) in glyphs.iter_mut() {
            glyph.advance = glyph.width + advance + config.glyphs[ch].delta_advance;
        }

        let space = reference_metric(&glyphs, config.space_char, "space", |g| g.width)?
            * config.space_factor;
        glyphs.insert(
            ' ',
            Glyph {
                width: 0.0,
                height: 0.0,
                advance: space,
                drawing: Drawing::default(),
            },
        );

        Ok(Font {
            line_advance,
            glyphs,
        })
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    /// The scale at which the glyph for `c` is `height` units tall.
    pub fn scale_from_char_height(&self, c: char, height: f64) -> Result<f64> {
        let g = self.glyph(c).ok_or(FontError::NoGlyph(c))?;
        if g.height == 0.0 {
            return Err(FontError::ZeroHeight(c));
        }
        Ok(height / g.height)
    }

    /// Typesets `text` at the given scale, breaking lines at `max_width`.
    ///
    /// The text splits into runs: a run is either a maximal sequence of
    /// newlines or a maximal sequence of non-space characters. A line
    /// break is inserted before a run that would overflow `max_width`
    /// (measuring each glyph by its advance except the last, which
    /// counts its width only); newline runs force one break per newline;
    /// runs on the same line are separated by a single space advance.
    pub fn layout(&self, text: &str, scale: f64, max_width: f64) -> Result<Vec<PlacedGlyph<'_>>> {
        let words = split_words(text);
        let space_advance = self.glyph(' ').map_or(0.0, |g| g.advance);

        let mut placed = Vec::new();
        let mut point = Point::ZERO;
        let mut line = 0usize; // glyphs output on the current line

        for word in words {
            if line > 0 {
                point.x += space_advance * scale;
            }
            let mut word_width = 0.0;
            for (i, &c) in word.iter().enumerate() {
                if c == '\n' {
                    continue;
                }
                let g = self.glyph(c).ok_or(FontError::NoGlyph(c))?;
                word_width += if i + 1 == word.len() {
                    g.width * scale
                } else {
                    g.advance * scale
                };
            }
            if line > 0 && point.x + word_width > max_width {
                line = 0;
                point.x = 0.0;
                point.y += self.line_advance * scale;
            }
            for &c in &word {
                if c == '\n' {
                    line = 0;
                    point.x = 0.0;
                    point.y += self.line_advance * scale;
                    continue;
                }
                let glyph = self.glyph(c).ok_or(FontError::NoGlyph(c))?;
                placed.push(PlacedGlyph {
                    pos: point,
                    scale,
                    glyph,
                });
                point.x += glyph.advance * scale;
                line += 1;
            }
        }
        Ok(placed)
    }
}

/// A glyph positioned by layout. The geometry is shared from the font;
/// it is materialized only when flattened by [`placed_to_drawing`].
#[derive(Debug, Clone, Copy)]
pub struct PlacedGlyph<'a> {
    pub pos: Point,
    pub scale: f64,
    pub glyph: &'a Glyph,
}

/// Splits text into runs of newlines and runs of non-space characters.
/// Interior spaces separate runs and are not themselves runs.
fn split_words(text: &str) -> Vec<Vec<char>> {
    fn class(c: char) -> u8 {
        if c == '\n' {
            0
        } else if c.is_whitespace() {
            1
        } else {
            2
        }
    }

    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        while i < chars.len() && chars[i] != '\n' && chars[i].is_whitespace() {
            i += 1;
        }
        let mut word = Vec::new();
        while i < chars.len() {
            let c = chars[i];
            if !word.is_empty() && class(c) != class(word[0]) {
                break;
            }
            word.push(c);
            i += 1;
        }
        if !word.is_empty() {
            words.push(word);
        }
    }
    words
}

/// Flattens positioned glyphs into a drawing, applying each placement's
/// scale and position plus a global offset, then tightening the bounds.
pub fn placed_to_drawing(offset: Point, placed: &[PlacedGlyph]) -> Drawing {
    let mut drawing = Drawing::default();
    for pg in placed {
        let m = Transform::matrix(
            pg.scale,
            0.0,
            0.0,
            pg.scale,
            pg.pos.x + offset.x,
            pg.pos.y + offset.y,
        );
        for p in &pg.glyph.drawing.polylines {
            drawing
                .polylines
                .push(Polyline::new(p.points.iter().map(|&v| m.apply(v)).collect()));
        }
    }
    drawing.tighten_bounds();
    drawing
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLYPH_SVG: &str = r#"
<svg width="100" height="100">
  <g id="glyph_x"><path d="M 0 10 4 6"/></g>
  <g id="glyph_a"><path d="M 10 10 16 2"/></g>
  <g id="glyph_o"><path d="M 20 10 24 10"/></g>
</svg>"#;

    fn test_config() -> FontConfig {
        let mut glyphs = HashMap::new();
        glyphs.insert(
            'x',
            GlyphConfig {
                dot: Point::new(0.0, 10.0),
                id: "glyph_x".to_string(),
                delta_advance: 0.0,
            },
        );
        glyphs.insert(
            'A',
            GlyphConfig {
                dot: Point::new(10.0, 10.0),
                id: "glyph_a".to_string(),
                delta_advance: 0.0,
            },
        );
        glyphs.insert(
            'o',
            GlyphConfig {
                dot: Point::new(20.0, 10.0),
                id: "glyph_o".to_string(),
                delta_advance: 0.0,
            },
        );
        FontConfig {
            glyphs,
            advance_char: Some('x'),
            advance_factor: 0.5,
            space_char: Some('x'),
            space_factor: 1.5,
            line_char: Some('A'),
            line_factor: 2.0,
        }
    }

    fn test_font() -> Font {
        Font::new(GLYPH_SVG.as_bytes(), &test_config()).expect("font build failed")
    }

    #[test]
    fn glyph_metrics_from_dot_and_tightened_bounds() {
        let font = test_font();
        let x = font.glyph('x').unwrap();
        assert_eq!((x.width, x.height), (4.0, 4.0));
        assert_eq!(x.advance, 6.0); // width 4 + 0.5 * width('x')

        let a = font.glyph('A').unwrap();
        assert_eq!((a.width, a.height), (6.0, 8.0));
        assert_eq!(a.advance, 8.0);

        assert_eq!(font.line_advance, 16.0); // 2 * height('A')

        let space = font.glyph(' ').unwrap();
        assert_eq!(space.width, 0.0);
        assert_eq!(space.advance, 6.0); // 1.5 * width('x')
        assert!(space.drawing.polylines.is_empty());
    }

    #[test]
    fn glyph_geometry_is_dot_relative() {
        let font = test_font();
        let a = font.glyph('A').unwrap();
        // The stroke ran from (10,10) to (16,2); relative to the dot at
        // (10,10) that is (0,0) to (6,-8).
        assert_eq!(
            a.drawing.polylines[0].points,
            vec![Point::new(0.0, 0.0), Point::new(6.0, -8.0)]
        );
    }

    #[test]
    fn delta_advance_is_added_per_glyph() {
        let mut config = test_config();
        config.glyphs.get_mut(&'A').unwrap().delta_advance = 1.5;
        let font = Font::new(GLYPH_SVG.as_bytes(), &config).unwrap();
        assert_eq!(font.glyph('A').unwrap().advance, 9.5);
    }

    #[test]
    fn scale_derives_from_reference_height() {
        let font = test_font();
        assert_eq!(font.scale_from_char_height('A', 16.0).unwrap(), 2.0);
        assert!(matches!(
            font.scale_from_char_height('o', 4.0),
            Err(FontError::ZeroHeight('o'))
        ));
        assert!(matches!(
            font.scale_from_char_height('Q', 4.0),
            Err(FontError::NoGlyph('Q'))
        ));
    }

    #[test]
    fn missing_glyph_geometry_is_an_error() {
        let mut config = test_config();
        config.glyphs.insert(
            'B',
            GlyphConfig {
                dot: Point::ZERO,
                id: "glyph_b".to_string(),
                delta_advance: 0.0,
            },
        );
        assert!(matches!(
            Font::new(GLYPH_SVG.as_bytes(), &config),
            Err(FontError::EmptyGlyph(_))
        ));
    }

    #[test]
    fn missing_reference_char_is_an_error() {
        let mut config = test_config();
        config.line_char = Some('Z');
        assert!(matches!(
            Font::new(GLYPH_SVG.as_bytes(), &config),
            Err(FontError::MissingReference { purpose: "line", .. })
        ));
    }

    #[test]
    fn layout_places_words_with_space_advances() {
        let font = test_font();
        let placed = font.layout("Ax A", 1.0, 100.0).unwrap();
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].pos, Point::ZERO);
        assert_eq!(placed[1].pos, Point::new(8.0, 0.0)); // advance('A')
        // After 'x' the cursor is at 14; a space advance of 6 precedes
        // the second word.
        assert_eq!(placed[2].pos, Point::new(20.0, 0.0));
    }

    #[test]
    fn layout_breaks_lines_at_max_width() {
        let font = test_font();
        let placed = font.layout("Ax A", 1.0, 21.0).unwrap();
        // The second word would end at 26 > 21, so it wraps.
        assert_eq!(placed[2].pos, Point::new(0.0, 16.0));
    }

    #[test]
    fn layout_never_breaks_at_line_start() {
        let font = test_font();
        // Even though the word is wider than the line, nothing precedes
        // it, so it stays on the first line.
        let placed = font.layout("AAAA", 1.0, 10.0).unwrap();
        assert!(placed.iter().all(|p| p.pos.y == 0.0));
    }

    #[test]
    fn newline_runs_force_breaks() {
        let font = test_font();
        let placed = font.layout("A\n\nx", 1.0, 100.0).unwrap();
        assert_eq!(placed[0].pos, Point::ZERO);
        assert_eq!(placed[1].pos, Point::new(0.0, 32.0));
    }

    #[test]
    fn layout_fails_on_unmapped_character() {
        let font = test_font();
        assert!(matches!(
            font.layout("A?", 1.0, 100.0),
            Err(FontError::NoGlyph('?'))
        ));
    }

    #[test]
    fn placed_glyphs_flatten_with_scale_and_offset() {
        let font = test_font();
        let placed = font.layout("A", 2.0, 100.0).unwrap();
        let drawing = placed_to_drawing(Point::new(5.0, 5.0), &placed);
        // Glyph stroke (0,0)->(6,-8), scaled by 2, offset by (5,5).
        assert_eq!(
            drawing.polylines[0].points,
            vec![Point::new(5.0, 5.0), Point::new(17.0, -11.0)]
        );
        assert_eq!(drawing.bounds.min, Point::new(5.0, -11.0));
        assert_eq!(drawing.bounds.max, Point::new(17.0, 5.0));
    }

    #[test]
    fn font_config_round_trips_through_json() {
        let config = test_config();
        let json = serde_json::to_string(&config).unwrap();
        let back = FontConfig::from_json(&json).unwrap();
        assert_eq!(back.glyphs.len(), config.glyphs.len());
        assert_eq!(back.advance_char, Some('x'));
        assert_eq!(back.space_factor, 1.5);
        assert_eq!(back.glyphs[&'A'].id, "glyph_a");
    }
}
