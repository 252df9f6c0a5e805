//! Error types for font construction and text layout.

use plotkit_paths::SvgError;
use thiserror::Error;

/// Errors raised while building a stroke font or laying out text.
#[derive(Error, Debug)]
pub enum FontError {
    /// The glyph SVG failed to parse.
    #[error(transparent)]
    Svg(#[from] SvgError),

    /// A configured glyph id had no geometry in the source SVG.
    #[error("no geometry found for glyph {0:?}")]
    EmptyGlyph(String),

    /// A character has no glyph in the font.
    #[error("no glyph for character {0:?}")]
    NoGlyph(char),

    /// A metrics reference character is not in the glyph table.
    #[error("{purpose} reference character {ch:?} has no glyph")]
    MissingReference { purpose: &'static str, ch: char },

    /// A scale reference character has zero height.
    #[error("character {0:?} has zero height")]
    ZeroHeight(char),

    /// A font description failed to deserialize.
    #[error("invalid font description: {0}")]
    Description(#[from] serde_json::Error),
}

/// Result type alias for font operations.
pub type Result<T> = std::result::Result<T, FontError>;
