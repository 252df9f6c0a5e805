//! Error types for SVG ingest.

use std::io;
use thiserror::Error;

/// Errors raised while parsing an SVG document into a drawing.
///
/// Ingest is all-or-nothing: any of these aborts the parse and no partial
/// drawing is returned. Unknown child elements are not errors; they are
/// reported on the diagnostic stream and skipped.
#[derive(Error, Debug)]
pub enum SvgError {
    /// I/O error while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `<svg>`.
    #[error("root element <{0}> is not <svg>")]
    NotSvg(String),

    /// A `width`/`height` attribute is missing or unparsable.
    #[error("bad {attr} attribute {value:?} on <svg>")]
    BadDimension { attr: &'static str, value: String },

    /// A distance carried a unit suffix other than `mm`.
    #[error("{0:?} is not understood as an SVG unit")]
    UnknownUnit(String),

    /// The same element id was requested twice for scoped extraction.
    #[error("id {0:?} requested twice or more")]
    DuplicateId(String),

    /// A required attribute is missing from an element.
    #[error("missing {attr} attribute on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    /// A numeric token could not be parsed.
    #[error("invalid number {0:?}")]
    MalformedNumber(String),

    /// A transform attribute names a function this dialect doesn't know.
    #[error("unknown transform function {0:?}")]
    UnknownTransform(String),

    /// A transform function was called with the wrong number of arguments.
    #[error("{name} should have {expected} parameters, got {got}")]
    TransformArity {
        name: String,
        expected: &'static str,
        got: usize,
    },

    /// A transform attribute failed to parse.
    #[error("failed to parse transform {attr:?}: {reason}")]
    MalformedTransform { attr: String, reason: String },

    /// Path data contained numbers that don't fill a command's arity.
    #[error("stray component in path data {0}")]
    StrayComponent(String),

    /// Path data used a command letter this dialect doesn't know.
    #[error("unknown path command {0:?}")]
    UnknownPathCommand(char),

    /// A close-path command appeared before any point was drawn.
    #[error("close path before any points")]
    CloseBeforePoints,
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, SvgError>;
