//! SVG ingest.
//!
//! Parses a restricted SVG dialect into a flat [`Drawing`]: `<path>`,
//! `<line>` and `<g>` elements with nested `transform` attributes. Path
//! data supports the commands `MmLlHhVvCcZz`; cubic Béziers are flattened
//! to line segments during the parse. `<defs>` subtrees are skipped, and
//! any other element is reported as a warning and not walked.
//!
//! The root `<svg>` must carry numeric `width` and `height` attributes
//! (an `mm` suffix is accepted and ignored); they become the drawing's
//! view bounds. `viewBox` is not interpreted.

use crate::error::{Result, SvgError};
use plotkit_core::{Bounds, Drawing, Point, Transform};
use std::collections::HashMap;
use std::io::Read;
use tracing::warn;

/// Chord length below which a Bézier span is emitted as a single segment,
/// in source-SVG units (measured before any transform is applied).
const BEZIER_FLATNESS: f64 = 0.5;

/// Parses an SVG document, extracting all paths into one drawing.
///
/// This provides only limited SVG support and will fail, or produce
/// incorrect results, if the document uses features it doesn't
/// understand.
pub fn from_svg<R: Read>(r: R) -> Result<Drawing> {
    let mut map = ids_from_svg(r, &[])?;
    Ok(map.remove("").unwrap_or_default())
}

/// Parses an SVG document, extracting paths grouped by element id.
///
/// Every requested id gets its own drawing: any `<g>`, `<path>` or
/// `<line>` whose `id` attribute matches collects into that drawing, as
/// do its descendants. Everything else lands in the drawing under the
/// empty-string key. All drawings share the root element's view bounds.
pub fn ids_from_svg<R: Read>(mut r: R, ids: &[String]) -> Result<HashMap<String, Drawing>> {
    let mut text = String::new();
    r.read_to_string(&mut text)?;
    let doc = roxmltree::Document::parse(&text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SvgError::NotSvg(root.tag_name().name().to_string()));
    }

    let bounds = parse_bounds(&root)?;
    let mut map = HashMap::new();
    map.insert(String::new(), Drawing::new(bounds));
    for id in ids {
        if map.insert(id.clone(), Drawing::new(bounds)).is_some() {
            return Err(SvgError::DuplicateId(id.clone()));
        }
    }

    walk(&root, &Transform::identity(), "", &mut map)?;
    Ok(map)
}

/// Parses a distance attribute, accepting an optional `mm` suffix.
fn parse_dist(s: &str) -> Result<f64> {
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+')
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(split);
    let f: f64 = num
        .parse()
        .map_err(|_| SvgError::MalformedNumber(s.to_string()))?;
    if !unit.is_empty() && unit != "mm" {
        return Err(SvgError::UnknownUnit(unit.to_string()));
    }
    Ok(f)
}

fn parse_bounds(root: &roxmltree::Node) -> Result<Bounds> {
    let dim = |attr: &'static str| -> Result<f64> {
        let value = root.attribute(attr).unwrap_or("");
        parse_dist(value).map_err(|e| match e {
            SvgError::UnknownUnit(_) => e,
            _ => SvgError::BadDimension {
                attr,
                value: value.to_string(),
            },
        })
    };
    let width = dim("width")?;
    let height = dim("height")?;
    Ok(Bounds::new(Point::ZERO, Point::new(width, height)))
}

fn walk(
    node: &roxmltree::Node,
    xform: &Transform,
    target: &str,
    map: &mut HashMap<String, Drawing>,
) -> Result<()> {
    for child in node.children().filter(|c| c.is_element()) {
        let id = child.attribute("id").unwrap_or("");
        let target = if !id.is_empty() && map.contains_key(id) {
            id
        } else {
            target
        };
        match child.tag_name().name() {
            "g" => {
                let local = match child.attribute("transform") {
                    Some(attr) => parse_transform_attr(attr)?,
                    None => Transform::identity(),
                };
                let composed = xform.compose(&local);
                walk(&child, &composed, target, map)?;
            }
            "path" => {
                let data = child.attribute("d").ok_or(SvgError::MissingAttribute {
                    element: "path",
                    attr: "d",
                })?;
                if let Some(drawing) = map.get_mut(target) {
                    parse_path_data(drawing, xform, data)?;
                }
            }
            "line" => {
                if let Some(drawing) = map.get_mut(target) {
                    parse_line_element(drawing, xform, &child)?;
                }
            }
            "defs" => {}
            other => {
                warn!("skipping unknown svg element <{other}>");
            }
        }
    }
    Ok(())
}

fn parse_line_element(
    drawing: &mut Drawing,
    xform: &Transform,
    node: &roxmltree::Node,
) -> Result<()> {
    let coord = |attr: &'static str| -> Result<f64> {
        let value = node.attribute(attr).ok_or(SvgError::MissingAttribute {
            element: "line",
            attr,
        })?;
        value
            .parse()
            .map_err(|_| SvgError::MalformedNumber(value.to_string()))
    };
    let from = Point::new(coord("x1")?, coord("y1")?);
    let to = Point::new(coord("x2")?, coord("y2")?);
    drawing.move_to(xform.apply(from));
    drawing.line_to(xform.apply(to));
    Ok(())
}

// ---- transform attribute grammar ----

/// Parses a `transform` attribute: a sequence of `name(args)` clauses
/// composed left to right.
fn parse_transform_attr(attr: &str) -> Result<Transform> {
    let malformed = |reason: &str| SvgError::MalformedTransform {
        attr: attr.to_string(),
        reason: reason.to_string(),
    };
    let mut xf = Transform::identity();
    let mut rest = attr.trim_start();
    while !rest.is_empty() {
        let name_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if name_len == 0 {
            return Err(malformed("expected transform name"));
        }
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start();
        rest = rest.strip_prefix('(').ok_or_else(|| malformed("expected ("))?;
        let close = rest.find(')').ok_or_else(|| malformed("missing )"))?;
        let mut args = Vec::new();
        for tok in rest[..close]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            args.push(
                tok.parse::<f64>()
                    .map_err(|_| SvgError::MalformedNumber(tok.to_string()))?,
            );
        }
        xf = xf.compose(&single_transform(name, &args)?);
        rest = rest[close + 1..].trim_start();
    }
    Ok(xf)
}

fn single_transform(name: &str, args: &[f64]) -> Result<Transform> {
    let arity = |expected: &'static str| SvgError::TransformArity {
        name: name.to_string(),
        expected,
        got: args.len(),
    };
    match name {
        "translate" => match args {
            [tx] => Ok(Transform::translate(*tx, 0.0)),
            [tx, ty] => Ok(Transform::translate(*tx, *ty)),
            _ => Err(arity("one or two")),
        },
        "scale" => match args {
            [s] => Ok(Transform::scale(*s, *s)),
            [sx, sy] => Ok(Transform::scale(*sx, *sy)),
            _ => Err(arity("one or two")),
        },
        "matrix" => match args {
            [a, b, c, d, e, f] => Ok(Transform::matrix(*a, *b, *c, *d, *e, *f)),
            _ => Err(arity("6")),
        },
        "rotate" => match args {
            [degrees] => Ok(Transform::rotate(degrees.to_radians())),
            _ => Err(arity("one")),
        },
        _ => Err(SvgError::UnknownTransform(name.to_string())),
    }
}

// ---- path data grammar ----

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathToken {
    Eof,
    Number(f64),
    Command(char),
}

/// Tokenizes path data into command letters and signed decimals.
///
/// Commas and whitespace separate tokens. A minus sign terminates a
/// number already in progress and starts a new one, so `10-20` is the
/// two tokens 10 and -20.
struct PathTokenizer<'a> {
    rest: &'a str,
}

impl<'a> PathTokenizer<'a> {
    fn new(data: &'a str) -> Self {
        Self { rest: data }
    }

    fn next(&mut self) -> Result<PathToken> {
        self.rest = self
            .rest
            .trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        let mut chars = self.rest.chars();
        let c = match chars.next() {
            None => return Ok(PathToken::Eof),
            Some(c) => c,
        };
        if c.is_ascii_digit() || c == '-' || c == '.' {
            return self.next_number();
        }
        self.rest = chars.as_str();
        Ok(PathToken::Command(c))
    }

    fn next_number(&mut self) -> Result<PathToken> {
        let mut len = 0;
        for (i, c) in self.rest.char_indices() {
            let leading_minus = c == '-' && i == 0;
            if c.is_ascii_digit() || c == '.' || leading_minus {
                len = i + c.len_utf8();
            } else {
                break;
            }
        }
        let (num, rest) = self.rest.split_at(len);
        self.rest = rest;
        let f: f64 = num
            .parse()
            .map_err(|_| SvgError::MalformedNumber(num.to_string()))?;
        Ok(PathToken::Number(f))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathCmd {
    None,
    Move,
    Line,
    HorLine,
    VerLine,
    Curve,
}

impl PathCmd {
    fn args(self) -> usize {
        match self {
            PathCmd::None => 0,
            PathCmd::Move | PathCmd::Line => 2,
            PathCmd::HorLine | PathCmd::VerLine => 1,
            PathCmd::Curve => 6,
        }
    }
}

/// Evaluates one cubic Bézier at parameter `t`.
fn bezier_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Recursively subdivides the parameter interval `[start, end]`, emitting
/// the sample at `end` once the interval is narrower than 0.5 and the
/// chord between the samples is shorter than the flatness threshold. The
/// sample at `start` is never emitted; it is already the last point of
/// the open polyline.
fn flatten_bezier(
    out: &mut Vec<Point>,
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    start: f64,
    end: f64,
) {
    let vs = bezier_at(p0, p1, p2, p3, start);
    let ve = bezier_at(p0, p1, p2, p3, end);
    if end - start < 0.5 && vs.distance(ve) < BEZIER_FLATNESS {
        out.push(ve);
        return;
    }
    let mid = (start + end) / 2.0;
    flatten_bezier(out, p0, p1, p2, p3, start, mid);
    flatten_bezier(out, p0, p1, p2, p3, mid, end);
}

/// Interprets one `d` attribute, appending polylines to the drawing.
fn parse_path_data(drawing: &mut Drawing, xform: &Transform, data: &str) -> Result<()> {
    let mut tokens = PathTokenizer::new(data);
    let mut xy = [0.0f64; 6];
    let mut filled = 0usize;
    let mut rel = false;
    let mut cmd = PathCmd::None;
    let mut first = Point::ZERO;
    let mut first_set = false;
    let mut last = Point::ZERO;

    loop {
        let token = tokens.next()?;
        match token {
            PathToken::Eof => {
                if filled != 0 {
                    return Err(SvgError::StrayComponent("at end of data".to_string()));
                }
                return Ok(());
            }
            PathToken::Command(p) => {
                let lower = p.to_ascii_lowercase();
                if filled != 0 {
                    return Err(SvgError::StrayComponent(format!("before {p:?}")));
                }
                match lower {
                    'm' => (cmd, rel) = (PathCmd::Move, p == lower),
                    'l' => (cmd, rel) = (PathCmd::Line, p == lower),
                    'h' => (cmd, rel) = (PathCmd::HorLine, p == lower),
                    'v' => (cmd, rel) = (PathCmd::VerLine, p == lower),
                    'c' => (cmd, rel) = (PathCmd::Curve, p == lower),
                    'z' => {
                        if !first_set {
                            return Err(SvgError::CloseBeforePoints);
                        }
                        drawing.line_to(xform.apply(first));
                        last = first;
                    }
                    _ => return Err(SvgError::UnknownPathCommand(p)),
                }
            }
            PathToken::Number(f) => {
                if cmd == PathCmd::None {
                    return Err(SvgError::StrayComponent(format!("{f} before any command")));
                }
                xy[filled] = f;
                filled += 1;
                if filled < cmd.args() {
                    continue;
                }

                if cmd == PathCmd::Move {
                    drawing.polylines.push(Default::default());
                }
                let v = match cmd {
                    PathCmd::HorLine => {
                        let mut v = Point::new(xy[0], last.y);
                        if rel {
                            v.x += last.x;
                        }
                        drawing.line_to(xform.apply(v));
                        v
                    }
                    PathCmd::VerLine => {
                        let mut v = Point::new(last.x, xy[0]);
                        if rel {
                            v.y += last.y;
                        }
                        drawing.line_to(xform.apply(v));
                        v
                    }
                    PathCmd::Curve => {
                        let p0 = last;
                        let mut p1 = Point::new(xy[0], xy[1]);
                        let mut p2 = Point::new(xy[2], xy[3]);
                        let mut p3 = Point::new(xy[4], xy[5]);
                        if rel {
                            p1 = p1 + last;
                            p2 = p2 + last;
                            p3 = p3 + last;
                        }
                        let mut samples = Vec::new();
                        flatten_bezier(&mut samples, p0, p1, p2, p3, 0.0, 1.0);
                        for s in samples {
                            drawing.line_to(xform.apply(s));
                        }
                        p3
                    }
                    PathCmd::Move | PathCmd::Line => {
                        let mut v = Point::new(xy[0], xy[1]);
                        if rel {
                            v = v + last;
                        }
                        drawing.line_to(xform.apply(v));
                        v
                    }
                    PathCmd::None => unreachable!(),
                };
                if cmd == PathCmd::Move || !first_set {
                    first = v;
                    first_set = true;
                }
                last = v;
                if cmd == PathCmd::Move {
                    cmd = PathCmd::Line;
                }
                filled = 0;
            }
        }
    }
}
