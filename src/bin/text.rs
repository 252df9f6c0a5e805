//! Binary plotkit-text renders text as pen strokes using the
//! block-script stroke font, writing the layout to an SVG file ready
//! for conversion to gcode.

use anyhow::{bail, Context, Result};
use plotkit::{blockscript, placed_to_drawing, write_svg, Bounds, Font, FontConfig, Point};
use std::fs::{self, File};
use std::process;

#[derive(Debug)]
struct Args {
    out: String,
    border_left: f64,
    border_right: f64,
    border_top: f64,
    x_size: f64,
    paper: Point,
    text: String,
    text_file: String,
    font: String,
    font_config: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            out: "out.svg".to_string(),
            border_left: 10.0,
            border_right: 10.0,
            border_top: 10.0,
            x_size: 8.0,
            paper: Point::ZERO,
            text: String::new(),
            text_file: String::new(),
            font: "data/blockscript.svg".to_string(),
            font_config: String::new(),
        }
    }
}

fn usage() {
    eprint!(
        "\
plotkit-text renders text as pen strokes, writing an svg file.

Flags:
  -out <file>         svg output file (default out.svg)
  -border_left <mm>   border left (default 10)
  -border_right <mm>  border right (default 10)
  -border_top <mm>    border top (default 10)
  -xsize <mm>         height of x character (default 8)
  -paper <x,y>        target size x,y of paper (mm)
  -text <text>        text to render
  -textfile <file>    text to render (read from this file)
  -font <file>        glyph svg file (default data/blockscript.svg)
  -fontconfig <file>  json font description overriding the builtin one
"
    );
}

fn parse_size(s: &str) -> Result<Point, String> {
    let part = |s: &str| -> Result<f64, String> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(0.0);
        }
        s.parse().map_err(|_| format!("can't parse {s:?} as number"))
    };
    let parts: Vec<&str> = s.split(',').collect();
    match parts.as_slice() {
        [x] => Ok(Point::new(part(x)?, 0.0)),
        [x, y] => Ok(Point::new(part(x)?, part(y)?)),
        _ => Err(format!("can't parse {s:?} as size")),
    }
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        let flag = arg.trim_start_matches('-');
        if flag.len() == arg.len() {
            return Err(format!("unexpected argument {arg:?}"));
        }
        let value = it
            .next()
            .ok_or_else(|| format!("flag -{flag} needs a value"))?;
        let number = |value: &str| -> Result<f64, String> {
            value
                .parse()
                .map_err(|_| format!("can't parse {value:?} as number"))
        };
        match flag {
            "out" => parsed.out = value.clone(),
            "border_left" => parsed.border_left = number(value)?,
            "border_right" => parsed.border_right = number(value)?,
            "border_top" => parsed.border_top = number(value)?,
            "xsize" => parsed.x_size = number(value)?,
            "paper" => parsed.paper = parse_size(value)?,
            "text" => parsed.text = value.clone(),
            "textfile" => parsed.text_file = value.clone(),
            "font" => parsed.font = value.clone(),
            "fontconfig" => parsed.font_config = value.clone(),
            _ => return Err(format!("unknown flag {arg:?}")),
        }
    }
    Ok(parsed)
}

fn text_to_render(args: &Args) -> Result<String> {
    if !args.text.is_empty() && !args.text_file.is_empty() {
        bail!("specified text and textfile: one or the other");
    }
    if !args.text_file.is_empty() {
        return fs::read_to_string(&args.text_file)
            .with_context(|| format!("failed to read {}", args.text_file));
    }
    if args.text.is_empty() {
        bail!("specify -text or -textfile for text to be rendered");
    }
    Ok(args.text.clone())
}

fn font_config(args: &Args) -> Result<FontConfig> {
    if args.font_config.is_empty() {
        return Ok(blockscript::config());
    }
    let json = fs::read_to_string(&args.font_config)
        .with_context(|| format!("failed to read {}", args.font_config))?;
    FontConfig::from_json(&json).with_context(|| format!("bad font config {}", args.font_config))
}

fn run(args: &Args) -> Result<()> {
    let text = text_to_render(args)?;

    let config = font_config(args)?;
    let font = {
        let f = File::open(&args.font).with_context(|| format!("failed to open {}", args.font))?;
        Font::new(f, &config).context("failed to load font")?
    };

    let scale = font
        .scale_from_char_height('x', args.x_size)
        .context("failed to get font scale")?;
    let placed = font
        .layout(
            &text,
            scale,
            args.paper.x - args.border_left - args.border_right,
        )
        .context("failed to render text")?;

    let mut drawing =
        placed_to_drawing(Point::new(args.border_left, args.border_top), &placed);
    drawing.bounds = Bounds::new(Point::ZERO, args.paper);

    let out = File::create(&args.out).with_context(|| format!("failed to create {}", args.out))?;
    write_svg(&drawing, out).with_context(|| format!("failed to save svg {}", args.out))?;
    Ok(())
}

fn main() {
    if plotkit::init_logging().is_err() {
        eprintln!("failed to initialize logging");
    }

    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "-h" || a == "-help" || a == "--help") {
        usage();
        return;
    }

    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            usage();
            process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}
