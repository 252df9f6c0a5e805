//! Binary plotkit converts an input svg file into gcode for an xy
//! plotter. Apart from the file format conversion, it can scale the
//! image, simplify paths, and sorts them to reduce pen movement.

use plotkit::{convert, Config, Point};
use std::process;

fn usage() {
    eprint!(
        "\
plotkit converts an input svg file into gcode for an xy plotter.
Apart from the file format conversion, it can scale the image,
simplify paths, and sorts them to reduce pen movement.

An example use is:

    plotkit -in drawing.svg -size 270,180 -paper 297,210 -center -penup 35 -out out.gcode -simplify 0.1

Vector arguments, like -size and -paper, take a pair of comma-separated
values (no spaces). If the -out <file> ends in .svg, the output is in
svg format rather than gcode format. All distance measurements are in
millimeters.

Flags:
  -in <file>        svg input file
  -out <file>       gcode or svg output file (default out.gcode)
  -offset <x,y>     displacement of image origin from pen origin (mm)
  -size <x,y>       target size of image (mm)
  -paper <x,y>      target size of paper (mm)
  -center           center image on paper
  -penup <h>        how much to lift pen when moving (default 40)
  -feed <rate>      feed rate when drawing, mm/min (default 800)
  -split <bool>     allow paths to be split to reduce pen movement (default true)
  -reverse <bool>   allow paths to be drawn backwards to reduce pen movement (default true)
  -simplify <tol>   simplify paths within this tolerance, 0=disabled (default 0.1)
  -rotate <deg>     rotate input by this number of degrees about its center
"
    );
}

fn parse_size_part(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    s.parse().map_err(|_| format!("can't parse {s:?} as number"))
}

fn parse_size(s: &str) -> Result<Point, String> {
    let parts: Vec<&str> = s.split(',').collect();
    match parts.as_slice() {
        [x] => Ok(Point::new(parse_size_part(x)?, 0.0)),
        [x, y] => Ok(Point::new(parse_size_part(x)?, parse_size_part(y)?)),
        _ => Err(format!("can't parse {s:?} as size")),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(format!("can't parse {s:?} as bool")),
    }
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        let flag = arg.trim_start_matches('-');
        if flag.len() == arg.len() {
            return Err(format!("unexpected argument {arg:?}"));
        }
        // -center is a bare flag; everything else takes a value.
        if flag == "center" {
            config.center = true;
            continue;
        }
        let value = it
            .next()
            .ok_or_else(|| format!("flag -{flag} needs a value"))?;
        match flag {
            "in" => config.in_file = value.clone(),
            "out" => config.out_file = value.clone(),
            "offset" => config.offset = parse_size(value)?,
            "size" => config.size = parse_size(value)?,
            "paper" => config.paper = parse_size(value)?,
            "penup" => {
                config.pen_up = value
                    .parse()
                    .map_err(|_| format!("can't parse {value:?} as integer"))?;
            }
            "feed" => {
                config.feed_rate = value
                    .parse()
                    .map_err(|_| format!("can't parse {value:?} as integer"))?;
            }
            "split" => config.split = parse_bool(value)?,
            "reverse" => config.reverse = parse_bool(value)?,
            "simplify" => {
                config.simplify = value
                    .parse()
                    .map_err(|_| format!("can't parse {value:?} as number"))?;
            }
            "rotate" => {
                config.rotate_degrees = value
                    .parse()
                    .map_err(|_| format!("can't parse {value:?} as number"))?;
            }
            _ => return Err(format!("unknown flag {arg:?}")),
        }
    }
    Ok(config)
}

fn main() {
    if plotkit::init_logging().is_err() {
        eprintln!("failed to initialize logging");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "-help" || a == "--help") {
        usage();
        return;
    }

    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            usage();
            process::exit(2);
        }
    };

    if config.in_file.is_empty() {
        eprintln!("must specify -in <svg file>");
        process::exit(2);
    }

    if let Err(err) = convert(&config) {
        eprintln!("{err:#}");
        process::exit(2);
    }
}
