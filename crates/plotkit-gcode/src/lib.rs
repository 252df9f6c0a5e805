//! # Plotkit Gcode
//!
//! A stateful G-code emitter for XY pen plotters: absolute millimeter
//! coordinates, RepRap-style G0/G1 moves, and a Z axis standing in for
//! the pen. The emitter tracks whether the pen is up or down and only
//! writes Z moves on transitions, so callers can feed it polylines as a
//! plain sequence of move/line operations.

use std::io::{self, BufWriter, Write};

/// Pen and feed settings for G-code output.
#[derive(Debug, Clone, Copy)]
pub struct GcodeConfig {
    /// Z height (mm) the pen is raised to for travel moves.
    pub pen_up: i32,
    /// Feed rate (mm/min) while drawing.
    pub feed_rate: i32,
}

impl Default for GcodeConfig {
    fn default() -> Self {
        Self {
            pen_up: 40,
            feed_rate: 800,
        }
    }
}

/// Buffered G-code writer.
///
/// The first operation for each polyline should be [`move_to`]; every
/// subsequent point is a [`line_to`]. Output is buffered; call
/// [`flush`] once the program is complete.
///
/// [`move_to`]: GcodeWriter::move_to
/// [`line_to`]: GcodeWriter::line_to
/// [`flush`]: GcodeWriter::flush
#[derive(Debug)]
pub struct GcodeWriter<W: Write> {
    out: BufWriter<W>,
    config: GcodeConfig,
    pen_down: bool,
}

impl<W: Write> GcodeWriter<W> {
    pub fn new(w: W, config: GcodeConfig) -> Self {
        Self {
            out: BufWriter::new(w),
            config,
            pen_down: false,
        }
    }

    /// Initializes units and positioning, raises the pen, and sets the
    /// drawing feed rate.
    pub fn preamble(&mut self) -> io::Result<()> {
        writeln!(self.out, "G21 ; millimeter units")?;
        writeln!(self.out, "G90 ; absolute positioning")?;
        writeln!(self.out, "G0 Z{} ; raise pen", self.config.pen_up)?;
        writeln!(self.out, "G1 F{} ; drawing feed rate", self.config.feed_rate)?;
        self.pen_down = false;
        Ok(())
    }

    /// Travels to (x, y), raising the pen first if it is down.
    pub fn move_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        if self.pen_down {
            writeln!(self.out, "G0 Z{}", self.config.pen_up)?;
            self.pen_down = false;
        }
        writeln!(self.out, "G0 X{x:.3} Y{y:.3}")
    }

    /// Draws a line to (x, y), lowering the pen first if it is up.
    pub fn line_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        if !self.pen_down {
            writeln!(self.out, "G1 Z0 F{}", self.config.feed_rate)?;
            self.pen_down = true;
        }
        writeln!(self.out, "G1 X{x:.3} Y{y:.3}")
    }

    /// Raises the pen and returns to the origin.
    pub fn postamble(&mut self) -> io::Result<()> {
        writeln!(self.out, "G0 Z{}", self.config.pen_up)?;
        self.pen_down = false;
        writeln!(self.out, "G0 X0 Y0")
    }

    /// Flushes buffered output, surfacing any pending I/O error.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
