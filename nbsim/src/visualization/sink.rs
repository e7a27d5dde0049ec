//! Frame sinks: the rendering seam of the simulation driver
//!
//! The driver never talks to a window directly. Once at start-up it hands the
//! sink the universe radius and bodies, then every step it draws each body and
//! presents the frame. Anything that implements [`FrameSink`] can sit behind
//! that: a bevy window, a logger, a CSV file or nothing at all.

use std::borrow::Cow;
use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::simulation::states::Body;

/// Capability the driver draws into, once per step
pub trait FrameSink {
    /// Initial setup with the display radius and the starting bodies
    fn begin(&mut self, _radius: f64, _bodies: &[Body]) -> Result<()> {
        Ok(())
    }

    /// Draw one body at (`x`, `y`) using its visual tag
    fn draw_body(&mut self, x: f64, y: f64, tag: &str) -> Result<()>;

    /// Finish the current frame
    fn present(&mut self) -> Result<()>;

    /// Called once after the last step
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards everything. Used for headless tests and benchmarks
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn draw_body(&mut self, _x: f64, _y: f64, _tag: &str) -> Result<()> {
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One body as it was drawn into a frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnBody {
    pub x: f64,
    pub y: f64,
    pub tag: String,
}

/// Double buffer holding only the most recently presented frame
/// The bevy viewer reads `current` to place its sprites
#[derive(Debug, Default, Clone)]
pub struct FrameBuffer {
    pending: Vec<DrawnBody>,
    current: Vec<DrawnBody>,
    presented: u64,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies of the last presented frame, in draw order
    pub fn current(&self) -> &[DrawnBody] {
        &self.current
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl FrameSink for FrameBuffer {
    fn begin(&mut self, _radius: f64, bodies: &[Body]) -> Result<()> {
        self.pending.clear();
        self.current = bodies
            .iter()
            .map(|b| DrawnBody { x: b.x.x, y: b.x.y, tag: b.tag().to_owned() })
            .collect();
        Ok(())
    }

    fn draw_body(&mut self, x: f64, y: f64, tag: &str) -> Result<()> {
        self.pending.push(DrawnBody { x, y, tag: tag.to_owned() });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        std::mem::swap(&mut self.pending, &mut self.current);
        self.pending.clear();
        self.presented += 1;
        Ok(())
    }
}

/// Keeps every presented frame. Handy for inspecting a whole run
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub radius: Option<f64>,
    pub frames: Vec<Vec<DrawnBody>>,
    pending: Vec<DrawnBody>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for RecordingSink {
    fn begin(&mut self, radius: f64, _bodies: &[Body]) -> Result<()> {
        self.radius = Some(radius);
        Ok(())
    }

    fn draw_body(&mut self, x: f64, y: f64, tag: &str) -> Result<()> {
        self.pending.push(DrawnBody { x, y, tag: tag.to_owned() });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

/// Headless renderer that reports frames through `log`
/// Every frame goes to `trace`, every `every`-th frame summary to `debug`
#[derive(Debug, Clone)]
pub struct LogSink {
    every: u64,
    frame: u64,
    drawn: usize,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frame: 0,
            drawn: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(100)
    }
}

impl FrameSink for LogSink {
    fn begin(&mut self, radius: f64, bodies: &[Body]) -> Result<()> {
        log::info!("headless run: {} bodies, universe radius {:e}", bodies.len(), radius);
        Ok(())
    }

    fn draw_body(&mut self, x: f64, y: f64, tag: &str) -> Result<()> {
        log::trace!("frame {}: {} at ({:e}, {:e})", self.frame + 1, tag, x, y);
        self.drawn += 1;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frame += 1;
        if self.frame % self.every == 0 {
            log::debug!("frame {} presented ({} bodies)", self.frame, self.drawn);
        }
        self.drawn = 0;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::info!("headless run finished after {} frames", self.frame);
        Ok(())
    }
}

/// Quote a CSV field if it holds a separator, a quote or a line break
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Streams every frame as CSV rows `frame,index,tag,x,y`
pub struct TrajectoryWriter<W: Write> {
    out: W,
    frame: u64,
    index: usize,
}

impl<W: Write> TrajectoryWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, frame: 0, index: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TrajectoryWriter<W> {
    fn begin(&mut self, _radius: f64, bodies: &[Body]) -> Result<()> {
        writeln!(self.out, "frame,index,tag,x,y").context("writing trajectory header")?;
        // frame 0 is the initial state
        for (i, b) in bodies.iter().enumerate() {
            writeln!(self.out, "0,{},{},{:e},{:e}", i, csv_field(b.tag()), b.x.x, b.x.y)
                .context("writing trajectory row")?;
        }
        Ok(())
    }

    fn draw_body(&mut self, x: f64, y: f64, tag: &str) -> Result<()> {
        writeln!(self.out, "{},{},{},{:e},{:e}", self.frame + 1, self.index, csv_field(tag), x, y)
            .context("writing trajectory row")?;
        self.index += 1;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frame += 1;
        self.index = 0;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("flushing trajectory output")
    }
}

/// Wraps another sink and sleeps after each presented frame
pub struct Paced<S> {
    inner: S,
    pause: Duration,
}

impl<S: FrameSink> Paced<S> {
    pub fn new(inner: S, pause: Duration) -> Self {
        Self { inner, pause }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FrameSink> FrameSink for Paced<S> {
    fn begin(&mut self, radius: f64, bodies: &[Body]) -> Result<()> {
        self.inner.begin(radius, bodies)
    }

    fn draw_body(&mut self, x: f64, y: f64, tag: &str) -> Result<()> {
        self.inner.draw_body(x, y, tag)
    }

    fn present(&mut self) -> Result<()> {
        self.inner.present()?;
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.finish()
    }
}

/// Forwards every call to two sinks, first `a` then `b`
pub struct Tee<A, B> {
    pub a: A,
    pub b: B,
}

impl<A: FrameSink, B: FrameSink> Tee<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: FrameSink, B: FrameSink> FrameSink for Tee<A, B> {
    fn begin(&mut self, radius: f64, bodies: &[Body]) -> Result<()> {
        self.a.begin(radius, bodies)?;
        self.b.begin(radius, bodies)
    }

    fn draw_body(&mut self, x: f64, y: f64, tag: &str) -> Result<()> {
        self.a.draw_body(x, y, tag)?;
        self.b.draw_body(x, y, tag)
    }

    fn present(&mut self) -> Result<()> {
        self.a.present()?;
        self.b.present()
    }

    fn finish(&mut self) -> Result<()> {
        self.a.finish()?;
        self.b.finish()
    }
}
