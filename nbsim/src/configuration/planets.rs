//! Whitespace-token "planets" text format.
//!
//! ```text
//! 5
//! 2.50e+11
//!  1.4960e+11  0.0000e+00  0.0000e+00  2.9800e+04  5.9740e+24  earth.gif
//!  ...
//! ```
//!
//! Body count, universe radius, then one record per body:
//! `x y vx vy mass tag`. Anything after the last record is ignored.

use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};

use crate::simulation::states::{Body, Universe};

/// Token cursor that remembers which token it is on for error messages
struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            inner: s.split_whitespace(),
            pos: 0,
        }
    }

    fn next(&mut self, what: &str) -> Result<&'a str> {
        self.pos += 1;
        self.inner
            .next()
            .ok_or_else(|| anyhow!("unexpected end of input: expected {} (token {})", what, self.pos))
    }

    fn next_f64(&mut self, what: &str) -> Result<f64> {
        let tok = self.next(what)?;
        tok.parse::<f64>()
            .map_err(|_| anyhow!("expected a number for {} at token {}, found {:?}", what, self.pos, tok))
    }
}

/// A tag is one whitespace-free token, otherwise the record no longer splits
pub fn check_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        bail!("tag must not be empty");
    }
    if tag.chars().any(char::is_whitespace) {
        bail!("tag {:?} must not contain whitespace", tag);
    }
    Ok(())
}

/// Parse a universe from planets-format text
pub fn parse_planets(input: &str) -> Result<Universe> {
    let mut tokens = Tokens::new(input);

    let count_tok = tokens.next("body count")?;
    let count: usize = count_tok
        .parse()
        .map_err(|_| anyhow!("body count must be a non-negative integer, found {:?}", count_tok))?;

    let radius = tokens.next_f64("universe radius")?;
    if !radius.is_finite() {
        bail!("universe radius must be finite, got {}", radius);
    }

    let mut bodies = Vec::with_capacity(count);
    for i in 0..count {
        let body = parse_body(&mut tokens).with_context(|| format!("reading body {} of {}", i + 1, count))?;
        bodies.push(body);
    }

    Ok(Universe::new(radius, bodies))
}

fn parse_body(tokens: &mut Tokens<'_>) -> Result<Body> {
    let px = tokens.next_f64("x position")?;
    let py = tokens.next_f64("y position")?;
    let vx = tokens.next_f64("x velocity")?;
    let vy = tokens.next_f64("y velocity")?;
    let m = tokens.next_f64("mass")?;
    let tag = tokens.next("tag")?;
    Ok(Body::from_components(px, py, vx, vy, m, tag))
}

/// Write `universe` in planets format. The output parses back to the same universe.
/// Fails before writing anything if a tag would not survive the round trip
pub fn write_planets<W: Write>(universe: &Universe, mut out: W) -> Result<()> {
    for (i, b) in universe.bodies.iter().enumerate() {
        check_tag(b.tag()).with_context(|| format!("writing body {}", i + 1))?;
    }

    writeln!(out, "{}", universe.bodies.len())?;
    writeln!(out, "{:e}", universe.radius)?;
    for b in &universe.bodies {
        writeln!(
            out,
            "{:e} {:e} {:e} {:e} {:e} {}",
            b.x.x,
            b.x.y,
            b.v.x,
            b.v.y,
            b.mass(),
            b.tag()
        )?;
    }
    out.flush()?;
    Ok(())
}
