//! G-code text generation for the fixed machine profile.

use crate::motion::{Motion, MotionSink};
use contourcam_core::GcodeProfile;
use contourcam_geometry::Orientation;
use std::io::{self, Write};

/// Placeholder in the pre-cut template replaced by the path intensity.
pub const INTENSITY_PLACEHOLDER: &str = "{intensity}";

/// Writes motions as G-code lines.
///
/// Feed words are modal: `F` is only written when the feed rate differs from
/// the last one written.
pub struct GcodeWriter<W: Write> {
    output: W,
    profile: GcodeProfile,
    retract_depth: f64,
    last_feed: Option<f64>,
    lines: usize,
}

impl<W: Write> GcodeWriter<W> {
    pub fn new(output: W, profile: &GcodeProfile, retract_depth: f64) -> Self {
        Self {
            output,
            profile: profile.clone(),
            retract_depth,
            last_feed: None,
            lines: 0,
        }
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    /// Writes the profile's program header.
    pub fn write_header(&mut self) -> io::Result<()> {
        let header = self.profile.header.clone();
        header.iter().try_for_each(|line| self.write_line(line))
    }

    /// Writes the profile's program footer and flushes the output.
    pub fn write_footer(&mut self) -> io::Result<()> {
        let footer = self.profile.footer.clone();
        footer.iter().try_for_each(|line| self.write_line(line))?;
        self.output.flush()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        writeln!(self.output, "{line}")?;
        self.lines += 1;
        Ok(())
    }

    fn number(&self, value: f64) -> String {
        let text = format!("{:.*}", self.profile.precision, value);
        // Avoid "-0.000" for values that round to zero.
        match text.strip_prefix('-') {
            Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
                magnitude.to_string()
            }
            _ => text,
        }
    }

    fn feed(&mut self, feed_rate: f64) -> String {
        if self.last_feed == Some(feed_rate) {
            return String::new();
        }
        self.last_feed = Some(feed_rate);
        format!(" F{}", self.number(feed_rate))
    }

    /// Renders one motion as a G-code line, `None` for an empty template.
    fn render(&mut self, motion: &Motion) -> Option<String> {
        let line = match motion {
            Motion::Retract => format!("G0 Z{}", self.number(self.retract_depth)),
            Motion::Rapid { to } => format!("G0 X{} Y{}", self.number(to.x), self.number(to.y)),
            Motion::PreCut { intensity } => self
                .profile
                .pre_cut
                .replace(INTENSITY_PLACEHOLDER, &intensity.to_string()),
            Motion::Plunge { z, feed_rate } => {
                let feed = self.feed(*feed_rate);
                format!("G1 Z{}{}", self.number(*z), feed)
            }
            Motion::Linear { to, feed_rate } => {
                let feed = self.feed(*feed_rate);
                format!("G1 X{} Y{}{}", self.number(to.x), self.number(to.y), feed)
            }
            Motion::Arc {
                direction,
                to,
                center,
                feed_rate,
            } => {
                let code = match direction {
                    Orientation::Cw => "G2",
                    Orientation::Ccw => "G3",
                };
                let feed = self.feed(*feed_rate);
                format!(
                    "{code} X{} Y{} I{} J{}{}",
                    self.number(to.x),
                    self.number(to.y),
                    self.number(center.x),
                    self.number(center.y),
                    feed
                )
            }
            Motion::PostCut => self.profile.post_cut.clone(),
        };

        (!line.is_empty()).then_some(line)
    }
}

impl<W: Write> MotionSink for GcodeWriter<W> {
    fn emit(&mut self, motion: &Motion) -> io::Result<()> {
        match self.render(motion) {
            Some(line) => self.write_line(&line),
            None => Ok(()),
        }
    }
}
