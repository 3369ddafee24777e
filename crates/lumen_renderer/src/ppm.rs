//! Plain-text PPM ("P3") image output.
//!
//! Layout: a `P3` line, a `width height` line, a `255` line, then one
//! `r g b` line per pixel in raster order.

use crate::renderer::{color_to_rgb, ImageBuffer};
use lumen_math::Color;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Largest channel value written to the file.
pub const PPM_MAX_VALUE: u32 = 255;

/// Errors that can occur while writing or reading PPM images.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected {expected} pixels but {actual} were written")]
    PixelCount { expected: u64, actual: u64 },

    #[error("Invalid PPM header: {0}")]
    InvalidHeader(String),
}

/// The three numbers at the top of a PPM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmHeader {
    pub width: u32,
    pub height: u32,
    pub max_value: u32,
}

impl PpmHeader {
    /// Header for an 8-bit image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            max_value: PPM_MAX_VALUE,
        }
    }

    /// Number of pixel lines that must follow this header.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Write the header lines.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), OutputError> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "{}", self.max_value)?;
        Ok(())
    }

    /// Parse a header, skipping `#` comments.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, OutputError> {
        let mut tokens: Vec<String> = Vec::with_capacity(4);

        for line in reader.lines() {
            let line = line?;
            let content = line.split('#').next().unwrap_or("");
            tokens.extend(content.split_whitespace().map(str::to_owned));
            if tokens.len() >= 4 {
                break;
            }
        }

        if tokens.len() < 4 {
            return Err(OutputError::InvalidHeader(format!(
                "expected 4 header fields, found {}",
                tokens.len()
            )));
        }
        if tokens[0] != "P3" {
            return Err(OutputError::InvalidHeader(format!(
                "unsupported magic number {:?}",
                tokens[0]
            )));
        }

        let number = |name: &str, token: &str| {
            token.parse::<u32>().map_err(|_| {
                OutputError::InvalidHeader(format!("{name} is not a number: {token:?}"))
            })
        };

        Ok(Self {
            width: number("width", &tokens[1])?,
            height: number("height", &tokens[2])?,
            max_value: number("max value", &tokens[3])?,
        })
    }
}

/// Streams pixels into a PPM file as they are produced.
pub struct PpmWriter<W: Write> {
    writer: W,
    header: PpmHeader,
    written: u64,
}

impl<W: Write> PpmWriter<W> {
    /// Write the header and get ready for `width * height` pixels.
    pub fn new(mut writer: W, width: u32, height: u32) -> Result<Self, OutputError> {
        let header = PpmHeader::new(width, height);
        header.write_to(&mut writer)?;
        Ok(Self {
            writer,
            header,
            written: 0,
        })
    }

    /// Gamma-encode, quantize and write one linear color.
    pub fn write_color(&mut self, color: Color) -> Result<(), OutputError> {
        let [r, g, b] = color_to_rgb(color);
        writeln!(self.writer, "{r} {g} {b}")?;
        self.written += 1;
        Ok(())
    }

    /// Flush and hand back the writer once every pixel is out.
    pub fn finish(mut self) -> Result<W, OutputError> {
        let expected = self.header.pixel_count();
        if self.written != expected {
            return Err(OutputError::PixelCount {
                expected,
                actual: self.written,
            });
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl ImageBuffer {
    /// Write the whole buffer as a PPM image.
    pub fn write_ppm<W: Write>(&self, writer: W) -> Result<W, OutputError> {
        let mut ppm = PpmWriter::new(writer, self.width, self.height)?;
        for color in &self.pixels {
            ppm.write_color(*color)?;
        }
        ppm.finish()
    }
}
