//! Accelerometer sample decoding and the orientation source seam
//!
//! The device streams one text line per reading:
//!
//! ```text
//! ax_raw,ay_raw,az_raw,gx,gy,gz
//! ```
//!
//! Only the accelerometer triple drives the orientation. A raw reading of
//! 16384 (1 g at the sensor's default range) maps to a 90 degree tilt.
use nom::{
    character::complete::{char, i32 as int, space0},
    combinator::all_consuming,
    multi::separated_list1,
    sequence::delimited,
    IResult,
};

use crate::error::SourceError;
use crate::transform::Orientation;

/// Raw reading that corresponds to a 90 degree tilt
pub const FULL_SCALE: f32 = 16384.0;

/// Number of comma-separated fields per sample line
pub const FIELD_COUNT: usize = 6;

/// One decoded sample line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub ax: i32,
    pub ay: i32,
    pub az: i32,
    pub gx: i32,
    pub gy: i32,
    pub gz: i32,
}

impl RawSample {
    /// Decode `ax,ay,az,gx,gy,gz`. Anything else is `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (_, fields) = parse_fields(line).ok()?;
        match fields.as_slice() {
            &[ax, ay, az, gx, gy, gz] => Some(Self {
                ax,
                ay,
                az,
                gx,
                gy,
                gz,
            }),
            _ => None,
        }
    }

    /// Tilt angles derived from the accelerometer triple
    pub fn orientation(&self) -> Orientation {
        Orientation::new(
            raw_to_radians(self.ax),
            raw_to_radians(self.ay),
            raw_to_radians(self.az),
        )
    }
}

fn parse_field(input: &str) -> IResult<&str, i32> {
    delimited(space0, int, space0)(input)
}

fn parse_fields(input: &str) -> IResult<&str, Vec<i32>> {
    all_consuming(separated_list1(char(','), parse_field))(input)
}

/// Map a raw accelerometer reading onto a tilt angle in radians
pub fn raw_to_radians(raw: i32) -> f32 {
    (raw as f32 / FULL_SCALE * 90.0).to_radians()
}

/// Decode one sample line into an orientation.
///
/// `None` means "no update": the caller keeps its previous orientation.
pub fn parse_sample(line: &str) -> Option<Orientation> {
    RawSample::parse(line).map(|sample| sample.orientation())
}

/// Like [`parse_sample`] for undecoded bytes; invalid UTF-8 is `None`.
pub fn parse_sample_bytes(line: &[u8]) -> Option<Orientation> {
    std::str::from_utf8(line).ok().and_then(parse_sample)
}

/// Splits a byte stream into lines.
///
/// Bytes without a terminator are held until the rest of the line arrives.
/// A run longer than `MAX_PENDING` without a newline is thrown away so a
/// garbled stream cannot grow the buffer forever.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub const MAX_PENDING: usize = 4096;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        if self.pending.len() > Self::MAX_PENDING && !self.pending.contains(&b'\n') {
            self.pending.clear();
        }
    }

    /// Next complete line without its `\n` / `\r\n` terminator
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }

    /// Decode every complete line and return the last valid orientation
    pub fn latest_orientation(&mut self) -> Option<Orientation> {
        let mut latest = None;
        while let Some(line) = self.next_line() {
            if let Some(orientation) = parse_sample_bytes(&line) {
                latest = Some(orientation);
            }
        }
        latest
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Producer of orientation updates, polled once per frame
pub trait OrientationSource {
    /// Return the newest orientation received since the last poll.
    ///
    /// Must not block. `Ok(None)` means nothing new (or only malformed
    /// samples) arrived; `Err` is reserved for losing the connection.
    fn poll(&mut self) -> Result<Option<Orientation>, SourceError>;

    /// Short human-readable name shown in the status line
    fn label(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_parse_full_sample() {
        let sample = RawSample::parse("16384,-8192,0,12,-5,7").unwrap();
        assert_eq!(
            sample,
            RawSample {
                ax: 16384,
                ay: -8192,
                az: 0,
                gx: 12,
                gy: -5,
                gz: 7
            }
        );

        let o = sample.orientation();
        assert!((o.x - FRAC_PI_2).abs() < 1e-6);
        assert!((o.y + FRAC_PI_2 / 2.0).abs() < 1e-6);
        assert_eq!(o.z, 0.0);
    }

    #[test]
    fn test_whitespace_and_signs() {
        let o = parse_sample("  +16384 , 0,\t-16384,0,0,0 \r\n").unwrap();
        assert!((o.x - FRAC_PI_2).abs() < 1e-6);
        assert!((o.z + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_lines_are_rejected() {
        for line in [
            "",
            "   ",
            "12,34",
            "a,b,c,d,e,f",
            "1,2,3,4,5,6,7",
            "1,2,3,4,5,",
            "1,2,3,4,5,6x",
            "1;2;3;4;5;6",
            "1.5,2,3,4,5,6",
            "99999999999,0,0,0,0,0",
        ] {
            assert_eq!(parse_sample(line), None, "accepted {:?}", line);
        }
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert_eq!(parse_sample_bytes(&[0xff, b',', b'1']), None);
        assert!(parse_sample_bytes(b"0,0,0,0,0,0").is_some());
    }

    #[test]
    fn test_line_buffer_holds_partial_lines() {
        let mut buffer = LineBuffer::new();
        buffer.push(b"1,2,3,");
        assert_eq!(buffer.next_line(), None);

        buffer.push(b"4,5,6\r\n7,8");
        assert_eq!(buffer.next_line(), Some(b"1,2,3,4,5,6".to_vec()));
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.pending_len(), 3);
    }

    #[test]
    fn test_latest_valid_line_wins() {
        let mut buffer = LineBuffer::new();
        buffer.push(b"0,0,0,0,0,0\n16384,0,0,0,0,0\ngarbage\n8192,0,");

        let o = buffer.latest_orientation().unwrap();
        assert!((o.x - FRAC_PI_2).abs() < 1e-6);
        // The unterminated tail stays for the next poll
        assert_eq!(buffer.latest_orientation(), None);
        assert_eq!(buffer.pending_len(), 7);
    }

    #[test]
    fn test_only_garbage_yields_nothing() {
        let mut buffer = LineBuffer::new();
        buffer.push(b"12,34\na,b,c,d,e,f\n");
        assert_eq!(buffer.latest_orientation(), None);
    }

    #[test]
    fn test_runaway_line_is_dropped() {
        let mut buffer = LineBuffer::new();
        buffer.push(&vec![b'7'; LineBuffer::MAX_PENDING + 1]);
        assert_eq!(buffer.pending_len(), 0);

        buffer.push(b"0,0,0,0,0,0\n");
        assert_eq!(buffer.latest_orientation(), Some(Orientation::zero()));
    }
}
