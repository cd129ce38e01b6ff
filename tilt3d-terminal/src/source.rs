//! Orientation sources: a live serial device or a captured log
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serialport::SerialPort;
use tilt3d_core::sensor::parse_sample_bytes;
use tilt3d_core::{LineBuffer, Orientation, OrientationSource, SourceError};

/// Reads sample lines from a serial port without blocking the frame loop
pub struct SerialSource {
    port: Box<dyn SerialPort>,
    name: String,
    lines: LineBuffer,
    scratch: Vec<u8>,
}

impl SerialSource {
    pub fn open(name: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(name, baud)
            .timeout(Duration::from_millis(10))
            .open()
            .with_context(|| format!("failed to open serial port {} at {} baud", name, baud))?;
        tracing::info!(port = name, baud, "serial port opened");

        Ok(Self {
            port,
            name: name.to_string(),
            lines: LineBuffer::new(),
            scratch: Vec::new(),
        })
    }
}

impl OrientationSource for SerialSource {
    fn poll(&mut self) -> Result<Option<Orientation>, SourceError> {
        let available = self
            .port
            .bytes_to_read()
            .map_err(|e| SourceError::Disconnected(e.to_string()))? as usize;

        if available > 0 {
            self.scratch.resize(available, 0);
            match self.port.read(&mut self.scratch) {
                Ok(0) => return Err(SourceError::Disconnected("port closed".to_string())),
                Ok(n) => self.lines.push(&self.scratch[..n]),
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::TimedOut
                            | io::ErrorKind::WouldBlock
                            | io::ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let latest = self.lines.latest_orientation();
        if latest.is_none() && available > 0 {
            tracing::trace!(
                bytes = available,
                pending = self.lines.pending_len(),
                "no valid sample in read"
            );
        }
        Ok(latest)
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Drop for SerialSource {
    fn drop(&mut self) {
        tracing::info!(port = %self.name, "serial port closed");
    }
}

/// Plays a captured sensor log back, one line per frame, looping at the end
pub struct ReplaySource {
    label: String,
    lines: Vec<Vec<u8>>,
    cursor: usize,
}

impl ReplaySource {
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read capture {}", path.display()))?;
        Self::from_bytes(path.display().to_string(), &data)
    }

    pub fn from_bytes(label: impl Into<String>, data: &[u8]) -> Result<Self> {
        let mut buffer = LineBuffer::new();
        buffer.push(data);
        buffer.push(b"\n");

        let mut lines = Vec::new();
        while let Some(line) = buffer.next_line() {
            lines.push(line);
        }
        // The terminator pushed above leaves one trailing empty line
        // when the capture already ended with a newline.
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            bail!("capture is empty");
        }

        let label = label.into();
        tracing::info!(capture = %label, lines = lines.len(), "replaying sensor capture");
        Ok(Self {
            label,
            lines,
            cursor: 0,
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lines.len()
    }
}

impl OrientationSource for ReplaySource {
    fn poll(&mut self) -> Result<Option<Orientation>, SourceError> {
        let line = &self.lines[self.cursor];
        self.cursor = (self.cursor + 1) % self.lines.len();

        let sample = parse_sample_bytes(line);
        if sample.is_none() {
            tracing::trace!(line = %String::from_utf8_lossy(line), "discarded malformed sample");
        }
        Ok(sample)
    }

    fn label(&self) -> &str {
        &self.label
    }
}
