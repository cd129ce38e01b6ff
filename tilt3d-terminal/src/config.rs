//! Command line options and the resolved application config
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tilt3d_core::SolidKind;

/// Render a cube or prism that follows the tilt of a serial accelerometer
#[derive(Debug, Parser)]
#[command(name = "tilt3d")]
#[command(version)]
pub struct Args {
    /// Serial port name (skips enumeration), e.g. /dev/ttyUSB0 or COM22
    #[arg(long, conflicts_with_all = ["port_index", "replay"])]
    pub port: Option<String>,

    /// Zero-based index into the enumerated port list (skips the prompt)
    #[arg(long, conflicts_with = "replay")]
    pub port_index: Option<usize>,

    /// Serial baud rate
    #[arg(long, default_value_t = 9600)]
    pub baud: u32,

    /// Solid to render
    #[arg(long, value_enum, default_value_t = SolidArg::Cube)]
    pub solid: SolidArg,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Play back a captured sensor log (one sample line per frame) instead
    /// of opening a serial port
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Print the available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,

    /// Write logs to this file (the terminal is taken over while running)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SolidArg {
    Cube,
    Prism,
}

impl From<SolidArg> for SolidKind {
    fn from(arg: SolidArg) -> Self {
        match arg {
            SolidArg::Cube => SolidKind::Cube,
            SolidArg::Prism => SolidKind::Prism,
        }
    }
}

/// Where orientation samples come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Open the named port
    Port(String),
    /// Enumerate ports, then take this index or ask on stdin
    Select(Option<usize>),
    /// Replay a capture file
    Replay(PathBuf),
}

/// Settings the app runs with
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub baud: u32,
    pub solid: SolidKind,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
}

impl AppConfig {
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::Select(None),
            baud: 9600,
            solid: SolidKind::Cube,
            fps: 60,
            width: 800,
            height: 600,
        }
    }
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        let source = match (&args.port, &args.replay) {
            (Some(port), _) => SourceConfig::Port(port.clone()),
            (None, Some(path)) => SourceConfig::Replay(path.clone()),
            (None, None) => SourceConfig::Select(args.port_index),
        };

        Self {
            source,
            baud: args.baud,
            solid: args.solid.into(),
            fps: args.fps,
            width: args.width.max(1),
            height: args.height.max(1),
        }
    }
}
