//! tilt3d - a cube or prism that follows a serial tilt sensor
//!
//! Reads `ax,ay,az,gx,gy,gz` lines from an accelerometer on a serial port
//! and renders the solid in the terminal at the matching tilt.
//! Controls:
//!   - Q / Esc / Ctrl+C: Quit

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tilt3d_core::OrientationSource;
use tilt3d_terminal::source::{ReplaySource, SerialSource};
use tilt3d_terminal::{logging, ports, AppConfig, Args, SourceConfig, TiltApp};

fn open_source(config: &AppConfig) -> Result<Box<dyn OrientationSource>> {
    let port = match &config.source {
        SourceConfig::Replay(path) => return Ok(Box::new(ReplaySource::open(path)?)),
        SourceConfig::Port(name) => name.clone(),
        SourceConfig::Select(preselected) => {
            let available = ports::available_ports()?;
            let stdin = io::stdin();
            ports::select_port(&available, *preselected, &mut stdin.lock(), &mut io::stdout())?
        }
    };
    Ok(Box::new(SerialSource::open(&port, config.baud)?))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    if args.list_ports {
        let mut stdout = io::stdout();
        ports::print_ports(&ports::available_ports()?, &mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let config = AppConfig::from(&args);
    tracing::info!(?config, "starting");

    let source = open_source(&config)?;
    println!("Connected to {} (press Q to quit)...", source.label());

    let mut app = TiltApp::new(&config, source)?;
    let result = app.run();
    // Dropping the app closes the sensor connection
    drop(app);

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
