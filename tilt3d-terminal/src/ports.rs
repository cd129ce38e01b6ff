//! Serial port enumeration and selection
use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use serialport::{SerialPortInfo, SerialPortType};

/// List the serial ports the OS knows about
pub fn available_ports() -> Result<Vec<SerialPortInfo>> {
    serialport::available_ports().context("failed to enumerate serial ports")
}

/// One-line description such as `/dev/ttyUSB0 (USB 1a86:7523 USB Serial)`
pub fn describe(info: &SerialPortInfo) -> String {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => match &usb.product {
            Some(product) => format!(
                "{} (USB {:04x}:{:04x} {})",
                info.port_name, usb.vid, usb.pid, product
            ),
            None => format!("{} (USB {:04x}:{:04x})", info.port_name, usb.vid, usb.pid),
        },
        SerialPortType::BluetoothPort => format!("{} (Bluetooth)", info.port_name),
        SerialPortType::PciPort => format!("{} (PCI)", info.port_name),
        SerialPortType::Unknown => info.port_name.clone(),
    }
}

/// Print the port list with zero-based indices
pub fn print_ports<W: Write>(ports: &[SerialPortInfo], out: &mut W) -> Result<()> {
    if ports.is_empty() {
        writeln!(out, "No serial ports found.")?;
    }
    for (i, info) in ports.iter().enumerate() {
        writeln!(out, "  [{}] {}", i, describe(info))?;
    }
    Ok(())
}

/// Parse a typed zero-based index against a list of `count` ports
pub fn parse_selection(input: &str, count: usize) -> Result<usize> {
    let index: usize = input
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a port index", input.trim()))?;
    check_index(index, count)
}

fn check_index(index: usize, count: usize) -> Result<usize> {
    if index >= count {
        bail!("port index {} out of range (0..{})", index, count);
    }
    Ok(index)
}

/// Ask on `input` until a valid index is entered
pub fn prompt_selection<R: BufRead, W: Write>(
    ports: &[SerialPortInfo],
    input: &mut R,
    out: &mut W,
) -> Result<usize> {
    if ports.is_empty() {
        bail!("no serial ports available");
    }

    writeln!(out, "Available serial ports:")?;
    print_ports(ports, out)?;

    loop {
        write!(out, "Select port [0-{}]: ", ports.len() - 1)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read port selection")? == 0 {
            bail!("no port selected");
        }
        match parse_selection(&line, ports.len()) {
            Ok(index) => return Ok(index),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

/// Resolve a port name from a pre-seeded index or an interactive prompt
pub fn select_port<R: BufRead, W: Write>(
    ports: &[SerialPortInfo],
    preselected: Option<usize>,
    input: &mut R,
    out: &mut W,
) -> Result<String> {
    let index = match preselected {
        Some(index) => check_index(index, ports.len())?,
        None => prompt_selection(ports, input, out)?,
    };
    Ok(ports[index].port_name.clone())
}
