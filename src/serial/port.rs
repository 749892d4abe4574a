/*
 *  serial/port.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Real serial port link, fixed at 9600 8N1
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::io::{self, Write};
use std::time::Duration;

use log::{debug, info, warn};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::constants::{SERIAL_BAUD_RATE, SERIAL_TIMEOUT_MS};
use crate::serial::error::SerialError;
use crate::serial::traits::SerialLink;

/// Names of the serial ports present on this machine, in enumeration order.
pub fn available_ports() -> Result<Vec<String>, SerialError> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect())
}

/// Resolve a port selector: an all-digit selector is an index into `ports`,
/// anything else is taken as a device path.
pub fn resolve_port_name(selector: &str, ports: &[String]) -> Result<String, SerialError> {
    let selector = selector.trim();
    if !selector.is_empty() && selector.chars().all(|c| c.is_ascii_digit()) {
        let index: usize = selector.parse().map_err(|_| SerialError::NoSuchPort {
            index: usize::MAX,
            available: ports.len(),
        })?;
        return ports
            .get(index)
            .cloned()
            .ok_or(SerialError::NoSuchPort { index, available: ports.len() });
    }
    Ok(selector.to_string())
}

/// Write errors that mean the device has gone away (USB unplugged and the like).
fn is_disconnect(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::UnexpectedEof
    )
}

/// An open serial port to the LED board.
///
/// The handle counts as open until a write fails with a disconnect error;
/// after that `is_open` reports false and the transmitter stops writing.
pub struct PortLink {
    name: String,
    port: Box<dyn SerialPort>,
    lost: bool,
}

impl PortLink {
    /// Open `name` at the board's fixed line settings.
    pub fn open(name: &str) -> Result<Self, SerialError> {
        let port = serialport::new(name, SERIAL_BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
            .open()?;
        info!("Opened serial port {} at {} baud", name, SERIAL_BAUD_RATE);
        Ok(Self { name: name.to_string(), port, lost: false })
    }
}

impl SerialLink for PortLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        !self.lost
    }

    fn bytes_pending(&mut self) -> Result<u32, SerialError> {
        Ok(self.port.bytes_to_read()?)
    }

    fn write_frame(&mut self, payload: &[u8]) -> Result<(), SerialError> {
        if let Err(e) = self.port.write_all(payload).and_then(|_| self.port.flush()) {
            if is_disconnect(&e) {
                warn!("Lost serial port {}: {}", self.name, e);
                self.lost = true;
            }
            return Err(e.into());
        }
        debug!("Wrote {} bytes to {}", payload.len(), self.name);
        Ok(())
    }
}
