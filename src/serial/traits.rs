/*
 *  serial/traits.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Link abstraction between the transmitter and the physical port
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

use serde::{Deserialize, Serialize};

use crate::serial::error::SerialError;

/// When the transmitter considers the link ready for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyPolicy {
    /// Any open link takes a frame every tick.
    #[default]
    Open,

    /// Only write once the board has sent something back, i.e. input is
    /// waiting to be read. Writes then happen at the board's pace.
    InputPending,
}

impl ReadyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyPolicy::Open => "open",
            ReadyPolicy::InputPending => "input_pending",
        }
    }
}

impl std::str::FromStr for ReadyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(ReadyPolicy::Open),
            "input_pending" | "input-pending" => Ok(ReadyPolicy::InputPending),
            other => Err(format!("unknown ready policy '{}' (open|input_pending)", other)),
        }
    }
}

/// Minimal link abstraction - the real port and the test mock implement this.
///
/// Links are write-only from the host's point of view; `bytes_pending` is
/// only consulted as a readiness signal and nothing is ever read.
pub trait SerialLink: Send {
    /// Port name for logging
    fn name(&self) -> &str;

    /// Whether the underlying port is still usable.
    fn is_open(&self) -> bool;

    /// Bytes the board has sent that are waiting to be read.
    fn bytes_pending(&mut self) -> Result<u32, SerialError>;

    /// Write one encoded frame in a single call.
    fn write_frame(&mut self, payload: &[u8]) -> Result<(), SerialError>;
}
