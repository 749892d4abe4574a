/*
 *  serial/error.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the serial link to the LED board
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

use thiserror::Error;

/// Errors raised while selecting, opening or writing the serial port.
#[derive(Debug, Error)]
pub enum SerialError {
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),

    #[error("serial write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("no serial port at index {index} ({available} available)")]
    NoSuchPort { index: usize, available: usize },

    #[error("serial link closed")]
    Closed,
}
