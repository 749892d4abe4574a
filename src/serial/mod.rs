/*
 *  serial/mod.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Serial subsystem - ASCII frame protocol to the LED board
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

pub mod error;
pub mod traits;
pub mod codec;
pub mod port;
pub mod mock;
pub mod transmitter;

pub use error::SerialError;
pub use traits::{ReadyPolicy, SerialLink};
pub use codec::{decode_frame, encode_frame};
pub use port::{available_ports, resolve_port_name, PortLink};
pub use mock::{MockLink, MockLinkState};
pub use transmitter::{SerialTransmitter, TransmitStats};
