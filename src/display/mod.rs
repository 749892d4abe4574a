/*
 *  display/mod.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - compose, window and drive the scrolling message
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

use std::fmt;

pub mod bitmap;
pub mod composer;
pub mod window;
pub mod controller;

// Re-exports for convenience
pub use bitmap::{BitMatrix, Buffer, VisibleFrame};
pub use composer::{compose, composed_width};
pub use window::window;
pub use controller::{ControllerConfig, DisplayController, ScrollState};

/// Display mode enum - what kind of content the board is showing
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Idle,    // Nothing queued
    Clock,   // HH:MM, live while stationary
    Date,    // MM/DD
    Weather, // Temperature or the ERROR sentinel
    Custom,  // Text typed at the console
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Clock => "clock",
            Mode::Date => "date",
            Mode::Weather => "weather",
            Mode::Custom => "custom",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
