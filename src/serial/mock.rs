/*
 *  serial/mock.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock serial link for testing without a board attached
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

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::display::bitmap::VisibleFrame;
use crate::serial::codec::decode_frame;
use crate::serial::error::SerialError;
use crate::serial::traits::SerialLink;

/// Mock serial link for testing
///
/// Records every payload written and lets tests script readiness and
/// write failures. Clones share the same state, so a test can keep one
/// handle while the transmitter owns another.
#[derive(Debug, Clone)]
pub struct MockLink {
    name: String,
    state: Arc<Mutex<MockLinkState>>,
}

/// Internal state for the mock link (shared for inspection in tests)
#[derive(Debug)]
pub struct MockLinkState {
    /// Every successful write, in order
    pub writes: Vec<String>,

    /// Number of write attempts, successful or not
    pub write_attempts: usize,

    /// Reported by `is_open()`
    pub open: bool,

    /// Bytes the board has "sent back"
    pub pending_input: u32,

    /// Simulate failures (for error testing)
    pub simulate_write_failure: bool,
}

impl Default for MockLinkState {
    fn default() -> Self {
        Self {
            writes: Vec::new(),
            write_attempts: 0,
            open: true,
            pending_input: 0,
            simulate_write_failure: false,
        }
    }
}

impl MockLink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(MockLinkState::default())),
        }
    }

    /// Lock the shared state for inspection or scripting.
    pub fn state(&self) -> MutexGuard<'_, MockLinkState> {
        // a poisoned lock only means another test thread panicked mid-update
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn writes(&self) -> Vec<String> {
        self.state().writes.clone()
    }

    /// The last frame written, parsed back the way the firmware would.
    pub fn last_frame(&self) -> Option<VisibleFrame> {
        self.state().writes.last().and_then(|w| decode_frame(w))
    }
}

impl SerialLink for MockLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.state().open
    }

    fn bytes_pending(&mut self) -> Result<u32, SerialError> {
        let state = self.state();
        if !state.open {
            return Err(SerialError::Closed);
        }
        Ok(state.pending_input)
    }

    fn write_frame(&mut self, payload: &[u8]) -> Result<(), SerialError> {
        let mut state = self.state();
        state.write_attempts += 1;
        if state.simulate_write_failure {
            return Err(SerialError::Write(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "simulated write failure",
            )));
        }
        state.writes.push(String::from_utf8_lossy(payload).into_owned());
        Ok(())
    }
}
