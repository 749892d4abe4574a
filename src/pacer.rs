/*
 *  pacer.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host frame pacing
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
use std::time::{Duration, Instant};

/// Fixed-rate frame pacer for the host redraw loop.
pub struct Pacer {
    next_deadline: Instant,
    frame: Duration,
}

impl Pacer {
    pub fn new(target_fps: u32) -> Self {
        Self { next_deadline: Instant::now(), frame: Self::frame_for(target_fps) }
    }

    fn frame_for(fps: u32) -> Duration {
        Duration::from_micros((1_000_000u32 / fps.max(1)) as u64)
    }

    #[inline]
    pub fn set_fps(&mut self, fps: u32) {
        self.frame = Self::frame_for(fps);
    }

    #[inline]
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// When the next frame is due.
    #[inline]
    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// Returns true if a frame is due; if so, schedules the next deadline.
    /// A late loop does not try to catch up on missed frames.
    #[inline]
    pub fn should_run(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.next_deadline {
            self.next_deadline = now + self.frame;
            true
        } else {
            false
        }
    }
}
