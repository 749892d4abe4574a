/*
 *  clock.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock and date text sources
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

use std::sync::{Arc, Mutex};

use chrono::Local;

use crate::constants::{CLOCK_FORMAT, DATE_FORMAT};

/// Supplies the clock and date text the board shows.
pub trait ClockSource: Send {
    /// Current time, `HH:MM` 24 hour.
    fn time_text(&self) -> String;

    /// Current date, `MM/DD`.
    fn date_text(&self) -> String;
}

/// Wall clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl ClockSource for LocalClock {
    fn time_text(&self) -> String {
        Local::now().format(CLOCK_FORMAT).to_string()
    }

    fn date_text(&self) -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }
}

/// A settable clock. Clones share the same readings.
#[derive(Debug, Clone)]
pub struct FixedClock {
    readings: Arc<Mutex<(String, String)>>,
}

impl FixedClock {
    pub fn new(time: &str, date: &str) -> Self {
        Self { readings: Arc::new(Mutex::new((time.to_string(), date.to_string()))) }
    }

    pub fn set_time(&self, time: &str) {
        if let Ok(mut r) = self.readings.lock() {
            r.0 = time.to_string();
        }
    }

    pub fn set_date(&self, date: &str) {
        if let Ok(mut r) = self.readings.lock() {
            r.1 = date.to_string();
        }
    }
}

impl ClockSource for FixedClock {
    fn time_text(&self) -> String {
        self.readings.lock().map(|r| r.0.clone()).unwrap_or_default()
    }

    fn date_text(&self) -> String {
        self.readings.lock().map(|r| r.1.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_clock_shapes() {
        let clock = LocalClock;
        let t = clock.time_text();
        assert_eq!(t.len(), 5);
        assert_eq!(&t[2..3], ":");
        let d = clock.date_text();
        assert_eq!(d.len(), 5);
        assert_eq!(&d[2..3], "/");
    }

    #[test]
    fn test_fixed_clock_shared_between_clones() {
        let clock = FixedClock::new("09:15", "03/01");
        let other = clock.clone();
        clock.set_time("09:16");
        clock.set_date("03/02");
        assert_eq!(other.time_text(), "09:16");
        assert_eq!(other.date_text(), "03/02");
    }
}
