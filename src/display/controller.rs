/*
 *  display/controller.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Tick driven display state machine: owns the message, the mode and the scroll offset
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
use std::time::{Duration, Instant};

use log::{debug, info};

use super::Mode;
use crate::clock::ClockSource;
use crate::constants::{BOARD_WIDTH, DEFAULT_SCROLL_SPEED};
use crate::display::bitmap::{Buffer, VisibleFrame};
use crate::display::composer::compose;
use crate::display::window::window;
use crate::glyphs::GlyphTable;

/// Configuration for the display controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Columns visible on the physical board
    pub board_width: usize,

    /// Speed restored when un-pausing and applied to custom text
    pub scroll_speed: i32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            scroll_speed: DEFAULT_SCROLL_SPEED,
        }
    }
}

/// Scroll bookkeeping for the active message.
///
/// `position` is a signed column offset into the buffer; negative values are
/// blank lead-in before the message enters from the right. `speed` is applied
/// as `position += -speed` per tick, so negative scrolls forward and 0 is still.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub position: i32,
    pub size: usize,
    pub mode: Mode,
    pub speed: i32,
}

impl ScrollState {
    fn idle() -> Self {
        Self { position: 0, size: 0, mode: Mode::Idle, speed: 0 }
    }

    /// The message has completely left the board.
    pub fn has_exited(&self) -> bool {
        (self.size as i64) - (self.position as i64) < 0
    }
}

impl fmt::Display for ScrollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "state: {}", self.mode)?;
        match self.speed {
            0 => write!(f, "scroll: none"),
            s if s < 0 => write!(f, "scroll: left @ {}", -s),
            s => write!(f, "scroll: right @ {}", s),
        }
    }
}

/// Display controller - owns the active message and advances it once per tick
pub struct DisplayController {
    config: ControllerConfig,
    glyphs: Box<dyn GlyphTable + Send>,
    clock: Box<dyn ClockSource>,
    text: String,
    buffer: Buffer,
    state: ScrollState,
    last_mode_change: Instant,
}

impl DisplayController {
    /// Create an idle controller with an empty message
    pub fn new(
        config: ControllerConfig,
        glyphs: Box<dyn GlyphTable + Send>,
        clock: Box<dyn ClockSource>,
    ) -> Self {
        let buffer = Buffer::new(0, glyphs.height());
        Self {
            config,
            glyphs,
            clock,
            text: String::new(),
            buffer,
            state: ScrollState::idle(),
            last_mode_change: Instant::now(),
        }
    }

    /// Replace the message wholesale and restart the scroll at `initial_position`.
    /// Speed is left as is.
    pub fn set_message(&mut self, text: &str, initial_position: i32, mode: Mode) {
        if mode != self.state.mode {
            info!("Display mode changed: {} -> {}", self.state.mode, mode);
            self.last_mode_change = Instant::now();
        }
        self.text = text.to_string();
        self.buffer = compose(self.glyphs.as_ref(), text);
        self.state.position = initial_position;
        self.state.size = self.buffer.width();
        self.state.mode = mode;
        debug!("Message {:?}: {} columns from {}", self.text, self.state.size, initial_position);
    }

    /// Switch to a content mode showing `text` from column 0, standing still.
    /// `Custom` goes through [`submit_text`](Self::submit_text), `Idle` resets.
    pub fn select_mode(&mut self, mode: Mode, text: &str) {
        match mode {
            Mode::Idle => self.reset(),
            Mode::Custom => self.submit_text(text),
            Mode::Clock | Mode::Date | Mode::Weather => {
                self.set_message(text, 0, mode);
                self.state.speed = 0;
            }
        }
    }

    pub fn show_clock(&mut self) {
        let text = self.clock.time_text();
        self.select_mode(Mode::Clock, &text);
    }

    pub fn show_date(&mut self) {
        let text = self.clock.date_text();
        self.select_mode(Mode::Date, &text);
    }

    /// Weather text is displayed verbatim, including the `ERROR` sentinel.
    pub fn show_weather(&mut self, text: &str) {
        self.select_mode(Mode::Weather, text);
    }

    /// Custom text scrolls in from just off the right edge of the board.
    /// Blank text resets straight away.
    pub fn submit_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            debug!("Blank custom text submitted");
            self.reset();
            return;
        }
        let entry = -(self.config.board_width as i32);
        self.set_message(text, entry, Mode::Custom);
        self.state.speed = self.config.scroll_speed;
    }

    /// Flip between stationary and the configured scroll speed.
    /// Content and position are untouched.
    pub fn toggle_pause(&mut self) {
        self.state.speed = if self.state.speed != 0 { 0 } else { self.config.scroll_speed };
        info!("Scroll {}", if self.state.speed == 0 { "paused" } else { "resumed" });
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.state.speed = speed;
    }

    /// Back to idle: no text, position 0, still.
    pub fn reset(&mut self) {
        if self.state.mode != Mode::Idle {
            info!("Display mode changed: {} -> {}", self.state.mode, Mode::Idle);
            self.last_mode_change = Instant::now();
        }
        self.text.clear();
        self.buffer = Buffer::new(0, self.glyphs.height());
        self.state = ScrollState::idle();
    }

    /// Advance one step. Returns true when the message finished and the
    /// controller reset to idle.
    pub fn tick(&mut self) -> bool {
        self.refresh_clock();

        self.state.position += -self.state.speed;

        if self.state.has_exited() {
            debug!(
                "Message {:?} scrolled out after {:?}",
                self.text,
                self.time_since_mode_change()
            );
            self.reset();
            return true;
        }
        false
    }

    /// A clock that has not started moving keeps showing the current time.
    fn refresh_clock(&mut self) {
        if self.state.mode != Mode::Clock || self.state.position > 0 {
            return;
        }
        let now = self.clock.time_text();
        if now != self.text {
            debug!("Clock refresh {} -> {}", self.text, now);
            self.text = now;
            self.buffer = compose(self.glyphs.as_ref(), &self.text);
            self.state.size = self.buffer.width();
        }
    }

    /// The frame the board should show right now.
    pub fn current_visible_frame(&self) -> VisibleFrame {
        window(&self.buffer, self.state.position, self.config.board_width)
    }

    /// Same window at a different width, e.g. for a wider console mirror.
    pub fn visible_frame(&self, width: usize) -> VisibleFrame {
        window(&self.buffer, self.state.position, width)
    }

    pub fn state(&self) -> &ScrollState { &self.state }
    pub fn mode(&self) -> Mode { self.state.mode }
    pub fn position(&self) -> i32 { self.state.position }
    pub fn size(&self) -> usize { self.state.size }
    pub fn speed(&self) -> i32 { self.state.speed }
    pub fn is_paused(&self) -> bool { self.state.speed == 0 }
    pub fn text(&self) -> &str { &self.text }
    pub fn buffer(&self) -> &Buffer { &self.buffer }
    pub fn board_width(&self) -> usize { self.config.board_width }
    pub fn board_height(&self) -> usize { self.glyphs.height() }

    /// Two line summary: mode and scroll direction/speed.
    pub fn status_line(&self) -> String {
        self.state.to_string()
    }

    /// Get time since last mode change
    pub fn time_since_mode_change(&self) -> Duration {
        self.last_mode_change.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::glyphs::FontTable;

    fn controller_with(clock: FixedClock) -> DisplayController {
        DisplayController::new(
            ControllerConfig::default(),
            Box::new(FontTable::default()),
            Box::new(clock),
        )
    }

    fn controller() -> DisplayController {
        controller_with(FixedClock::new("12:34", "05/06"))
    }

    #[test]
    fn test_starts_idle_and_blank() {
        let c = controller();
        assert_eq!(c.mode(), Mode::Idle);
        assert_eq!(c.position(), 0);
        assert_eq!(c.size(), 0);
        assert!(c.is_paused());
        let f = c.current_visible_frame();
        assert_eq!((f.width(), f.height()), (BOARD_WIDTH, 10));
        assert!(f.is_blank());
    }

    #[test]
    fn test_select_mode_starts_still_at_zero() {
        let mut c = controller();
        c.show_date();
        assert_eq!(c.mode(), Mode::Date);
        assert_eq!(c.text(), "05/06");
        assert_eq!(c.position(), 0);
        assert_eq!(c.speed(), 0);
        assert_eq!(c.size(), 30);
    }

    #[test]
    fn test_submit_text_enters_from_off_board() {
        let mut c = controller();
        c.submit_text("HELLO");
        assert_eq!(c.mode(), Mode::Custom);
        assert_eq!(c.position(), -(BOARD_WIDTH as i32));
        assert_eq!(c.speed(), DEFAULT_SCROLL_SPEED);
        assert!(c.current_visible_frame().is_blank());
    }

    #[test]
    fn test_blank_submit_resets_immediately() {
        let mut c = controller();
        c.show_date();
        c.submit_text("   ");
        assert_eq!(c.mode(), Mode::Idle);
        assert_eq!(c.position(), 0);
        assert_eq!(c.text(), "");
    }

    #[test]
    fn test_zero_speed_tick_is_idempotent() {
        let mut c = controller();
        c.set_message("HOLD", 3, Mode::Custom);
        c.set_speed(0);
        for _ in 0..50 {
            assert!(!c.tick());
        }
        assert_eq!(c.position(), 3);
        assert_eq!(c.mode(), Mode::Custom);
    }

    #[test]
    fn test_toggle_pause_keeps_content() {
        let mut c = controller();
        c.submit_text("GO");
        c.tick();
        let pos = c.position();
        c.toggle_pause();
        assert!(c.is_paused());
        c.tick();
        assert_eq!(c.position(), pos);
        assert_eq!(c.text(), "GO");
        c.toggle_pause();
        assert_eq!(c.speed(), DEFAULT_SCROLL_SPEED);
        c.tick();
        assert_eq!(c.position(), pos + 1);
    }

    #[test]
    fn test_resets_exactly_when_message_exits() {
        let mut c = controller();
        c.set_message("OK", 0, Mode::Custom);
        c.set_speed(DEFAULT_SCROLL_SPEED);
        let size = c.size() as i32;
        assert_eq!(size, 12);

        for step in 1..=size {
            assert!(!c.tick(), "reset too early at step {}", step);
            assert_eq!(c.position(), step);
        }
        // size - position == -1 on this tick
        assert!(c.tick());
        assert_eq!(c.mode(), Mode::Idle);
        assert_eq!(c.position(), 0);
        assert_eq!(c.speed(), 0);
        assert_eq!(c.text(), "");
    }

    #[test]
    fn test_clock_refreshes_while_not_scrolled() {
        let clock = FixedClock::new("10:00", "01/01");
        let mut c = controller_with(clock.clone());
        c.show_clock();
        let before = c.buffer().clone();

        clock.set_time("10:01");
        c.tick();
        assert_eq!(c.text(), "10:01");
        assert_ne!(c.buffer(), &before);
        assert_eq!(c.position(), 0);
        assert_eq!(c.mode(), Mode::Clock);
    }

    #[test]
    fn test_clock_refresh_keeps_negative_position() {
        let clock = FixedClock::new("10:00", "01/01");
        let mut c = controller_with(clock.clone());
        c.set_message("10:00", -5, Mode::Clock);
        c.set_speed(DEFAULT_SCROLL_SPEED);
        clock.set_time("10:01");
        c.tick();
        assert_eq!(c.text(), "10:01");
        assert_eq!(c.position(), -4);
    }

    #[test]
    fn test_clock_stops_refreshing_once_scrolling() {
        let clock = FixedClock::new("10:00", "01/01");
        let mut c = controller_with(clock.clone());
        c.set_message("10:00", 1, Mode::Clock);
        clock.set_time("10:01");
        c.tick();
        assert_eq!(c.text(), "10:00");
    }

    #[test]
    fn test_weather_sentinel_is_plain_text() {
        let mut c = controller();
        c.show_weather("ERROR");
        let mut plain = controller();
        plain.set_message("ERROR", 0, Mode::Custom);
        assert_eq!(c.current_visible_frame(), plain.current_visible_frame());
        assert!(!c.current_visible_frame().is_blank());
    }

    #[test]
    fn test_mode_switch_mid_scroll_discards_old_message() {
        let table = FontTable::default();
        let mut c = controller();
        c.submit_text("HELLO");
        while c.position() <= 0 {
            c.tick();
        }
        assert_eq!(c.mode(), Mode::Custom);

        c.show_date();
        assert_eq!(c.mode(), Mode::Date);
        assert_eq!(c.position(), 0);
        assert_eq!(c.speed(), 0);
        assert_eq!(c.buffer(), &compose(&table, "05/06"));
        assert_eq!(c.size(), c.buffer().width());

        c.submit_text("HELLO");
        while c.position() <= 0 {
            c.tick();
        }
        c.submit_text("NEW");
        assert_eq!(c.mode(), Mode::Custom);
        assert_eq!(c.position(), -(BOARD_WIDTH as i32));
        assert_eq!(c.speed(), DEFAULT_SCROLL_SPEED);
        assert_eq!(c.buffer(), &compose(&table, "NEW"));
        assert_eq!(c.text(), "NEW");
    }

    #[test]
    fn test_status_line() {
        let mut c = controller();
        assert_eq!(c.status_line(), "state: idle\nscroll: none");
        c.submit_text("HI");
        assert_eq!(c.status_line(), "state: custom\nscroll: left @ 1");
        c.set_speed(2);
        assert_eq!(c.status_line(), "state: custom\nscroll: right @ 2");
    }

    #[test]
    fn test_mirror_frame_is_wider_but_aligned() {
        let mut c = controller();
        c.show_date();
        let board = c.current_visible_frame();
        let wide = c.visible_frame(BOARD_WIDTH + 10);
        assert_eq!(wide.width(), BOARD_WIDTH + 10);
        for row in 0..board.height() {
            assert_eq!(&wide.row(row)[..BOARD_WIDTH], board.row(row));
        }
    }
}
