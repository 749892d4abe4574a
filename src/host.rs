/*
 *  host.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host session: gates on port selection, paces ticks and pushes frames out
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

use log::{info, warn};

use crate::command::{self, Command};
use crate::display::{DisplayController, VisibleFrame};
use crate::serial::{ReadyPolicy, SerialTransmitter, TransmitStats};
use crate::weather::WeatherClient;

/// What the host loop should do after handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One display session, driven by the host redraw loop.
///
/// Until a port has been selected the session is in its INIT phase and
/// frames do nothing. Selecting a port ends INIT even if the port could
/// not be opened; transmission is then a no-op.
pub struct Session {
    controller: DisplayController,
    transmitter: Option<SerialTransmitter>,
    tick_every: u64,
    frame_count: u64,
    mirror_excess: usize,
}

impl Session {
    pub fn new(controller: DisplayController, tick_every: u64, mirror_excess: usize) -> Self {
        Self {
            controller,
            transmitter: None,
            tick_every: tick_every.max(1),
            frame_count: 0,
            mirror_excess,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.transmitter.is_some()
    }

    /// End INIT with the chosen link (connected or not).
    pub fn select_port(&mut self, transmitter: SerialTransmitter) {
        match transmitter.port_name() {
            Some(name) => info!("Transmitting to {} ({})", name, transmitter.policy().as_str()),
            None => info!("Running without a board attached"),
        }
        self.transmitter = Some(transmitter);
    }

    /// One host frame. Every `tick_every` frames the controller ticks and the
    /// new visible frame is sent. Returns true when a tick ran.
    pub fn frame(&mut self) -> bool {
        let Some(transmitter) = self.transmitter.as_mut() else {
            return false;
        };

        self.frame_count += 1;
        if self.frame_count % self.tick_every != 0 {
            return false;
        }

        self.controller.tick();
        let frame = self.controller.current_visible_frame();
        transmitter
            .send(&frame)
            .unwrap_or_else(|e| warn!("Dropped frame {}: {}", self.frame_count, e));
        true
    }

    /// Apply a console command. Weather is fetched inline, so the loop
    /// simply skips frames while the lookup is in flight.
    pub async fn handle(&mut self, command: Command, weather: &WeatherClient) -> Flow {
        match command {
            Command::ShowClock => self.controller.show_clock(),
            Command::ShowDate => self.controller.show_date(),
            Command::ShowWeather => {
                let text = weather.current_temperature().await;
                self.controller.show_weather(&text);
            }
            Command::TogglePause => self.controller.toggle_pause(),
            Command::Clear => self.controller.reset(),
            Command::Status => println!("{}", self.status_report()),
            Command::Submit(text) => self.controller.submit_text(&text),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// One console line. While in INIT the line picks the port (path or
    /// index, blank for none); afterwards it is parsed as a command.
    pub async fn handle_line(
        &mut self,
        line: &str,
        weather: &WeatherClient,
        policy: ReadyPolicy,
    ) -> Flow {
        if !self.is_initialized() {
            let selector = line.trim();
            let selector = (!selector.is_empty()).then_some(selector);
            self.select_port(SerialTransmitter::select(selector, policy));
            return Flow::Continue;
        }

        match command::parse(line) {
            Ok(cmd) => self.handle(cmd, weather).await,
            Err(e) => {
                warn!("{}", e);
                Flow::Continue
            }
        }
    }

    /// The board frame plus the extra console columns.
    pub fn mirror_frame(&self) -> VisibleFrame {
        self.controller
            .visible_frame(self.controller.board_width() + self.mirror_excess)
    }

    pub fn status_report(&self) -> String {
        let stats = self.stats();
        format!(
            "{}\nmessage: {:?} ({} columns @ {})\nframes: {} written, {} skipped, {} dropped",
            self.controller.status_line(),
            self.controller.text(),
            self.controller.size(),
            self.controller.position(),
            stats.written,
            stats.skipped,
            stats.dropped
        )
    }

    pub fn stats(&self) -> TransmitStats {
        self.transmitter.as_ref().map(|t| t.stats()).unwrap_or_default()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn controller(&self) -> &DisplayController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DisplayController {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::display::{ControllerConfig, Mode};
    use crate::glyphs::FontTable;
    use crate::serial::{MockLink, ReadyPolicy};

    fn session() -> Session {
        let controller = DisplayController::new(
            ControllerConfig::default(),
            Box::new(FontTable::default()),
            Box::new(FixedClock::new("08:30", "12/25")),
        );
        Session::new(controller, 7, 10)
    }

    fn weather() -> WeatherClient {
        WeatherClient::new("", "").unwrap()
    }

    #[test]
    fn test_init_gates_frames() {
        let mut s = session();
        s.controller_mut().submit_text("HI");
        for _ in 0..20 {
            assert!(!s.frame());
        }
        assert_eq!(s.frame_count(), 0);
        assert_eq!(s.controller().position(), -30);
    }

    #[test]
    fn test_ticks_every_seventh_frame_and_sends() {
        let mock = MockLink::new("mock0");
        let mut s = session();
        s.select_port(SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::Open));
        s.controller_mut().submit_text("HI");

        let ticks = (0..21).filter(|_| s.frame()).count();
        assert_eq!(ticks, 3);
        assert_eq!(s.controller().position(), -27);
        assert_eq!(mock.writes().len(), 3);
        assert_eq!(mock.last_frame(), Some(s.controller().current_visible_frame()));
    }

    #[test]
    fn test_unopened_port_still_ends_init() {
        let mut s = session();
        s.select_port(SerialTransmitter::disconnected(ReadyPolicy::Open));
        assert!(s.is_initialized());
        s.controller_mut().submit_text("HI");
        for _ in 0..7 {
            s.frame();
        }
        assert_eq!(s.controller().position(), -29);
    }

    #[test]
    fn test_write_failure_does_not_stop_ticking() {
        let mock = MockLink::new("mock0");
        mock.state().simulate_write_failure = true;
        let mut s = session();
        s.select_port(SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::Open));
        s.controller_mut().submit_text("HI");

        for _ in 0..14 {
            s.frame();
        }
        assert_eq!(s.controller().position(), -28);
        assert_eq!(s.stats().dropped, 2);

        mock.state().simulate_write_failure = false;
        for _ in 0..7 {
            s.frame();
        }
        assert_eq!(mock.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_commands_drive_modes() {
        let mut s = session();
        let w = weather();

        assert_eq!(s.handle(Command::ShowClock, &w).await, Flow::Continue);
        assert_eq!(s.controller().mode(), Mode::Clock);
        assert_eq!(s.controller().text(), "08:30");

        s.handle(Command::ShowDate, &w).await;
        assert_eq!(s.controller().text(), "12/25");

        s.handle(Command::ShowWeather, &w).await;
        assert_eq!(s.controller().mode(), Mode::Weather);
        assert_eq!(s.controller().text(), "ERROR");

        s.handle(Command::TogglePause, &w).await;
        assert!(!s.controller().is_paused());

        s.handle(Command::Submit("HELLO".into()), &w).await;
        assert_eq!(s.controller().mode(), Mode::Custom);

        s.handle(Command::Clear, &w).await;
        assert_eq!(s.controller().mode(), Mode::Idle);

        assert_eq!(s.handle(Command::Quit, &w).await, Flow::Quit);
    }

    #[tokio::test]
    async fn test_first_line_selects_port_then_commands() {
        let mut s = session();
        let w = weather();

        assert_eq!(s.handle_line("  ", &w, ReadyPolicy::Open).await, Flow::Continue);
        assert!(s.is_initialized());
        assert_eq!(s.stats(), TransmitStats::default());
        assert_eq!(s.controller().mode(), Mode::Idle);

        s.handle_line(":time", &w, ReadyPolicy::Open).await;
        assert_eq!(s.controller().mode(), Mode::Clock);
        s.handle_line(":bogus", &w, ReadyPolicy::Open).await;
        assert_eq!(s.controller().mode(), Mode::Clock);
        assert_eq!(s.handle_line(":status", &w, ReadyPolicy::Open).await, Flow::Continue);
        assert_eq!(s.handle_line(":quit", &w, ReadyPolicy::Open).await, Flow::Quit);
    }

    #[test]
    fn test_frames_run_without_console_input() {
        let mock = MockLink::new("mock0");
        let mut s = session();
        s.select_port(SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::Open));
        s.controller_mut().submit_text("HEADLESS");

        for _ in 0..70 {
            s.frame();
        }
        assert_eq!(s.controller().position(), -20);
        assert_eq!(mock.writes().len(), 10);
    }

    #[test]
    fn test_mirror_is_wider_than_board() {
        let s = session();
        assert_eq!(s.mirror_frame().width(), 40);
        assert!(s.status_report().starts_with("state: idle"));
    }
}
