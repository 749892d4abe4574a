/*
 *  serial/transmitter.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Pushes the visible frame to the board once per tick
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

use log::{debug, info, warn};

use crate::display::bitmap::VisibleFrame;
use crate::serial::codec::encode_frame;
use crate::serial::error::SerialError;
use crate::serial::port::{available_ports, resolve_port_name, PortLink};
use crate::serial::traits::{ReadyPolicy, SerialLink};

/// Running totals, handy for the status report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransmitStats {
    pub written: u64,
    pub skipped: u64,
    pub dropped: u64,
}

/// Owns the (optional) link to the board.
///
/// Without a link every send is a silent no-op: the board is simply not
/// attached and there is nothing to report.
pub struct SerialTransmitter {
    link: Option<Box<dyn SerialLink>>,
    policy: ReadyPolicy,
    stats: TransmitStats,
}

impl SerialTransmitter {
    /// A transmitter with no port; sends do nothing.
    pub fn disconnected(policy: ReadyPolicy) -> Self {
        Self { link: None, policy, stats: TransmitStats::default() }
    }

    pub fn with_link(link: Box<dyn SerialLink>, policy: ReadyPolicy) -> Self {
        Self { link: Some(link), policy, stats: TransmitStats::default() }
    }

    /// Open the port named (or indexed) by `selector`. A failed selection is
    /// logged and yields a disconnected transmitter rather than an error.
    pub fn select(selector: Option<&str>, policy: ReadyPolicy) -> Self {
        let Some(selector) = selector else {
            info!("No serial port selected; frames will not be transmitted");
            return Self::disconnected(policy);
        };

        let opened = available_ports()
            .or_else(|e| {
                debug!("Port enumeration failed: {}", e);
                Ok::<_, SerialError>(Vec::new())
            })
            .and_then(|ports| resolve_port_name(selector, &ports))
            .and_then(|name| PortLink::open(&name));

        match opened {
            Ok(link) => Self::with_link(Box::new(link), policy),
            Err(e) => {
                warn!("Could not open serial port '{}': {}", selector, e);
                Self::disconnected(policy)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn port_name(&self) -> Option<&str> {
        self.link.as_ref().map(|l| l.name())
    }

    pub fn policy(&self) -> ReadyPolicy {
        self.policy
    }

    pub fn stats(&self) -> TransmitStats {
        self.stats
    }

    /// Whether a frame would be written right now.
    pub fn is_ready(&mut self) -> bool {
        let Some(link) = self.link.as_mut() else {
            return false;
        };
        if !link.is_open() {
            return false;
        }
        match self.policy {
            ReadyPolicy::Open => true,
            ReadyPolicy::InputPending => match link.bytes_pending() {
                Ok(n) => n > 0,
                Err(e) => {
                    debug!("Readiness check on {} failed: {}", link.name(), e);
                    false
                }
            },
        }
    }

    /// Encode and write `frame` in one call when the link is ready.
    ///
    /// Returns `Ok(())` when there is no link or it is not ready. A write
    /// fault is returned so the caller can log it; the frame is counted as
    /// dropped and the next tick simply sends fresh data.
    pub fn send(&mut self, frame: &VisibleFrame) -> Result<(), SerialError> {
        if !self.is_ready() {
            self.stats.skipped += 1;
            return Ok(());
        }
        let Some(link) = self.link.as_mut() else {
            return Ok(());
        };

        let payload = encode_frame(frame);
        match link.write_frame(payload.as_bytes()) {
            Ok(()) => {
                self.stats.written += 1;
                Ok(())
            }
            Err(e) => {
                self.stats.dropped += 1;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::bitmap::BitMatrix;
    use crate::serial::mock::MockLink;

    fn frame() -> BitMatrix {
        let mut f = BitMatrix::new(4, 2);
        f.set(1, 0, true);
        f.set(3, 1, true);
        f
    }

    #[test]
    fn test_disconnected_send_is_silent_noop() {
        let mut tx = SerialTransmitter::disconnected(ReadyPolicy::Open);
        assert!(!tx.is_connected());
        assert!(tx.send(&frame()).is_ok());
        assert_eq!(tx.stats().written, 0);
    }

    #[test]
    fn test_select_without_port_is_disconnected() {
        let tx = SerialTransmitter::select(None, ReadyPolicy::Open);
        assert!(!tx.is_connected());
    }

    #[test]
    fn test_select_missing_port_is_disconnected() {
        let tx = SerialTransmitter::select(Some("/dev/ledticker-missing"), ReadyPolicy::Open);
        assert!(!tx.is_connected());
        assert_eq!(tx.port_name(), None);
    }

    #[test]
    fn test_open_policy_writes_single_payload() {
        let mock = MockLink::new("mock0");
        let mut tx = SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::Open);
        tx.send(&frame()).unwrap();
        assert_eq!(mock.writes(), vec!["0100, 0001".to_string()]);
        assert_eq!(mock.state().write_attempts, 1);
        assert_eq!(mock.last_frame(), Some(frame()));
        assert_eq!(tx.stats().written, 1);
    }

    #[test]
    fn test_input_pending_policy_waits_for_board() {
        let mock = MockLink::new("mock0");
        let mut tx = SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::InputPending);

        tx.send(&frame()).unwrap();
        assert!(mock.writes().is_empty());
        assert_eq!(tx.stats().skipped, 1);

        mock.state().pending_input = 1;
        tx.send(&frame()).unwrap();
        assert_eq!(mock.writes().len(), 1);
    }

    #[test]
    fn test_closed_link_is_not_ready() {
        let mock = MockLink::new("mock0");
        mock.state().open = false;
        let mut tx = SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::Open);
        assert!(!tx.is_ready());
        tx.send(&frame()).unwrap();
        assert_eq!(mock.state().write_attempts, 0);
    }

    #[test]
    fn test_write_failure_is_reported_and_counted() {
        let mock = MockLink::new("mock0");
        mock.state().simulate_write_failure = true;
        let mut tx = SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::Open);

        assert!(matches!(tx.send(&frame()), Err(SerialError::Write(_))));
        assert_eq!(tx.stats().dropped, 1);

        // next send goes through once the fault clears
        mock.state().simulate_write_failure = false;
        tx.send(&frame()).unwrap();
        assert_eq!(tx.stats(), TransmitStats { written: 1, skipped: 0, dropped: 1 });
    }
}
