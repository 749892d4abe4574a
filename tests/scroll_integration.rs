/*
 *  tests/scroll_integration.rs
 *
 *  End to end checks: compose, window, tick and transmit
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 */

use ledticker::clock::FixedClock;
use ledticker::constants::{DEFAULT_SCROLL_SPEED, WEATHER_ERROR_TEXT};
use ledticker::display::{compose, composed_width, window, ControllerConfig, DisplayController, Mode};
use ledticker::glyphs::{FontTable, GlyphTable, FONT_NAMES};
use ledticker::serial::{decode_frame, MockLink, ReadyPolicy, SerialTransmitter};

const BOARD: usize = 30;

fn controller(glyphs: FontTable) -> DisplayController {
    DisplayController::new(
        ControllerConfig { board_width: BOARD, ..ControllerConfig::default() },
        Box::new(glyphs),
        Box::new(FixedClock::new("12:00", "01/01")),
    )
}

/// 5x5 block letters, enough for the messages below.
fn block_font() -> FontTable {
    FontTable::from_patterns(5, 5, &[
        ('H', &["#...#", "#...#", "#####", "#...#", "#...#"]),
        ('I', &["#####", "..#..", "..#..", "..#..", "#####"]),
        ('O', &[".###.", "#...#", "#...#", "#...#", ".###."]),
        ('K', &["#..#.", "#.#..", "##...", "#.#..", "#..#."]),
    ])
}

#[test]
fn test_every_font_composes_to_its_height() {
    for name in FONT_NAMES {
        let font = FontTable::by_name(name).unwrap();
        for s in ["", " ", "HI", "HELLO WORLD", "72°F", "~{}|"] {
            assert_eq!(compose(&font, s).height(), font.height(), "{} {:?}", name, s);
        }
    }
}

#[test]
fn test_empty_message_windows_all_off() {
    let font = FontTable::default();
    let empty = compose(&font, "");
    assert_eq!(empty.width(), 0);
    for p in [-40, -1, 0, 1, 40] {
        for w in [0, 1, 30] {
            let frame = window(&empty, p, w);
            assert!(frame.is_blank());
            assert_eq!(frame.width(), w);
        }
    }
}

#[test]
fn test_positive_offset_starts_at_column() {
    let font = FontTable::default();
    let buf = compose(&font, "HELLO WORLD");
    let w = 12;
    for p in 0..=(buf.width() - w) as i32 {
        let frame = window(&buf, p, w);
        for row in 0..buf.height() {
            let expected: String = buf.row_string(row).chars().skip(p as usize).take(w).collect();
            assert_eq!(frame.row_string(row), expected);
        }
    }
}

#[test]
fn test_negative_offset_pads_then_matches_zero_window() {
    let font = FontTable::default();
    let buf = compose(&font, "HELLO");
    let w = 20;
    for p in -(w as i32 - 1)..0 {
        let lead = p.unsigned_abs() as usize;
        let frame = window(&buf, p, w);
        let tail = window(&buf, 0, w - lead);
        for col in 0..lead {
            assert!(frame.column_is_blank(col));
        }
        for row in 0..buf.height() {
            assert_eq!(&frame.row_string(row)[lead..], tail.row_string(row));
        }
    }
}

#[test]
fn test_zero_speed_never_moves() {
    let mut c = controller(FontTable::default());
    c.set_message("STILL", -3, Mode::Custom);
    c.set_speed(0);
    for _ in 0..50 {
        c.tick();
    }
    assert_eq!(c.position(), -3);
    assert_eq!(c.mode(), Mode::Custom);
}

#[test]
fn test_reset_happens_exactly_when_message_exits() {
    let mut c = controller(FontTable::default());
    c.submit_text("BYE");
    let size = c.size() as i32;

    let mut ticks = 0;
    while c.mode() == Mode::Custom {
        let before = c.position();
        let reset = c.tick();
        ticks += 1;
        assert_eq!(reset, before + 1 > size);
        assert!(ticks < 1000);
    }
    assert_eq!(ticks, BOARD as i32 + size + 1);
    assert_eq!(c.position(), 0);
    assert_eq!(c.text(), "");
    assert!(c.current_visible_frame().is_blank());
}

#[test]
fn test_two_letter_word_has_no_gap() {
    let block = block_font();
    assert_eq!(compose(&block, "HI").width(), 10);
    assert_eq!(compose(&block, "HI").row_string(0), "#...######".replace('#', "1").replace('.', "0"));

    let five = FontTable::by_name("5x8").unwrap();
    assert_eq!(compose(&five, "HI").width(), 10);
}

#[test]
fn test_words_are_two_columns_apart() {
    let font = FontTable::default();
    let expected = composed_width(&font, "HI") + 2 + composed_width(&font, "THERE");
    assert_eq!(compose(&font, "HI THERE").width(), expected);
    assert_eq!(compose(&font, "HI   THERE").width(), expected);
}

#[test]
fn test_message_scrolls_into_place() {
    let mut c = controller(block_font());
    c.set_message("OK", -4, Mode::Custom);
    c.set_speed(DEFAULT_SCROLL_SPEED);
    for _ in 0..4 {
        assert!(!c.tick());
    }
    assert_eq!(c.position(), 0);
    assert_eq!(c.current_visible_frame(), window(&compose(&block_font(), "OK"), 0, BOARD));
}

#[test]
fn test_weather_error_renders_as_text() {
    let font = FontTable::default();
    let mut c = controller(FontTable::default());
    c.show_weather(WEATHER_ERROR_TEXT);
    assert_eq!(c.mode(), Mode::Weather);
    assert_eq!(c.text(), "ERROR");

    let frame = c.current_visible_frame();
    assert_eq!(frame, window(&compose(&font, "ERROR"), 0, BOARD));
    assert_eq!(c.size(), 5 * font.default_width());
    assert!(!frame.is_blank());
}

#[test]
fn test_frames_reach_the_wire_intact() {
    let mock = MockLink::new("mock0");
    let mut tx = SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::Open);
    let mut c = controller(FontTable::default());
    c.submit_text("GO");

    let mut sent = Vec::new();
    for _ in 0..10 {
        c.tick();
        let frame = c.current_visible_frame();
        tx.send(&frame).unwrap();
        sent.push(frame);
    }

    let writes = mock.writes();
    assert_eq!(writes.len(), 10);
    for (wire, frame) in writes.iter().zip(&sent) {
        assert_eq!(wire.split(", ").count(), frame.height());
        assert_eq!(decode_frame(wire).as_ref(), Some(frame));
    }
    assert_eq!(tx.stats().written, 10);
}

#[test]
fn test_input_pending_policy_waits_for_board() {
    let mock = MockLink::new("mock0");
    let mut tx = SerialTransmitter::with_link(Box::new(mock.clone()), ReadyPolicy::InputPending);
    let c = controller(FontTable::default());
    let frame = c.current_visible_frame();

    tx.send(&frame).unwrap();
    assert!(mock.writes().is_empty());

    mock.state().pending_input = 1;
    tx.send(&frame).unwrap();
    assert_eq!(mock.writes().len(), 1);
    assert_eq!(tx.stats().skipped, 1);
}
