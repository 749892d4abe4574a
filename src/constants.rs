//! This module contains global constants shared by the composer, the scroll engine and the serial link.

/// Number of LED rows on the physical board (matches the 6x10 mono font).
pub const BOARD_HEIGHT: usize = 10;
/// Number of LED columns visible on the physical board.
pub const BOARD_WIDTH: usize = 30;
/// Extra blank columns the console mirror shows to the right of the board.
pub const MIRROR_EXCESS_WIDTH: usize = 10;

/// Blank columns inserted between consecutive words.
pub const WORD_SPACING: usize = 2;
/// Buffers this narrow (or narrower) never produce lit columns when windowed.
pub const WINDOW_TRIM_COLUMNS: usize = 2;

/// Scroll speed applied to custom messages and when un-pausing.
/// Negative scrolls left, i.e. forward through the message.
pub const DEFAULT_SCROLL_SPEED: i32 = -1;

/// Fixed serial line rate for the LED board firmware.
pub const SERIAL_BAUD_RATE: u32 = 9600;
/// Separator placed between encoded rows on the wire.
pub const ROW_SEPARATOR: &str = ", ";
/// Write timeout for the serial port.
pub const SERIAL_TIMEOUT_MS: u64 = 100;

/// Host redraw rate.
pub const DEFAULT_FPS: u32 = 60;
/// The controller advances once every this many host frames.
pub const DEFAULT_TICK_EVERY: u64 = 7;

/// In-band text shown when the weather lookup fails.
pub const WEATHER_ERROR_TEXT: &str = "ERROR";
/// OpenWeatherMap current conditions endpoint.
pub const OPENWEATHERMAP_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
/// HTTP timeout for the weather lookup.
pub const WEATHER_TIMEOUT_SECS: u64 = 10;

/// Clock text format (24 hour).
pub const CLOCK_FORMAT: &str = "%H:%M";
/// Date text format.
pub const DATE_FORMAT: &str = "%m/%d";
