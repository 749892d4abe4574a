use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::constants::{BOARD_WIDTH, DEFAULT_FPS, DEFAULT_TICK_EVERY, MIRROR_EXCESS_WIDTH};
use crate::glyphs::{FontTable, GlyphTable, FONT_NAMES};
use crate::serial::ReadyPolicy;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration. Every field is optional so layers merge cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub board: Option<BoardConfig>,
    pub serial: Option<SerialConfig>,
    pub weather: Option<WeatherConfig>,
    pub timing: Option<TimingConfig>,
}

/// Board geometry. Height must match the font's glyph height.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub font: Option<String>,          // "6x10" | "5x8" | "5x7"
    pub mirror_excess: Option<usize>,  // extra console columns
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SerialConfig {
    pub port: Option<String>,          // path, or index into the port list
    pub ready_when: Option<ReadyPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,       // openweathermap.org key
    pub zip: Option<String>,           // US 5 digit zip
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimingConfig {
    pub fps: Option<u32>,
    pub tick_every: Option<u64>,       // host frames per controller tick
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "ledticker", version, about = "Scrolling LED marquee over serial")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, short = 'c', value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Enable debug log level
    #[arg(long, short = 'v', alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Serial port path, or its index in --list-ports
    #[arg(long, short = 'p')]
    pub port: Option<String>,
    /// When a frame may be written: open | input_pending
    #[arg(long)]
    pub ready_when: Option<ReadyPolicy>,
    #[arg(long)]
    pub board_width: Option<usize>,
    #[arg(long)]
    pub board_height: Option<usize>,
    #[arg(long, short = 'F')]
    pub font: Option<String>,
    #[arg(long)]
    pub weather_key: Option<String>,
    #[arg(long)]
    pub weather_zip: Option<String>,
    #[arg(long)]
    pub fps: Option<u32>,
    #[arg(long)]
    pub tick_every: Option<u64>,
    /// print the board to stdout after every tick
    #[arg(long, action = ArgAction::SetTrue)]
    pub mirror: bool,
    /// list serial ports and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub list_ports: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Effective settings after merging and defaulting.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub board_width: usize,
    pub board_height: usize,
    pub font: String,
    pub mirror_excess: usize,
    pub port: Option<String>,
    pub ready_when: ReadyPolicy,
    pub weather_key: String,
    pub weather_zip: String,
    pub fps: u32,
    pub tick_every: u64,
}

impl Config {
    /// Fill in defaults. Call after `validate`.
    pub fn settings(&self) -> Settings {
        let board = self.board.clone().unwrap_or_default();
        let serial = self.serial.clone().unwrap_or_default();
        let weather = self.weather.clone().unwrap_or_default();
        let timing = self.timing.clone().unwrap_or_default();
        let font = board.font.unwrap_or_else(|| FONT_NAMES[0].to_string());
        let font_height = FontTable::by_name(&font).map_or(0, |t| t.height());

        Settings {
            log_level: self.log_level.clone().unwrap_or_else(|| "info".to_string()),
            board_width: board.width.unwrap_or(BOARD_WIDTH),
            board_height: board.height.unwrap_or(font_height),
            font,
            mirror_excess: board.mirror_excess.unwrap_or(MIRROR_EXCESS_WIDTH),
            port: serial.port,
            ready_when: serial.ready_when.unwrap_or_default(),
            weather_key: weather.api_key.unwrap_or_default(),
            weather_zip: weather.zip.unwrap_or_default(),
            fps: timing.fps.unwrap_or(DEFAULT_FPS),
            tick_every: timing.tick_every.unwrap_or(DEFAULT_TICK_EVERY),
        }
    }
}

/// Public entry point: read YAML, merge CLI overrides, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Pretty YAML of effective config (nice for debugging)
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/ledticker/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/ledticker/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/ledticker.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["ledticker.yaml", "config.yaml", "config/ledticker.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(s)?)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.board, src.board) {
        (None, Some(c)) => dst.board = Some(c),
        (Some(d), Some(s)) => merge_board(d, s),
        _ => {}
    }
    match (&mut dst.serial, src.serial) {
        (None, Some(c)) => dst.serial = Some(c),
        (Some(d), Some(s)) => {
            if s.port.is_some()       { d.port = s.port; }
            if s.ready_when.is_some() { d.ready_when = s.ready_when; }
        }
        _ => {}
    }
    match (&mut dst.weather, src.weather) {
        (None, Some(c)) => dst.weather = Some(c),
        (Some(d), Some(s)) => {
            if s.api_key.is_some() { d.api_key = s.api_key; }
            if s.zip.is_some()     { d.zip = s.zip; }
        }
        _ => {}
    }
    match (&mut dst.timing, src.timing) {
        (None, Some(c)) => dst.timing = Some(c),
        (Some(d), Some(s)) => {
            if s.fps.is_some()        { d.fps = s.fps; }
            if s.tick_every.is_some() { d.tick_every = s.tick_every; }
        }
        _ => {}
    }
}

fn merge_board(dst: &mut BoardConfig, src: BoardConfig) {
    if src.width.is_some()         { dst.width = src.width; }
    if src.height.is_some()        { dst.height = src.height; }
    if src.font.is_some()          { dst.font = src.font; }
    if src.mirror_excess.is_some() { dst.mirror_excess = src.mirror_excess; }
}

pub fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.debug { cfg.log_level = Some("debug".to_string()); }
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }

    if cli.board_width.is_some() || cli.board_height.is_some() || cli.font.is_some() {
        let board = cfg.board.get_or_insert_with(BoardConfig::default);
        if cli.board_width.is_some()  { board.width = cli.board_width; }
        if cli.board_height.is_some() { board.height = cli.board_height; }
        if cli.font.is_some()         { board.font = cli.font.clone(); }
    }
    if cli.port.is_some() || cli.ready_when.is_some() {
        let serial = cfg.serial.get_or_insert_with(SerialConfig::default);
        if cli.port.is_some()       { serial.port = cli.port.clone(); }
        if cli.ready_when.is_some() { serial.ready_when = cli.ready_when; }
    }
    if cli.weather_key.is_some() || cli.weather_zip.is_some() {
        let weather = cfg.weather.get_or_insert_with(WeatherConfig::default);
        if cli.weather_key.is_some() { weather.api_key = cli.weather_key.clone(); }
        if cli.weather_zip.is_some() { weather.zip = cli.weather_zip.clone(); }
    }
    if cli.fps.is_some() || cli.tick_every.is_some() {
        let timing = cfg.timing.get_or_insert_with(TimingConfig::default);
        if cli.fps.is_some()        { timing.fps = cli.fps; }
        if cli.tick_every.is_some() { timing.tick_every = cli.tick_every; }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(board) = cfg.board.as_ref() {
        if board.width == Some(0) {
            return Err(ConfigError::Validation("board width must be > 0".into()));
        }
        let font_name = board.font.as_deref().unwrap_or(FONT_NAMES[0]);
        let Some(font) = FontTable::by_name(font_name) else {
            return Err(ConfigError::Validation(format!(
                "board font must be one of {}",
                FONT_NAMES.join("|")
            )));
        };
        if let Some(h) = board.height {
            if h != font.height() {
                return Err(ConfigError::Validation(format!(
                    "board height {} does not match font {} ({} rows)",
                    h, font_name, font.height()
                )));
            }
        }
    }
    if let Some(timing) = cfg.timing.as_ref() {
        if timing.fps == Some(0) {
            return Err(ConfigError::Validation("timing fps must be > 0".into()));
        }
        if timing.tick_every == Some(0) {
            return Err(ConfigError::Validation("timing tick_every must be > 0".into()));
        }
    }
    if let Some(weather) = cfg.weather.as_ref() {
        if let Some(zip) = weather.zip.as_deref() {
            if !zip.is_empty() && (zip.len() != 5 || !zip.chars().all(|c| c.is_ascii_digit())) {
                return Err(ConfigError::Validation("weather zip must be a 5 digit US zip code".into()));
            }
        }
    }
    Ok(())
}
