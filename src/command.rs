/*
 *  command.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Console command parsing: mode buttons as words, anything else is text to show
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

use thiserror::Error;

/// A request from the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowClock,
    ShowDate,
    ShowWeather,
    TogglePause,
    Clear,
    Status,
    Quit,
    /// Custom text to scroll across the board
    Submit(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command ':{0}' (try :time :date :weather :pause :clear :status :quit)")]
    Unknown(String),
}

/// Parse one console line.
///
/// Lines starting with `:` are commands (case-insensitive); `::` escapes a
/// literal leading colon. Everything else, including an empty line, is text.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(text) = line.strip_prefix("::") {
        return Ok(Command::Submit(format!(":{}", text)));
    }
    let Some(word) = line.strip_prefix(':') else {
        return Ok(Command::Submit(line.to_string()));
    };

    match word.trim().to_ascii_lowercase().as_str() {
        "time" | "clock" => Ok(Command::ShowClock),
        "date" => Ok(Command::ShowDate),
        "weather" => Ok(Command::ShowWeather),
        "pause" => Ok(Command::TogglePause),
        "clear" | "reset" => Ok(Command::Clear),
        "status" => Ok(Command::Status),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
