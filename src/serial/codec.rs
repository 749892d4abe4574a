/*
 *  serial/codec.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  ASCII wire format: one token of 1/0 per row, rows joined by a comma and a space
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

use crate::constants::ROW_SEPARATOR;
use crate::display::bitmap::{BitMatrix, VisibleFrame};

/// Encode a frame as the board firmware expects it: `height` tokens of
/// `'1'`/`'0'`, separated by `", "`, no trailing separator and no terminator.
pub fn encode_frame(frame: &VisibleFrame) -> String {
    let mut out = String::with_capacity(frame.height() * (frame.width() + ROW_SEPARATOR.len()));
    for row in 0..frame.height() {
        if row > 0 {
            out.push_str(ROW_SEPARATOR);
        }
        out.push_str(&frame.row_string(row));
    }
    out
}

/// Parse a payload back into a frame, the way the firmware reads it.
/// Returns `None` for ragged rows or characters other than `'0'`/`'1'`.
pub fn decode_frame(payload: &str) -> Option<VisibleFrame> {
    let rows: Vec<&str> = payload.split(ROW_SEPARATOR).collect();
    let width = rows.first().map_or(0, |r| r.len());
    let mut frame = BitMatrix::new(width, rows.len());
    for (row, token) in rows.iter().enumerate() {
        if token.len() != width {
            return None;
        }
        for (col, c) in token.chars().enumerate() {
            match c {
                '1' => frame.set(col, row, true),
                '0' => {}
                _ => return None,
            }
        }
    }
    Some(frame)
}
