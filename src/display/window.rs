/*
 *  display/window.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Board-width window into a composed buffer at a signed scroll offset
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

use crate::constants::WINDOW_TRIM_COLUMNS;
use crate::display::bitmap::{Buffer, VisibleFrame};

/// Slice `visible_width` columns out of `buffer` starting at `position`.
///
/// A negative position pads `-position` blank columns on the left, so the
/// message scrolls in from the right edge. Columns past the end of the buffer
/// are blank. Buffers of `WINDOW_TRIM_COLUMNS` width or less always window
/// to an all-off frame. The frame is always `visible_width` x `buffer.height()`.
pub fn window(buffer: &Buffer, position: i32, visible_width: usize) -> VisibleFrame {
    let mut frame = VisibleFrame::new(visible_width, buffer.height());

    if buffer.width() <= WINDOW_TRIM_COLUMNS {
        return frame;
    }

    let (src_col, dst_col) = if position >= 0 {
        (position as usize, 0)
    } else {
        (0, position.unsigned_abs() as usize)
    };

    if src_col >= buffer.width() || dst_col >= visible_width {
        return frame;
    }

    // copy_columns clamps the end to both widths
    frame.copy_columns(buffer, src_col, dst_col, visible_width - dst_col);
    frame
}
