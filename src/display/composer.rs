/*
 *  display/composer.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Builds the full message buffer: glyphs abut within a word, words are spaced
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

use crate::constants::WORD_SPACING;
use crate::display::bitmap::Buffer;
use crate::glyphs::GlyphTable;

/// Width in columns `text` composes to, without building the buffer.
pub fn composed_width<G: GlyphTable + ?Sized>(glyphs: &G, text: &str) -> usize {
    let mut width = 0;
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            width += WORD_SPACING;
        }
        width += word.chars().map(|c| glyphs.resolve(c).width()).sum::<usize>();
    }
    width
}

/// Compose `text` into one continuous bitmap of the table's height.
///
/// Blank or empty input yields a zero-width buffer. Unmapped characters
/// occupy a blank glyph, so composition never fails.
pub fn compose<G: GlyphTable + ?Sized>(glyphs: &G, text: &str) -> Buffer {
    let words: Vec<Vec<_>> = text
        .split_whitespace()
        .map(|word| word.chars().map(|c| glyphs.resolve(c)).collect())
        .collect();

    let glyph_columns: usize = words.iter().flatten().map(|g| g.width()).sum();
    let width = glyph_columns + WORD_SPACING * words.len().saturating_sub(1);
    let mut buffer = Buffer::new(width, glyphs.height());

    let mut col = 0;
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            col += WORD_SPACING;
        }
        for glyph in word {
            buffer.blit(glyph, col);
            col += glyph.width();
        }
    }
    debug_assert_eq!(col, buffer.width());

    buffer
}
