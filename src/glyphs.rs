/*
 *  glyphs.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed font table: rasterised mono font glyphs keyed by character
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

use std::borrow::Cow;
use std::collections::HashMap;

use embedded_graphics::mono_font::iso_8859_1::{FONT_5X7, FONT_5X8, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use log::debug;

use crate::display::bitmap::BitMatrix;

/// Names accepted by [`FontTable::by_name`].
pub const FONT_NAMES: [&str; 3] = ["6x10", "5x8", "5x7"];

/// Degree mark used by the weather text; the only non-ASCII glyph in the table.
pub const DEGREE_SIGN: char = '\u{00B0}';

/// Character to fixed-height bitmap lookup.
pub trait GlyphTable {
    /// Row count shared by every glyph.
    fn height(&self) -> usize;

    /// Width of the blank stand-in for unmapped characters.
    fn default_width(&self) -> usize;

    fn glyph(&self, c: char) -> Option<&BitMatrix>;

    /// Never fails: unmapped characters become a blank glyph of `default_width()`.
    fn resolve(&self, c: char) -> Cow<'_, BitMatrix> {
        match self.glyph(c) {
            Some(g) => Cow::Borrowed(g),
            None => {
                debug!("No glyph for {:?}, substituting blank", c);
                Cow::Owned(BitMatrix::new(self.default_width(), self.height()))
            }
        }
    }
}

/// An immutable glyph map, rasterised once on construction.
#[derive(Debug, Clone)]
pub struct FontTable {
    height: usize,
    default_width: usize,
    glyphs: HashMap<char, BitMatrix>,
}

impl FontTable {
    /// Rasterise printable ASCII plus the degree sign from a mono font.
    pub fn from_mono_font(font: &MonoFont<'_>) -> Self {
        let width = font.character_size.width as usize;
        let height = font.character_size.height as usize;
        let style = MonoTextStyle::new(font, BinaryColor::On);

        let mut glyphs = HashMap::new();
        for c in (' '..='~').chain(std::iter::once(DEGREE_SIGN)) {
            let mut bitmap = BitMatrix::new(width, height);
            let mut utf8 = [0u8; 4];
            Text::with_baseline(c.encode_utf8(&mut utf8), Point::zero(), style, Baseline::Top)
                .draw(&mut bitmap)
                .ok();
            glyphs.insert(c, bitmap);
        }

        Self { height, default_width: width, glyphs }
    }

    /// Build a table from row patterns, `'#'` or `'1'` lit, anything else unlit.
    /// Every pattern must have `height` rows; rows shorter than the widest are padded off.
    pub fn from_patterns(height: usize, default_width: usize, patterns: &[(char, &[&str])]) -> Self {
        let glyphs = patterns
            .iter()
            .map(|(c, rows)| {
                debug_assert_eq!(rows.len(), height, "glyph {:?} must have {} rows", c, height);
                let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
                let mut bitmap = BitMatrix::new(width, height);
                for (row, line) in rows.iter().enumerate() {
                    for (col, px) in line.chars().enumerate() {
                        bitmap.set(col, row, px == '#' || px == '1');
                    }
                }
                (*c, bitmap)
            })
            .collect();

        Self { height, default_width, glyphs }
    }

    /// Look up one of the built-in fonts by its [`FONT_NAMES`] entry.
    pub fn by_name(name: &str) -> Option<Self> {
        let font = match name.to_ascii_lowercase().as_str() {
            "6x10" => &FONT_6X10,
            "5x8" => &FONT_5X8,
            "5x7" => &FONT_5X7,
            _ => return None,
        };
        Some(Self::from_mono_font(font))
    }

    pub fn len(&self) -> usize { self.glyphs.len() }
    pub fn is_empty(&self) -> bool { self.glyphs.is_empty() }
}

impl Default for FontTable {
    /// 6x10 gives the 10 rows the board is built with.
    fn default() -> Self {
        Self::from_mono_font(&FONT_6X10)
    }
}

impl GlyphTable for FontTable {
    fn height(&self) -> usize { self.height }
    fn default_width(&self) -> usize { self.default_width }

    fn glyph(&self, c: char) -> Option<&BitMatrix> {
        self.glyphs.get(&c)
    }
}
