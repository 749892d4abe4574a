/*
 *  display/bitmap.rs
 *
 *  ledticker - scroll it, send it
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed size on/off bit matrix shared by glyphs, buffers and visible frames
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// A runtime-sized, row-major on/off matrix.
///
/// One byte per cell keeps column slicing trivial; widths are fixed at
/// construction so the height/width invariants can be asserted in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    cells: Vec<u8>,
    w: usize,
    h: usize,
}

/// The full composed message before windowing.
pub type Buffer = BitMatrix;

/// The board-width slice of a [`Buffer`] that is displayed and transmitted.
pub type VisibleFrame = BitMatrix;

impl BitMatrix {
    /// All-off matrix of the given size. A zero width is valid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { cells: vec![0; width * height], w: width, h: height }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    #[inline]
    fn idx(&self, col: usize, row: usize) -> Option<usize> {
        if col < self.w && row < self.h {
            Some(row * self.w + col)
        } else {
            None
        }
    }

    /// Out-of-bounds cells read as off.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> bool {
        self.idx(col, row).is_some_and(|i| self.cells[i] != 0)
    }

    /// Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, col: usize, row: usize, on: bool) {
        if let Some(i) = self.idx(col, row) {
            self.cells[i] = on as u8;
        }
    }

    /// One row as a slice of 0/1 cells.
    pub fn row(&self, row: usize) -> &[u8] {
        if row >= self.h {
            return &[];
        }
        &self.cells[row * self.w..(row + 1) * self.w]
    }

    pub fn column_is_blank(&self, col: usize) -> bool {
        (0..self.h).all(|row| !self.get(col, row))
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Copy `count` columns of `src` starting at `src_col` into this matrix at `dst_col`.
    /// Rows beyond either height and columns beyond either width are clipped.
    pub fn copy_columns(&mut self, src: &BitMatrix, src_col: usize, dst_col: usize, count: usize) {
        let rows = self.h.min(src.h);
        let count = count
            .min(src.w.saturating_sub(src_col))
            .min(self.w.saturating_sub(dst_col));
        if count == 0 {
            return;
        }
        for row in 0..rows {
            let s = row * src.w + src_col;
            let d = row * self.w + dst_col;
            self.cells[d..d + count].copy_from_slice(&src.cells[s..s + count]);
        }
    }

    /// Paste the whole of `src` at `dst_col`.
    pub fn blit(&mut self, src: &BitMatrix, dst_col: usize) {
        self.copy_columns(src, 0, dst_col, src.w);
    }

    /// A row as `'1'`/`'0'` characters, the serial wire alphabet.
    pub fn row_string(&self, row: usize) -> String {
        self.row(row).iter().map(|&c| if c != 0 { '1' } else { '0' }).collect()
    }

    /// Console rendering, lit cells as `X `.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.h * (self.w * 2 + 1));
        for row in 0..self.h {
            for &c in self.row(row) {
                out.push_str(if c != 0 { "X " } else { "  " });
            }
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for BitMatrix {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for BitMatrix {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if p.x >= 0 && p.y >= 0 {
                self.set(p.x as usize, p.y as usize, c.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.cells.fill(color.is_on() as u8);
        Ok(())
    }
}
