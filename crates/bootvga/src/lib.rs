/*
   ____        __    __
  / __ \__  __/ /_  / /__
 / / / / / / / __ \/ / _ \
/ /_/ / /_/ / /_/ / /  __/
\___\_\__,_/_.___/_/\___/
    Part of the Quble Boot Project

Copyright 2025 Quble Boot contributors

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
associated documentation files (the "Software"), to deal in the Software without restriction,
including without limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial
portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT
OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
*/

//! Line-based text output over the VGA interface, one line after another.
//!
//! This skips the BIOS entirely, so the same driver works in real mode and
//! protected mode. The writer owns the cursor: each call prints one string
//! at the current line, clears the remainder of the line, clips anything
//! longer than a line, and scrolls once the screen is full.

#![no_std]

use volatile::Volatile;

pub const WIDTH: usize = 80;
pub const HEIGHT: usize = 25;

/// Where the adapter maps the text screen.
pub const VGA_TEXT_ADDR: usize = 0xB8000;

/// Light grey on black, the attribute everything here is drawn with.
const ATTRIBUTE: u16 = 0x07;

pub type TextBuffer = [[u16; WIDTH]; HEIGHT];

pub struct LineWriter<'a> {
    row: usize,
    buffer: &'a mut TextBuffer,
}

impl<'a> LineWriter<'a> {
    pub fn new(buffer: &'a mut TextBuffer) -> Self {
        Self { row: 0, buffer }
    }

    /// A writer over the live VGA text screen.
    ///
    /// # Safety
    /// The adapter must be in 80x25 text mode and nothing else may be
    /// drawing to it while this writer exists.
    pub unsafe fn hardware() -> LineWriter<'static> {
        LineWriter::new(&mut *(VGA_TEXT_ADDR as *mut TextBuffer))
    }

    /// Print `line` at the current cursor line.
    ///
    /// The rest of the line is cleared, anything past the line width is
    /// clipped, and the screen scrolls when the cursor would pass the last
    /// line.
    pub fn print_line(&mut self, line: &str) {
        if self.row == HEIGHT {
            self.scroll();
            self.row = HEIGHT - 1;
        }

        let mut bytes = line.bytes();
        for col in 0..WIDTH {
            let byte = match bytes.next() {
                Some(byte) if byte.is_ascii_graphic() || byte == b' ' => byte,
                Some(_) => b'?',
                None => b' ',
            };

            self.put(self.row, col, byte);
        }

        self.row += 1;
    }

    fn put(&mut self, row: usize, col: usize, byte: u8) {
        Volatile::new(&mut self.buffer[row][col]).write((ATTRIBUTE << 8) | byte as u16);
    }

    fn scroll(&mut self) {
        for row in 1..HEIGHT {
            for col in 0..WIDTH {
                let cell = Volatile::new(&self.buffer[row][col]).read();
                Volatile::new(&mut self.buffer[row - 1][col]).write(cell);
            }
        }

        for col in 0..WIDTH {
            self.put(HEIGHT - 1, col, b' ');
        }
    }
}
