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

#![no_std]

/// Align `addr` to `alignment`
///
/// Pushes `addr` up until it reaches an address that satisfies `alignment`.
pub const fn align_to(addr: u64, alignment: usize) -> u64 {
    let rmd = addr % (alignment as u64);

    if rmd != 0 {
        ((alignment as u64) - rmd) + addr
    } else {
        addr
    }
}

/// Check the alignment of `addr` and `alignment`
pub const fn is_align_to(addr: u64, alignment: usize) -> bool {
    (addr & (alignment as u64 - 1)) == 0
}
