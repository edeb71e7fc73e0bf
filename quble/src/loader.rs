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

use crate::chain::{self, ChainEntry};
use crate::error::Result;
use crate::info::QubleInfo;
use crate::io::{BlockRead, SECTOR_SIZE};

/// Sectors per read request. Interfaces of this class cap how many sectors
/// one request may move, so larger images go out as multiple runs.
pub const MAX_SECTORS_PER_READ: usize = 32;

/// Pull the next boot-chain stage into memory.
///
/// Resolves the entry at `info.bootchain`, reads its image sector by sector
/// into the entry's destination, and only then commits: the chain cursor
/// advances one entry, `info.variant` records where the image and its
/// payload now reside, and the address just past the loaded image comes
/// back so the caller can place further data without overlap.
///
/// On a read failure nothing commits — `info` is exactly as it was, apart
/// from whatever sectors the medium's native service already placed in
/// memory. No retry happens here; that decision belongs to the caller.
pub fn load_next_stage<D: BlockRead>(disk: &mut D, info: &mut QubleInfo) -> Result<u64> {
    let entry = unsafe { chain::current_entry(info) };
    let Some(entry) = entry else {
        panic!("loading past the end of the boot chain");
    };

    // Whole sectors only: the medium cannot move less, so the next free
    // address also rounds up to the last byte the reads touched.
    let padded = util::align_to(entry.size, SECTOR_SIZE) as usize;
    let dest = unsafe { core::slice::from_raw_parts_mut(entry.code as usize as *mut u8, padded) };

    let mut lba = entry.lba;
    for run in dest.chunks_mut(MAX_SECTORS_PER_READ * SECTOR_SIZE) {
        disk.read_blocks(lba, run)?;
        lba += (run.len() / SECTOR_SIZE) as u64;
    }

    info.bootchain += size_of::<ChainEntry>() as u64;
    info.variant.code = entry.code;
    info.variant.payload = entry.payload;

    Ok(entry.code + padded as u64)
}
