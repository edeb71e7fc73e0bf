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
#![no_main]

use quble::chain;
use quble::info::{QubleInfo, QUBLE_INFO_ADDR};
use quble::LoadError;

use crate::disk::BiosDisk;

mod console;
mod disk;
mod handoff;
mod panic;

#[no_mangle]
#[link_section = ".begin"]
extern "C" fn entry() {
    // The fixed-address boundary: adopt the record the boot sector left
    // behind and fold in the drive byte it staged before it had a stack.
    let info = unsafe { QubleInfo::from_ptr(QUBLE_INFO_ADDR) };
    info.disk_id = unsafe { QubleInfo::staged_disk_id() } as u16;

    console::install();
    bios::video::set_text_mode();

    main(info);
}

fn main(info: &mut QubleInfo) -> ! {
    bootlog::set_stage_tag("quble");
    bootlog::println!("Quble stage loader");

    let Some(next_stage) = (unsafe { chain::current_entry(info) }) else {
        bootlog::println!("boot chain exhausted, nothing left to load");
        arch::halt();
    };

    let mut disk = BiosDisk::new(info.disk_id);
    let free = match quble::load_next_stage(&mut disk, info) {
        Ok(free) => free,
        Err(LoadError::Disk) => {
            bootlog::println!("boot medium read failed");
            arch::halt();
        }
    };

    bootlog::println!(
        "loaded stage at {:#x}..{:#x} ({} bytes)",
        next_stage.code,
        free,
        next_stage.size
    );

    // From here on the screen belongs to the direct VGA driver; the next
    // stage runs in protected mode where the BIOS teletype is gone.
    let mut screen = unsafe { bootvga::LineWriter::hardware() };
    screen.print_line("quble: entering next stage");

    unsafe { handoff::enter_protected(info.variant.code as u32, info) }
}
