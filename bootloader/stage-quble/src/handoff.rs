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

//! Protected-mode entry and the handoff to the next stage.
//!
//! The descriptor table below is fully built before execution starts;
//! nothing here ever edits an entry at run time, segment registers are only
//! ever loaded with the named selectors.

use arch::gdt::{GlobalDescriptorTable, SegmentAccess, SegmentDesc};
use arch::registers::{cr0, Segment};
use arch::CpuPrivilege;
use quble::QubleInfo;

const FLAT_CODE: SegmentAccess = SegmentAccess::new().present().code().readable();
const FLAT_DATA: SegmentAccess = SegmentAccess::new().present().data().writable();

const CODE_ENTRY: usize = 1;
const DATA_ENTRY: usize = 2;

pub const CODE_SELECTOR: Segment = Segment::new(CODE_ENTRY as u16, CpuPrivilege::Ring0);
pub const DATA_SELECTOR: Segment = Segment::new(DATA_ENTRY as u16, CpuPrivilege::Ring0);

static BOOT_GDT: GlobalDescriptorTable<3> = GlobalDescriptorTable::new()
    .with(
        CODE_ENTRY,
        SegmentDesc::protected(0, 0xF_FFFF, FLAT_CODE, true, true),
    )
    .with(
        DATA_ENTRY,
        SegmentDesc::protected(0, 0xF_FFFF, FLAT_DATA, true, true),
    );

/// Switch to protected mode and jump into the next stage.
///
/// Register contract on arrival: `esi` holds the info record address, `cs`
/// is [`CODE_SELECTOR`], every data segment register is [`DATA_SELECTOR`],
/// and the stack is whatever this stage left behind.
pub unsafe fn enter_protected(stage: u32, info: &mut QubleInfo) -> ! {
    arch::interrupts::disable_interrupts();

    BOOT_GDT.pack().load();
    cr0::set_protected_mode(true);

    core::arch::asm!(
        // far return through the fresh code descriptor to reload cs
        "push {code}",
        "lea eax, [2f]",
        "push eax",
        "retf",
        "2:",
        "mov ds, {data:x}",
        "mov es, {data:x}",
        "mov ss, {data:x}",
        "mov fs, {data:x}",
        "mov gs, {data:x}",
        "jmp {stage:e}",
        code = in(reg) CODE_SELECTOR.0 as u32,
        data = in(reg) DATA_SELECTOR.0 as u32,
        stage = in(reg) stage,
        in("esi") info as *mut QubleInfo as u32,
        in("eax") 0u32,
        options(noreturn),
    )
}
