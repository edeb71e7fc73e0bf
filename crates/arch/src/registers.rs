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

use crate::CpuPrivilege;

/// A segment selector: the byte offset of a descriptor in the active
/// descriptor table, with the requested privilege in the low bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct Segment(pub u16);

impl Segment {
    pub const fn new(table_index: u16, privl: CpuPrivilege) -> Self {
        Self((table_index << 3) | privl.as_u16())
    }
}

pub struct SegmentRegisters;

impl SegmentRegisters {
    /// Point every data segment register at `segment`.
    pub unsafe fn set_data_segments(segment: Segment) {
        core::arch::asm!(
            "mov ds, ax",
            "mov es, ax",
            "mov ss, ax",
            "mov fs, ax",
            "mov gs, ax",
            in("ax") segment.0
        )
    }
}

pub mod eflags {
    #[inline(never)]
    pub fn read() -> u32 {
        #[cfg(target_pointer_width = "64")]
        {
            let flags: u64;
            unsafe {
                core::arch::asm!("
                    pushfq
                    pop {0}
                ",
                    out(reg) flags
                )
            }
            flags as u32
        }

        #[cfg(not(target_pointer_width = "64"))]
        {
            let flags: u32;
            unsafe {
                core::arch::asm!("
                    pushfd
                    pop {0:e}
                ",
                    out(reg) flags
                )
            }
            flags
        }
    }

    const CARRY_FLAG: u32 = 1 << 0;

    #[inline]
    pub fn is_carry_set() -> bool {
        read() & CARRY_FLAG != 0
    }
}

pub mod cr0 {
    pub const PROTECTED_MODE: u64 = 1 << 0;

    #[inline(always)]
    pub fn read() -> u64 {
        #[cfg(target_pointer_width = "64")]
        {
            let flags: u64;
            unsafe {
                core::arch::asm!(
                    "mov rax, cr0",
                    out("rax") flags
                )
            }
            flags
        }

        #[cfg(not(target_pointer_width = "64"))]
        {
            let flags: u32;
            unsafe {
                core::arch::asm!(
                    "mov eax, cr0",
                    out("eax") flags
                )
            }
            flags as u64
        }
    }

    #[inline(always)]
    pub unsafe fn write(value: u64) {
        #[cfg(target_pointer_width = "64")]
        core::arch::asm!(
            "mov cr0, rax",
            in("rax") value
        );

        #[cfg(not(target_pointer_width = "64"))]
        core::arch::asm!(
            "mov cr0, eax",
            in("eax") (value as u32)
        );
    }

    pub fn is_protected_mode_set() -> bool {
        read() & PROTECTED_MODE != 0
    }

    pub unsafe fn set_protected_mode(enable: bool) {
        let flags = read();

        if enable {
            write(flags | PROTECTED_MODE);
        } else {
            write(flags & !PROTECTED_MODE);
        }
    }
}
