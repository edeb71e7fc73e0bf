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

//! Protected-mode Global Descriptor Tables as constant memory.
//!
//! Tables are fully determined before execution begins: build a
//! [`GlobalDescriptorTable`] with `const fn`s, keep it in a `static`, and at
//! run time only ever load segment registers with the entry offsets. No
//! descriptor is mutated after construction. Long-mode tables are not
//! supported here.

use crate::CpuPrivilege;
use core::arch::asm;

/// The access byte of a protected-mode segment descriptor.
///
/// Bit layout, high to low: present, 2-bit privilege level, descriptor type
/// (set for code/data), executable, direction/conforming, readable/writable,
/// accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct SegmentAccess(u8);

impl SegmentAccess {
    const PRESENT: u8 = 1 << 7;
    const CODE_DATA: u8 = 1 << 4;
    const EXECUTABLE: u8 = 1 << 3;
    const DIRECTION_CONFORMING: u8 = 1 << 2;
    const READ_WRITE: u8 = 1 << 1;
    const ACCESSED: u8 = 1 << 0;

    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn present(self) -> Self {
        Self(self.0 | Self::PRESENT)
    }

    pub const fn privilege(self, privl: CpuPrivilege) -> Self {
        Self(self.0 | ((privl.as_u16() as u8) << 5))
    }

    /// Mark this descriptor as a code segment.
    pub const fn code(self) -> Self {
        Self(self.0 | Self::CODE_DATA | Self::EXECUTABLE)
    }

    /// Mark this descriptor as a data segment.
    pub const fn data(self) -> Self {
        Self(self.0 | Self::CODE_DATA)
    }

    /// Code: execution permitted from a lower privilege level.
    /// Data: the segment grows down.
    pub const fn direction_conforming(self) -> Self {
        Self(self.0 | Self::DIRECTION_CONFORMING)
    }

    /// Code segments: read access allowed (write never is).
    pub const fn readable(self) -> Self {
        Self(self.0 | Self::READ_WRITE)
    }

    /// Data segments: write access allowed (read always is).
    pub const fn writable(self) -> Self {
        Self(self.0 | Self::READ_WRITE)
    }

    /// The CPU sets this on first use; should normally start clear.
    pub const fn accessed(self) -> Self {
        Self(self.0 | Self::ACCESSED)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// One 8-byte protected-mode segment descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct SegmentDesc(u64);

impl SegmentDesc {
    pub const NULL: Self = Self(0);

    /// Encode a protected-mode descriptor.
    ///
    /// `limit` is 20 bits; `granularity` multiplies it by 4 KiB blocks
    /// instead of bytes; `op32` selects a 32-bit default operand size.
    pub const fn protected(
        base: u32,
        limit: u32,
        access: SegmentAccess,
        granularity: bool,
        op32: bool,
    ) -> Self {
        assert!(limit <= 0xF_FFFF, "segment limit is a 20-bit field");

        let mut raw: u64 = 0;

        // limit bits 0-15
        raw |= (limit & 0xFFFF) as u64;
        // base bits 0-15
        raw |= ((base & 0xFFFF) as u64) << 16;
        // base bits 16-23
        raw |= (((base >> 16) & 0xFF) as u64) << 32;
        // access bits
        raw |= (access.bits() as u64) << 40;
        // limit bits 16-19
        raw |= (((limit >> 16) & 0xF) as u64) << 48;
        // size then granularity flags
        raw |= (op32 as u64) << 54;
        raw |= (granularity as u64) << 55;
        // base bits 24-31
        raw |= (((base >> 24) & 0xFF) as u64) << 56;

        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[repr(C)]
pub struct GlobalDescriptorTable<const TABLE_SIZE: usize>([u64; TABLE_SIZE]);

impl<const TABLE_SIZE: usize> GlobalDescriptorTable<TABLE_SIZE> {
    /// An all-null table. Entry 0 is the mandatory null descriptor and can
    /// never be stored to.
    pub const fn new() -> Self {
        Self([0; TABLE_SIZE])
    }

    /// Place `entry` at `loc`, consuming and returning the table so whole
    /// tables can be chained together in a `static` initializer.
    pub const fn with(mut self, loc: usize, entry: SegmentDesc) -> Self {
        assert!(
            loc > 0,
            "Cannot set zero entry! Bottom entry must be always zero!"
        );
        assert!(loc < TABLE_SIZE, "Entry does not fit in this table!");

        self.0[loc] = entry.raw();
        self
    }

    pub fn store(&mut self, loc: usize, entry: SegmentDesc) {
        assert!(
            loc > 0,
            "Cannot set zero entry! Bottom entry must be always zero!"
        );
        self.0[loc] = entry.raw();
    }

    /// Byte offset of entry `loc` from the start of the table. Computed at
    /// build time; run-time code selects a segment with this offset and
    /// never recomputes it.
    pub const fn offset_of(loc: usize) -> u16 {
        (loc * size_of::<u64>()) as u16
    }

    pub fn pack(&'static self) -> GdtPointer {
        GdtPointer {
            limit: (TABLE_SIZE * size_of::<u64>() - 1) as u16,
            base: self.0.as_ptr(),
        }
    }

    /// The exact bytes the CPU will walk, for byte-for-byte verification.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            core::slice::from_raw_parts(self.0.as_ptr() as *const u8, TABLE_SIZE * size_of::<u64>())
        }
    }
}

/// The table-register record: `{size = table length - 1, base}`, loaded with
/// `lgdt` to activate a table.
#[repr(C, packed(2))]
pub struct GdtPointer {
    limit: u16,
    base: *const u64,
}

impl GdtPointer {
    pub unsafe fn load(self) {
        asm!("lgdt [{}]", in(reg) &self);
    }

    pub fn limit(&self) -> u16 {
        self.limit
    }

    pub fn base(&self) -> *const u64 {
        self.base
    }
}
