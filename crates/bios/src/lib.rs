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

//! Wrappers over the BIOS services the boot chain leans on: INT 13h disk
//! reads and INT 10h video output. The interrupts themselves only exist on a
//! 16-bit-addressable x86 target; on every other target the entry points
//! compile to panicking stubs so the pure parts of this crate still build
//! and test on the host.

#![no_std]

pub const INVALID_BIOS_CALL_AX: u16 = 0x80;
pub const NOT_SUPPORTED_CALL_AX: u16 = 0x86;

/// Result of one BIOS service call.
///
/// The services signal failure through the carry flag plus an `ah` status
/// code; this folds both into one value captured at the `int` site.
#[must_use = "BiosStatus must be used"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiosStatus {
    Success,
    InvalidInput,
    NotSupported,
    Failed,
}

impl BiosStatus {
    pub fn from_ax_carry(ax: u16, carry: bool) -> Self {
        match ax {
            INVALID_BIOS_CALL_AX => Self::InvalidInput,
            NOT_SUPPORTED_CALL_AX => Self::NotSupported,
            _ if carry => Self::Failed,
            _ => Self::Success,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn unwrap(self) {
        match self {
            Self::Success => (),
            _ => panic!("Failed to unwrap BiosStatus: {:?}", self),
        }
    }
}

#[cfg(not(target_pointer_width = "32"))]
fn unsupported() -> ! {
    panic!("BIOS services need a 16-bit real-mode x86 target");
}

pub mod video {
    const TEXT_MODE_80X25: u8 = 0x03;

    /// Print one byte at the cursor through the BIOS teletype service.
    #[inline]
    pub fn putc(c: u8) {
        #[cfg(target_pointer_width = "32")]
        unsafe {
            core::arch::asm!("
                mov ah, 0x0e
                int 0x10
            ",
                in("al") c
            );
        }

        #[cfg(not(target_pointer_width = "32"))]
        {
            let _ = c;
            super::unsupported();
        }
    }

    #[inline]
    pub fn print_char(c: char) {
        putc(if c.is_ascii() { c as u8 } else { b'?' });
    }

    /// Put the adapter into 80x25 text mode with a cleared screen. The one
    /// piece of video state later stages assume.
    pub fn set_text_mode() {
        #[cfg(target_pointer_width = "32")]
        unsafe {
            core::arch::asm!("
                mov ah, 0x00
                int 0x10
            ",
                in("al") TEXT_MODE_80X25
            );
        }

        #[cfg(not(target_pointer_width = "32"))]
        super::unsupported();
    }
}

pub mod disk {
    use crate::BiosStatus;

    const DISK_DAP_READ: u16 = 0x4200;

    /// The INT 13h extensions "disk access packet": the request record the
    /// BIOS reads the LBA transfer description from.
    #[repr(C)]
    pub struct DiskAccessPacket {
        packet_size: u8,
        always_zero: u8,
        sectors: u16,
        base_ptr: u16,
        base_segment: u16,
        lba: u64,
    }

    impl DiskAccessPacket {
        pub fn new(sectors: u16, lba: u64, ptr: u32) -> Self {
            let base_segment = (ptr >> 4) as u16;
            let base_ptr = ptr as u16 & 0xF;

            Self {
                packet_size: 0x10,
                always_zero: 0,
                sectors,
                base_ptr,
                base_segment,
                lba,
            }
        }
    }

    /// Read `count` whole sectors starting at `lba` into `ptr`.
    ///
    /// One request, one BIOS transfer; the service caps how many sectors it
    /// moves per call, so callers split large reads into runs. On failure the
    /// BIOS may already have placed some of the sectors in memory.
    ///
    /// # Safety
    /// `ptr` must be writable for `count * 512` bytes and addressable in real
    /// mode (below 1 MiB).
    pub unsafe fn raw_read(disk_id: u16, lba: u64, count: usize, ptr: *mut u8) -> BiosStatus {
        let packet = DiskAccessPacket::new(count as u16, lba, ptr as u32);
        let packet_address = core::ptr::addr_of!(packet) as u32;

        // The packet is handed to the BIOS as ds:si, so it must live in the
        // first 64 KiB along with the rest of this stage.
        if packet_address & 0xFFFF != packet_address {
            return BiosStatus::InvalidInput;
        }

        #[cfg(target_pointer_width = "32")]
        {
            let ax_out: u16;
            let carry: u16;

            core::arch::asm!(
                "push si",
                "mov si, {packet:x}",
                "int 0x13",
                "jc 2f",
                "mov {carry:x}, 0",
                "jmp 3f",
                "2:",
                "mov {carry:x}, 1",
                "3:",
                "pop si",
                inout("ax") DISK_DAP_READ => ax_out,
                in("dx") disk_id,
                packet = in(reg) packet_address as u16,
                carry = out(reg) carry,
            );

            BiosStatus::from_ax_carry(ax_out, carry != 0)
        }

        #[cfg(not(target_pointer_width = "32"))]
        {
            let _ = (disk_id, lba, count);
            super::unsupported();
        }
    }
}
