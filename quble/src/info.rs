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

//! The stage-to-stage info record.
//!
//! Stages in the boot chain share no stack and no calling convention, only
//! the same physical memory. This record is the whole contract between them:
//! where the chain cursor stands, where the last image landed, and which
//! BIOS drive everything came from. The record lives at one fixed,
//! out-of-band agreed address; [`QubleInfo::from_ptr`] is the only place
//! that address turns into a reference, everything else receives the record
//! as an explicit argument.

/// Physical address of the [`QubleInfo`] record. The bootstrap sector
/// writes the record here; every later stage adopts it from here.
pub const QUBLE_INFO_ADDR: usize = 0x0500;

/// The one-byte slot where the bootstrap sector parks the BIOS drive number
/// (its `dl` argument) before any stack exists. Sits in the otherwise dead
/// bytes at the tail of the boot sector.
pub const DISK_ID_STAGING_ADDR: usize = 0x7DFD;

/// Destination addresses of the most recently loaded stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct StageVariant {
    /// Where the stage's executable image was placed.
    pub code: u64,
    /// Where the stage's data payload resides, 0 if it has none.
    pub payload: u64,
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct QubleInfo {
    /// Address of the current boot-chain entry. Advanced by the loader,
    /// one entry per successful load.
    pub bootchain: u64,
    pub variant: StageVariant,
    /// BIOS drive number of the boot medium, widened to the register the
    /// disk services take it in.
    pub disk_id: u16,
    magic: u64,
}

impl QubleInfo {
    pub const MAGIC: u64 = 0x5155_424c_4530_3031;

    pub fn new(bootchain: u64, disk_id: u16) -> Self {
        Self {
            bootchain,
            variant: StageVariant::default(),
            disk_id,
            magic: Self::MAGIC,
        }
    }

    /// Adopt the record a previous stage left at `addr`.
    ///
    /// This is the single point where the fixed-address contract meets the
    /// type system; everything downstream works through the returned
    /// reference.
    ///
    /// # Safety
    /// `addr` must be the agreed record address and nothing else may alias
    /// the record for the returned lifetime.
    pub unsafe fn from_ptr<'a>(addr: usize) -> &'a mut Self {
        let info = &mut *(addr as *mut Self);

        assert!(
            info.check_magic(),
            "QubleInfo magic FAILED, Got=0x{:x} Expected=0x{:x}",
            info.magic,
            Self::MAGIC
        );

        info
    }

    /// Write `info` to `addr` for the next stage to adopt.
    ///
    /// # Safety
    /// `addr` must be writable and agreed with every stage that will call
    /// [`QubleInfo::from_ptr`] on it.
    pub unsafe fn install<'a>(addr: usize, info: QubleInfo) -> &'a mut Self {
        let slot = addr as *mut Self;
        slot.write(info);

        &mut *slot
    }

    pub fn check_magic(&self) -> bool {
        self.magic == Self::MAGIC
    }

    /// The `dl` value staged at [`DISK_ID_STAGING_ADDR`] by the bootstrap
    /// sector, captured before it had a stack to save registers on.
    ///
    /// # Safety
    /// Only meaningful while the boot sector image is still mapped at its
    /// load address.
    pub unsafe fn staged_disk_id() -> u8 {
        core::ptr::read_volatile(DISK_ID_STAGING_ADDR as *const u8)
    }
}
