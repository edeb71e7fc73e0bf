use quble::io::{BlockRead, SECTOR_SIZE};
use quble::LoadError;

/// The boot medium behind the BIOS INT 13h extensions.
pub struct BiosDisk {
    id: u16,
}

impl BiosDisk {
    pub fn new(disk_id: u16) -> Self {
        Self { id: disk_id }
    }
}

impl BlockRead for BiosDisk {
    fn read_blocks(&mut self, lba: u64, buf: &mut [u8]) -> quble::Result<()> {
        let count = buf.len() / SECTOR_SIZE;

        if unsafe { bios::disk::raw_read(self.id, lba, count, buf.as_mut_ptr()) }.is_success() {
            Ok(())
        } else {
            Err(LoadError::Disk)
        }
    }
}
