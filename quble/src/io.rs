use crate::error::Result;

/// Bytes per medium sector.
pub const SECTOR_SIZE: usize = 512;

/// A boot medium that can be read in whole sectors.
///
/// One call is one request against the native read service. The service is
/// synchronous: a call blocks until the sectors are in memory or the medium
/// reports failure. On failure the device may already have placed some of
/// the requested sectors in `buf`.
pub trait BlockRead {
    /// Read `buf.len() / SECTOR_SIZE` sectors starting at `lba` into `buf`.
    /// `buf.len()` must be a multiple of [`SECTOR_SIZE`].
    fn read_blocks(&mut self, lba: u64, buf: &mut [u8]) -> Result<()>;
}
