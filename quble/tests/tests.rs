use quble::chain::{self, ChainEntry};
use quble::info::{QubleInfo, DISK_ID_STAGING_ADDR, QUBLE_INFO_ADDR};
use quble::io::{BlockRead, SECTOR_SIZE};
use quble::loader::{load_next_stage, MAX_SECTORS_PER_READ};
use quble::LoadError;

/// An in-memory boot medium. Byte `i` of sector `n` holds a value derived
/// from `n` so tests can tell which sector landed where.
struct MemDisk {
    sectors: Vec<u8>,
    /// Every request issued, as `(lba, sector count)`.
    requests: Vec<(u64, usize)>,
    /// Fail any request that covers this absolute sector. Sectors before it
    /// in the same request are still transferred, like a real medium that
    /// dies partway through a run.
    bad_sector: Option<u64>,
}

impl MemDisk {
    fn new(total_sectors: usize) -> Self {
        let mut sectors = vec![0u8; total_sectors * SECTOR_SIZE];
        for (index, byte) in sectors.iter_mut().enumerate() {
            *byte = (index / SECTOR_SIZE) as u8 ^ (index as u8);
        }

        Self {
            sectors,
            requests: Vec::new(),
            bad_sector: None,
        }
    }

    fn sector(&self, lba: u64) -> &[u8] {
        let start = lba as usize * SECTOR_SIZE;
        &self.sectors[start..start + SECTOR_SIZE]
    }
}

impl BlockRead for MemDisk {
    fn read_blocks(&mut self, lba: u64, buf: &mut [u8]) -> quble::Result<()> {
        assert_eq!(buf.len() % SECTOR_SIZE, 0);
        let count = buf.len() / SECTOR_SIZE;
        self.requests.push((lba, count));

        for n in 0..count {
            if self.bad_sector == Some(lba + n as u64) {
                return Err(LoadError::Disk);
            }

            let src = self.sector(lba + n as u64);
            buf[n * SECTOR_SIZE..(n + 1) * SECTOR_SIZE].copy_from_slice(src);
        }

        Ok(())
    }
}

/// A chain table plus destination arenas the entries point into.
struct TestChain {
    entries: Vec<ChainEntry>,
    arenas: Vec<Box<[u8]>>,
}

impl TestChain {
    /// Build a chain of `(lba, size)` stages, each with its own arena.
    fn new(stages: &[(u64, u64)]) -> Self {
        let mut entries = Vec::new();
        let mut arenas = Vec::new();

        for &(lba, size) in stages {
            let padded = size.next_multiple_of(SECTOR_SIZE as u64) as usize;
            let mut arena = vec![0u8; padded].into_boxed_slice();
            let code = arena.as_mut_ptr() as u64;

            entries.push(ChainEntry {
                lba,
                size,
                code,
                payload: code + size,
            });
            arenas.push(arena);
        }
        entries.push(ChainEntry::END);

        Self { entries, arenas }
    }

    fn info(&self, disk_id: u16) -> QubleInfo {
        QubleInfo::new(self.entries.as_ptr() as u64, disk_id)
    }

    fn entry(&self, index: usize) -> ChainEntry {
        self.entries[index]
    }

    fn arena(&self, index: usize) -> &[u8] {
        &self.arenas[index]
    }
}

#[test]
fn loads_single_sector_stage() {
    let chain = TestChain::new(&[(4, 512)]);
    let mut disk = MemDisk::new(16);
    let mut info = chain.info(0x80);

    let next = load_next_stage(&mut disk, &mut info).unwrap();

    let entry = chain.entry(0);
    assert_eq!(next, entry.code + 512);
    assert_eq!(chain.arena(0), disk.sector(4));
    assert_eq!(info.variant.code, entry.code);
    assert_eq!(info.variant.payload, entry.payload);
    assert_eq!(
        info.bootchain,
        chain.entries.as_ptr() as u64 + size_of::<ChainEntry>() as u64
    );
}

#[test]
fn next_free_address_covers_partial_sector() {
    // a 100-byte image still occupies a whole sector in memory
    let chain = TestChain::new(&[(0, 100)]);
    let mut disk = MemDisk::new(4);
    let mut info = chain.info(0x80);

    let next = load_next_stage(&mut disk, &mut info).unwrap();

    assert_eq!(next, chain.entry(0).code + SECTOR_SIZE as u64);
    assert!(next >= chain.entry(0).code + chain.entry(0).size);
}

#[test]
fn large_image_is_split_into_capped_runs() {
    // 80 sectors: two full runs of MAX_SECTORS_PER_READ, one run of 16
    let sectors = 80u64;
    let chain = TestChain::new(&[(8, sectors * SECTOR_SIZE as u64)]);
    let mut disk = MemDisk::new(96);
    let mut info = chain.info(0x80);

    load_next_stage(&mut disk, &mut info).unwrap();

    assert_eq!(
        disk.requests,
        vec![
            (8, MAX_SECTORS_PER_READ),
            (8 + MAX_SECTORS_PER_READ as u64, MAX_SECTORS_PER_READ),
            (8 + 2 * MAX_SECTORS_PER_READ as u64, 16),
        ]
    );

    // every sector landed at its place in the image
    for n in 0..sectors {
        let offset = n as usize * SECTOR_SIZE;
        assert_eq!(
            &chain.arena(0)[offset..offset + SECTOR_SIZE],
            disk.sector(8 + n),
            "sector {n}"
        );
    }
}

#[test]
fn read_failure_commits_nothing() {
    // three sectors, the medium dies on the second
    let chain = TestChain::new(&[(2, 1536)]);
    let mut disk = MemDisk::new(8);
    disk.bad_sector = Some(3);
    let mut info = chain.info(0x80);

    let before_bootchain = info.bootchain;
    let before_variant = info.variant;

    assert_eq!(
        load_next_stage(&mut disk, &mut info),
        Err(LoadError::Disk)
    );

    assert_eq!(info.bootchain, before_bootchain);
    assert_eq!(info.variant, before_variant);
    // the sector the medium managed before failing may have landed; that is
    // the native service's business, not a commit
    assert_eq!(chain.arena(0)[..SECTOR_SIZE], *disk.sector(2));
}

#[test]
fn chain_is_walked_in_order_and_exhausts() {
    let chain = TestChain::new(&[(0, 512), (1, 1024), (3, 512)]);
    let mut disk = MemDisk::new(8);
    let mut info = chain.info(0x80);

    let mut loaded = 0;
    while let Some(entry) = unsafe { chain::current_entry(&info) } {
        assert_eq!(entry, chain.entry(loaded));

        let next = load_next_stage(&mut disk, &mut info).unwrap();
        assert_eq!(info.variant.code, entry.code);
        assert!(next >= entry.code + entry.size);

        loaded += 1;
    }

    assert_eq!(loaded, 3);
    assert!(unsafe { chain::current_entry(&info) }.is_none());

    // requests went out strictly in chain order
    assert_eq!(disk.requests, vec![(0, 1), (1, 2), (3, 1)]);
}

#[test]
#[should_panic(expected = "end of the boot chain")]
fn loading_past_the_terminator_panics() {
    let chain = TestChain::new(&[]);
    let mut disk = MemDisk::new(1);
    let mut info = chain.info(0x80);

    let _ = load_next_stage(&mut disk, &mut info);
}

#[test]
fn info_record_install_and_adopt() {
    let mut slot = core::mem::MaybeUninit::<QubleInfo>::zeroed();
    let addr = slot.as_mut_ptr() as usize;

    let adopted = unsafe { QubleInfo::install(addr, QubleInfo::new(0x9000, 0x80)) };
    assert_eq!(adopted.bootchain, 0x9000);
    assert_eq!(adopted.disk_id, 0x80);
    assert!(adopted.check_magic());

    let again = unsafe { QubleInfo::from_ptr(addr) };
    assert_eq!(again.bootchain, 0x9000);
    assert_eq!(again.disk_id, 0x80);
}

#[test]
#[should_panic(expected = "magic")]
fn adopting_garbage_panics() {
    let mut slot = core::mem::MaybeUninit::<QubleInfo>::zeroed();
    let addr = slot.as_mut_ptr() as usize;

    let _ = unsafe { QubleInfo::from_ptr(addr) };
}

#[test]
fn fixed_address_contract() {
    // the out-of-band agreed addresses every boot-chain party hardcodes
    assert_eq!(QUBLE_INFO_ADDR, 0x0500);
    assert_eq!(DISK_ID_STAGING_ADDR, 0x7DFD);
}
