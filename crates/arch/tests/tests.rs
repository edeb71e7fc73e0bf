use arch::gdt::{GlobalDescriptorTable, SegmentAccess, SegmentDesc};
use arch::registers::Segment;
use arch::CpuPrivilege;

const FLAT_CODE: SegmentAccess = SegmentAccess::new().present().code().readable();
const FLAT_DATA: SegmentAccess = SegmentAccess::new().present().data().writable();

static FLAT_TABLE: GlobalDescriptorTable<3> = GlobalDescriptorTable::new()
    .with(1, SegmentDesc::protected(0, 0xF_FFFF, FLAT_CODE, true, true))
    .with(2, SegmentDesc::protected(0, 0xF_FFFF, FLAT_DATA, true, true));

static ONE_ENTRY_TABLE: GlobalDescriptorTable<2> =
    GlobalDescriptorTable::new().with(1, SegmentDesc::protected(0, 0xF_FFFF, FLAT_CODE, true, true));

#[test]
fn access_byte_canonical_values() {
    assert_eq!(FLAT_CODE.bits(), 0x9A);
    assert_eq!(FLAT_DATA.bits(), 0x92);
    assert_eq!(
        FLAT_DATA.privilege(CpuPrivilege::Ring3).bits(),
        0x92 | (3 << 5)
    );
    assert_eq!(SegmentAccess::new().bits(), 0);
}

#[test]
fn flat_descriptor_bit_layout() {
    // 4 GiB flat code segment, the classic encoding
    let desc = SegmentDesc::protected(0, 0xF_FFFF, FLAT_CODE, true, true);
    assert_eq!(desc.raw(), 0x00CF_9A00_0000_FFFF);

    let desc = SegmentDesc::protected(0, 0xF_FFFF, FLAT_DATA, true, true);
    assert_eq!(desc.raw(), 0x00CF_9200_0000_FFFF);
}

#[test]
fn descriptor_field_scatter() {
    // base and limit land in their split fields
    let desc = SegmentDesc::protected(0xB800_0000, 0x1_2345, FLAT_DATA, false, true);
    let raw = desc.raw();

    assert_eq!(raw & 0xFFFF, 0x2345, "limit bits 0-15");
    assert_eq!((raw >> 16) & 0xFFFF, 0x0000, "base bits 0-15");
    assert_eq!((raw >> 32) & 0xFF, 0x00, "base bits 16-23");
    assert_eq!((raw >> 40) & 0xFF, 0x92, "access byte");
    assert_eq!((raw >> 48) & 0xF, 0x1, "limit bits 16-19");
    assert_eq!((raw >> 52) & 0xF, 0x4, "flags: size set, granularity clear");
    assert_eq!((raw >> 56) & 0xFF, 0xB8, "base bits 24-31");
}

#[test]
fn null_descriptor_is_always_entry_zero() {
    assert_eq!(&FLAT_TABLE.as_bytes()[..8], &[0u8; 8][..]);
    assert_eq!(&ONE_ENTRY_TABLE.as_bytes()[..8], &[0u8; 8][..]);
    assert_eq!(&GlobalDescriptorTable::<4>::new().as_bytes()[..8], &[0u8; 8][..]);
}

#[test]
fn one_entry_table_layout() {
    // null + 1 entry: 16 bytes of table, pointer size field of 15
    let bytes = ONE_ENTRY_TABLE.as_bytes();
    assert_eq!(bytes.len(), 16);
    assert_eq!(
        &bytes[8..],
        &[0xFF, 0xFF, 0x00, 0x00, 0x00, 0x9A, 0xCF, 0x00][..]
    );

    let pointer = ONE_ENTRY_TABLE.pack();
    assert_eq!(pointer.limit(), 15);
    assert_eq!(pointer.base(), ONE_ENTRY_TABLE.as_bytes().as_ptr() as *const u64);
}

#[test]
fn builder_is_deterministic() {
    let again = GlobalDescriptorTable::<3>::new()
        .with(1, SegmentDesc::protected(0, 0xF_FFFF, FLAT_CODE, true, true))
        .with(2, SegmentDesc::protected(0, 0xF_FFFF, FLAT_DATA, true, true));

    assert_eq!(again.as_bytes(), FLAT_TABLE.as_bytes());
}

#[test]
fn store_matches_const_builder() {
    let mut table = GlobalDescriptorTable::<3>::new();
    table.store(1, SegmentDesc::protected(0, 0xF_FFFF, FLAT_CODE, true, true));
    table.store(2, SegmentDesc::protected(0, 0xF_FFFF, FLAT_DATA, true, true));

    assert_eq!(table.as_bytes(), FLAT_TABLE.as_bytes());
}

#[test]
#[should_panic]
fn storing_entry_zero_panics() {
    let mut table = GlobalDescriptorTable::<3>::new();
    table.store(0, SegmentDesc::NULL);
}

#[test]
fn entry_offsets_and_selectors() {
    assert_eq!(GlobalDescriptorTable::<3>::offset_of(1), 8);
    assert_eq!(GlobalDescriptorTable::<3>::offset_of(2), 16);

    // selectors are entry offsets with the privilege in the low bits
    assert_eq!(Segment::new(1, CpuPrivilege::Ring0).0, 0x08);
    assert_eq!(Segment::new(2, CpuPrivilege::Ring0).0, 0x10);
    assert_eq!(Segment::new(2, CpuPrivilege::Ring3).0, 0x13);
}
