use super::*;

/// 0x100-byte image: data [0x00, 0x20) filled with 0x01, checksum pair
/// at 0x90.
fn fixture() -> MemoryImage {
    let mut bytes = vec![0u8; 0x100];
    bytes[..0x20].fill(0x01);
    MemoryImage::new(bytes, 0)
}

fn checksum_over(ranges: &[(u32, u32)]) -> MultiRangeChecksum {
    let mut checksum = MultiRangeChecksum::new(0x90);
    for (start, len) in ranges {
        checksum.add_range(AddressRange::new(*start, *len));
    }
    checksum
}

#[test]
fn update_sums_bytes() {
    let image = fixture();
    let sink = StatusSink::disabled();

    let mut checksum = checksum_over(&[(0x00, 0x10)]);
    assert!(checksum.update(&image, false, &sink));
    assert_eq!(checksum.checksum(), 0x10);
    assert_eq!(checksum.inverse_checksum(), !0x10u32);
}

#[test]
fn ranges_accumulate() {
    let image = fixture();
    let sink = StatusSink::disabled();

    let mut checksum = checksum_over(&[(0x00, 0x10), (0x10, 0x10)]);
    assert!(checksum.update(&image, false, &sink));
    assert_eq!(checksum.checksum(), 0x20);
}

#[test]
fn update_commit_load_round_trip() {
    let mut image = fixture();
    let sink = StatusSink::disabled();

    let mut checksum = checksum_over(&[(0x00, 0x20)]);
    assert!(checksum.update(&image, false, &sink));
    assert!(checksum.commit(&mut image));

    let mut reloaded = checksum_over(&[(0x00, 0x20)]);
    assert!(reloaded.load(&image));
    assert!(reloaded.is_correct(&image, false, &sink));
}

#[test]
fn tampered_data_fails_verification() {
    let mut image = fixture();
    let sink = StatusSink::disabled();

    let mut checksum = checksum_over(&[(0x00, 0x20)]);
    assert!(checksum.update(&image, false, &sink));
    assert!(checksum.commit(&mut image));

    let mut bytes = image.into_bytes();
    bytes[0x07] ^= 0xFF;
    let image = MemoryImage::new(bytes, 0);

    let mut reloaded = checksum_over(&[(0x00, 0x20)]);
    assert!(reloaded.load(&image));
    assert!(!reloaded.is_correct(&image, false, &sink));
}

#[test]
fn corrupt_complement_fails_verification() {
    let mut image = fixture();
    let sink = StatusSink::disabled();

    let mut checksum = checksum_over(&[(0x00, 0x20)]);
    assert!(checksum.update(&image, false, &sink));
    assert!(checksum.commit(&mut image));

    // Checksum word intact, complement word wrong
    image.write_int(0xDEAD_BEEF, DataType::UInt32, 0x94);

    let mut reloaded = checksum_over(&[(0x00, 0x20)]);
    assert!(reloaded.load(&image));
    assert!(!reloaded.is_correct(&image, false, &sink));
}

#[test]
fn out_of_bounds_range_fails_update() {
    let image = fixture();
    let sink = StatusSink::disabled();

    let mut checksum = checksum_over(&[(0xF0, 0x20)]);
    assert!(!checksum.update(&image, false, &sink));
}

#[test]
fn checksum_location_near_address_space_end_fails_without_panicking() {
    let mut image = fixture();
    let mut checksum = MultiRangeChecksum::new(u32::MAX - 2);
    checksum.add_range(AddressRange::new(0x00, 0x10));
    assert!(!checksum.load(&image));
    assert!(!checksum.commit(&mut image));
}

#[test]
fn load_fails_on_empty_image() {
    let image = MemoryImage::new(Vec::new(), 0);
    let mut checksum = checksum_over(&[(0x00, 0x10)]);
    assert!(!checksum.load(&image));
}
