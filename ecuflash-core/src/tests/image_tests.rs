use super::*;

#[test]
fn little_endian_u16_layout() {
    let mut image = MemoryImage::zeroed(4, 0);
    assert!(image.write_int(0x1234, DataType::UInt16, 0));
    assert_eq!(image.bytes()[0], 0x34);
    assert_eq!(image.bytes()[1], 0x12);
}

#[test]
fn little_endian_u32_layout() {
    let mut image = MemoryImage::zeroed(8, 0);
    assert!(image.write_int(0xDEADBEEF, DataType::UInt32, 0));
    assert_eq!(image.bytes()[0], 0xEF);
    assert_eq!(image.bytes()[1], 0xBE);
    assert_eq!(image.bytes()[2], 0xAD);
    assert_eq!(image.bytes()[3], 0xDE);
}

#[test]
fn write_read_round_trip() {
    let cases = [
        (DataType::UInt8, 0xABu32),
        (DataType::UInt8, 0),
        (DataType::UInt16, 0x1234),
        (DataType::UInt32, 0xDEADBEEF),
    ];
    for (ty, value) in cases {
        let mut image = MemoryImage::zeroed(8, 0);
        assert!(image.write_int(value, ty, 0), "write {ty} {value:#X}");
        assert_eq!(image.read_int(ty, 0), Some(value), "read {ty} {value:#X}");
    }
}

#[test]
fn signed_reads_sign_extend() {
    let mut image = MemoryImage::new(vec![0xFF, 0xFF, 0xFF, 0xFF], 0);
    assert_eq!(image.read_int(DataType::Int8, 0), Some(0xFFFF_FFFF));
    assert_eq!(image.read_int(DataType::Int16, 0), Some(0xFFFF_FFFF));
    assert_eq!(image.read_int(DataType::UInt8, 0), Some(0xFF));
    assert_eq!(image.read_int(DataType::UInt16, 0), Some(0xFFFF));

    image = MemoryImage::new(vec![0x80, 0x00], 0);
    assert_eq!(image.read_int(DataType::Int8, 0), Some(0xFFFF_FF80));
}

#[test]
fn addresses_are_absolute() {
    let mut image = MemoryImage::zeroed(0x10, 0x80_0000);
    assert!(image.write_int(0x42, DataType::UInt8, 0x80_0008));
    assert_eq!(image.read_int(DataType::UInt8, 0x80_0008), Some(0x42));
    assert_eq!(image.bytes()[8], 0x42);

    // Below the base address
    assert_eq!(image.read_int(DataType::UInt8, 0x7F_FFFF), None);
    assert!(!image.write_int(0, DataType::UInt8, 0x7F_FFFF));
}

#[test]
fn out_of_bounds_accesses_fail() {
    let mut image = MemoryImage::zeroed(4, 0);

    assert_eq!(image.read_int(DataType::UInt8, 4), None);
    assert_eq!(image.read_int(DataType::UInt32, 1), None); // straddles the end
    assert_eq!(image.read_int(DataType::UInt16, 3), None);
    assert!(!image.write_int(0, DataType::UInt32, 1));
    assert!(!image.write_int(0, DataType::UInt8, u32::MAX));
}

#[test]
fn zero_size_image_fails_everything() {
    let mut image = MemoryImage::new(Vec::new(), 0);
    assert_eq!(image.size(), 0);
    assert_eq!(image.read_int(DataType::UInt8, 0), None);
    assert!(!image.write_int(0, DataType::UInt8, 0));
}

#[test]
fn end_address_derivation() {
    let image = MemoryImage::zeroed(0x100, 0x800000);
    assert_eq!(image.start_address(), 0x800000);
    assert_eq!(image.end_address(), 0x800100);
}

#[test]
fn narrow_writes_saturate() {
    let mut image = MemoryImage::zeroed(8, 0);
    assert!(image.write_int(0x1FF, DataType::UInt8, 0));
    assert_eq!(image.read_int(DataType::UInt8, 0), Some(0xFF));
    assert!(image.write_int(0x1_0000, DataType::UInt16, 2));
    assert_eq!(image.read_int(DataType::UInt16, 2), Some(0xFFFF));
}

#[test]
fn into_bytes_recovers_buffer() {
    let mut image = MemoryImage::new(vec![0; 4], 0);
    image.write_int(0xAA, DataType::UInt8, 3);
    let bytes = image.into_bytes();
    assert_eq!(bytes, vec![0, 0, 0, 0xAA]);
}
