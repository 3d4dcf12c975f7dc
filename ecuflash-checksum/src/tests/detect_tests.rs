use std::sync::atomic::{AtomicU32, Ordering};

use super::*;
use crate::range::AddressRange;

/// Canned detector: each category is switched on or off up front.
#[derive(Default)]
struct CannedDetector {
    combined: bool,
    rolling: bool,
    multi_range: bool,
    standalone_multi_range: bool,
    main: bool,
    multipoint: bool,
    multipoint_calls: AtomicU32,
    standalone_calls: AtomicU32,
}

fn rolling_fixture() -> RollingChecksums {
    let mut rolling = RollingChecksums::new(0x4000);
    rolling.add_group(vec![AddressRange::new(0x500, 16)], 0x510);
    rolling
}

impl ChecksumDetection for CannedDetector {
    fn detect_rolling_and_multi_range(
        &self,
        _buffer: &[u8],
    ) -> Option<(Option<RollingChecksums>, Option<MultiRangeChecksum>)> {
        if !self.combined {
            return None;
        }
        let rolling = self.rolling.then(rolling_fixture);
        let multi_range = self.multi_range.then(|| MultiRangeChecksum::new(0x90));
        Some((rolling, multi_range))
    }

    fn detect_multi_range(&self, _buffer: &[u8]) -> Option<MultiRangeChecksum> {
        self.standalone_calls.fetch_add(1, Ordering::Relaxed);
        self.standalone_multi_range
            .then(|| MultiRangeChecksum::new(0xA0))
    }

    fn detect_main(&self, _buffer: &[u8]) -> Option<MainChecksum> {
        self.main.then(|| MainChecksum::new(0x80, 0x90, 2))
    }

    fn detect_multipoint(&self, _buffer: &[u8]) -> Option<(u32, Vec<MultipointChecksum>)> {
        self.multipoint_calls.fetch_add(1, Ordering::Relaxed);
        self.multipoint
            .then(|| (0x80_0000, vec![MultipointChecksum::new(0x820)]))
    }
}

#[test]
fn full_detection_orders_the_set() {
    let detector = CannedDetector {
        combined: true,
        rolling: true,
        multi_range: true,
        main: true,
        multipoint: true,
        ..Default::default()
    };

    let detected = detect_checksums(&detector, &[0u8; 16]).unwrap();
    assert_eq!(detected.base_address, 0x80_0000);
    assert_eq!(detected.num_checksums(), 4);
    assert!(matches!(detected.checksums[0], ChecksumVariant::MultiRange(_)));
    assert!(matches!(detected.checksums[1], ChecksumVariant::Rolling(_)));
    assert!(matches!(detected.checksums[2], ChecksumVariant::Main(_)));
    assert!(matches!(detected.checksums[3], ChecksumVariant::Multipoint(_)));
}

#[test]
fn rolling_alone_satisfies_the_first_category() {
    let detector = CannedDetector {
        combined: true,
        rolling: true,
        main: true,
        multipoint: true,
        ..Default::default()
    };

    let detected = detect_checksums(&detector, &[0u8; 16]).unwrap();
    assert_eq!(detected.num_checksums(), 3);
    assert!(matches!(detected.checksums[0], ChecksumVariant::Rolling(_)));
}

#[test]
fn combined_miss_falls_back_to_standalone_multi_range() {
    let detector = CannedDetector {
        standalone_multi_range: true,
        main: true,
        multipoint: true,
        ..Default::default()
    };

    let detected = detect_checksums(&detector, &[0u8; 16]).unwrap();
    assert_eq!(detector.standalone_calls.load(Ordering::Relaxed), 1);
    assert!(matches!(detected.checksums[0], ChecksumVariant::MultiRange(_)));
}

#[test]
fn combined_hit_skips_the_fallback() {
    let detector = CannedDetector {
        combined: true,
        multi_range: true,
        main: true,
        multipoint: true,
        ..Default::default()
    };

    detect_checksums(&detector, &[0u8; 16]).unwrap();
    assert_eq!(detector.standalone_calls.load(Ordering::Relaxed), 0);
}

#[test]
fn missing_main_discards_everything() {
    let detector = CannedDetector {
        combined: true,
        rolling: true,
        multi_range: true,
        multipoint: true,
        ..Default::default()
    };

    assert!(detect_checksums(&detector, &[0u8; 16]).is_none());
    // Remaining detectors still ran
    assert_eq!(detector.multipoint_calls.load(Ordering::Relaxed), 1);
}

#[test]
fn empty_first_category_discards_everything() {
    let detector = CannedDetector {
        combined: true,
        main: true,
        multipoint: true,
        ..Default::default()
    };

    assert!(detect_checksums(&detector, &[0u8; 16]).is_none());
}

#[test]
fn missing_multipoint_discards_everything() {
    let detector = CannedDetector {
        combined: true,
        rolling: true,
        multi_range: true,
        main: true,
        ..Default::default()
    };

    assert!(detect_checksums(&detector, &[0u8; 16]).is_none());
}

#[test]
fn empty_buffer_never_detects() {
    let detector = CannedDetector {
        combined: true,
        rolling: true,
        multi_range: true,
        main: true,
        multipoint: true,
        ..Default::default()
    };

    assert!(detect_checksums(&detector, &[]).is_none());
    assert_eq!(detector.multipoint_calls.load(Ordering::Relaxed), 0);
}
