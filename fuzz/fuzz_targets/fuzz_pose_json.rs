//! Fuzzes pose sample deserialization from JSON input lines.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_pose_json
#![no_main]
use libfuzzer_sys::fuzz_target;
use posewire_protocol::{FRAME_LEN, PoseSample, encode_sample};

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes.
    if let Ok(sample) = serde_json::from_slice::<PoseSample>(data) {
        assert_eq!(encode_sample(&sample).frame().len(), FRAME_LEN);
    }
});
