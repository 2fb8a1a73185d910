//! Fuzzes the pose frame encoder with arbitrary f32 bit patterns.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_pose_frame
#![no_main]
use libfuzzer_sys::fuzz_target;
use posewire_protocol::{
    FRAME_BYTE_LEN, FRAME_LEN, FrameEncoder, FrameLayout, POSE_FIELD_COUNT, PoseSample,
    encode_sample,
};

fuzz_target!(|data: &[u8]| {
    let mut values = [0.0f32; POSE_FIELD_COUNT];
    for (slot, chunk) in values.iter_mut().zip(data.chunks_exact(4)) {
        if let Ok(bytes) = <[u8; 4]>::try_from(chunk) {
            *slot = f32::from_le_bytes(bytes);
        }
    }
    let sample = PoseSample::from_array(values);

    // Lenient encoding accepts NaN and infinities and must keep the frame shape.
    let encoded = encode_sample(&sample);
    assert_eq!(encoded.frame().len(), FRAME_LEN);
    assert_eq!(encoded.bytes().len(), FRAME_BYTE_LEN);

    let append = FrameEncoder::new()
        .with_layout(FrameLayout::Append)
        .encode(&sample);
    assert_eq!(append.as_ref(), Ok(&encoded));

    // Strict encoding either rejects or agrees with the lenient frame.
    if let Ok(strict) = FrameEncoder::new().with_strict(true).encode(&sample) {
        assert_eq!(strict, encoded);
    }
});
