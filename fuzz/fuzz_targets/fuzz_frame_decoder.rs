//! Fuzz target: `RawFrame::try_from` + `frame::decode`
//!
//! Drives arbitrary byte sequences at the frame boundary and asserts that
//! only exact-length buffers become frames, and that decoding never panics
//! and always yields a full, finite pixel array.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermopile_bridge::sensors::frame::{self, FRAME_LEN, PIXEL_COUNT, RawFrame};

fuzz_target!(|data: &[u8]| {
    match RawFrame::try_from(data) {
        Ok(raw) => {
            assert_eq!(data.len(), FRAME_LEN);
            let t = frame::decode(&raw);
            assert_eq!(t.pixels.len(), PIXEL_COUNT);
            assert!(t.reference_c.is_finite());
            assert!(t.pixels.iter().all(|p| p.is_finite()));
            assert_eq!(t, frame::decode(&raw), "decode must be deterministic");
        }
        Err(len) => assert_ne!(len, FRAME_LEN),
    }
});
