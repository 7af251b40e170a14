//! Fuzz target: limit status-word decoding and gauge derivation
//!
//! Decodes arbitrary status words and derives the cylinder gauge in
//! both wiring orientations.
//!
//! Invariants checked:
//! - No panics for any 16-bit word
//! - Only bits 0 and 1 influence the decode
//! - The derived gauge level is always one of the three defined levels
//!
//! cargo fuzz run fuzz_limit_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use rovctl::poll::calls::LimitState;
use rovctl::status::{CYLINDER_EMPTY, CYLINDER_FULL, cylinder_gauge};

fuzz_target!(|data: &[u8]| {
    for chunk in data.chunks_exact(2) {
        let word = u16::from_le_bytes(chunk.try_into().unwrap());
        let state = LimitState::from_status_word(word);
        assert_eq!(state, LimitState::from_status_word(word & 0b11));

        for invert in [false, true] {
            let gauge = cylinder_gauge(Some(state), invert);
            assert!(gauge.active);
            assert!((CYLINDER_EMPTY..=CYLINDER_FULL).contains(&gauge.level));
        }
    }
});
