//! Fuzz target: joystick normalization pipeline
//!
//! Feeds arbitrary `(x, y, lock)` sequences through a `Joystick` and
//! checks the normalization invariants hold for every input, including
//! NaN and infinity.
//!
//! Invariants checked:
//! - No panics under any input sequence
//! - The reported magnitude never exceeds 1 (NaN inputs aside)
//! - A locked axis always reads exactly 0
//!
//! cargo fuzz run fuzz_joystick_normalize

#![no_main]

use libfuzzer_sys::fuzz_target;
use rovctl::input::joystick::{AxisLock, Joystick};

fuzz_target!(|data: &[u8]| {
    let mut joystick = Joystick::new();

    // Each 9-byte chunk is one input step: x, y, lock flags.
    for chunk in data.chunks_exact(9) {
        let x = f32::from_le_bytes(chunk[0..4].try_into().unwrap());
        let y = f32::from_le_bytes(chunk[4..8].try_into().unwrap());
        let lock = AxisLock {
            x: chunk[8] & 0b01 != 0,
            y: chunk[8] & 0b10 != 0,
        };

        joystick.set_lock(lock);
        joystick.set_position(x, y);

        let p = joystick.position();
        if x.is_finite() && y.is_finite() {
            assert!(p.magnitude() <= 1.0 + 1e-6);
        }
        if lock.x {
            assert_eq!(p.x, 0.0);
        }
        if lock.y {
            assert_eq!(p.y, 0.0);
        }
    }
});
