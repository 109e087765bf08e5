#![no_main]

use libfuzzer_sys::fuzz_target;

use fanbench_core::integrate::{damped_sine, trapezoid};

fuzz_target!(|data: &[u8]| {
    if data.len() < 18 {
        return;
    }
    let a = f64::from_le_bytes(data[0..8].try_into().unwrap());
    let b = f64::from_le_bytes(data[8..16].try_into().unwrap());
    // Keep the sample count small for speed
    let samples = u64::from(u16::from_le_bytes([data[16], data[17]])) % 10_000;

    match trapezoid(damped_sine, a, b, samples) {
        Ok(_) => assert!(samples >= 2),
        Err(_) => assert!(samples < 2),
    }
});
