#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;

use odometer_core::{Alignment, OdometerOptions, OdometerValue, Value};

fuzz_target!(|data: &[u8]| {
    let Some((&mode, rest)) = data.split_first() else {
        return;
    };
    let alignment = if mode & 1 == 0 {
        Alignment::Right
    } else {
        Alignment::Left
    };
    let mut odometer = OdometerValue::new(OdometerOptions {
        alignment,
        ..OdometerOptions::default()
    });

    // 8 bytes per value; the low byte of each chunk also picks a partial tick
    for chunk in rest.chunks_exact(8) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        let value = if mode & 2 == 0 {
            Value::Integer(i128::from(i64::from_le_bytes(bytes)))
        } else {
            Value::Float(f64::from_le_bytes(bytes))
        };
        odometer.set_value(value);
        odometer.tick(Duration::from_millis(u64::from(chunk[0])));
    }

    odometer.settle();
    assert!(odometer.is_settled());
    assert_eq!(odometer.displayed_text(), odometer.value().to_string());
});
