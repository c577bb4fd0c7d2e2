#![no_main]

use libfuzzer_sys::fuzz_target;

use odometer_core::value::parse_list;
use odometer_core::CharacterSequence;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(values) = parse_list(text) else {
        return;
    };
    for value in values {
        let shown = value.to_string();
        assert_eq!(CharacterSequence::from_value(&value).to_string(), shown);
        // Display output parses back to the same text
        let reparsed: odometer_core::Value = shown.parse().expect("display output must parse");
        assert_eq!(reparsed.to_string(), shown);
    }
});
