#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Ok(db) = pcidb::parse_str(&text) {
        // Every successful parse must be reproducible.
        assert_eq!(pcidb::parse_str(&text).ok(), Some(db));
    }
});
