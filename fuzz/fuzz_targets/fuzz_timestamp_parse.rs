#![no_main]

use libfuzzer_sys::fuzz_target;

use evote_types::Timestamp;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(ts) = Timestamp::parse_rfc3339(text) {
        let rendered = ts.to_rfc3339();
        let reparsed = Timestamp::parse_rfc3339(&rendered).expect("rendered timestamp parses");
        assert_eq!(reparsed, ts);
        assert_eq!(reparsed.to_rfc3339(), rendered);
    }
});
