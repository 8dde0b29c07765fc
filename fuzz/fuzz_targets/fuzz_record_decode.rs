#![no_main]

use libfuzzer_sys::fuzz_target;

use evote_types::{Ballot, VoterLogEntry};

// Decode arbitrary ledger values as records. Whatever decodes must survive
// a re-encode unchanged.
fuzz_target!(|data: &[u8]| {
    if let Ok(ballot) = serde_json::from_slice::<Ballot>(data) {
        let encoded = serde_json::to_vec(&ballot).expect("ballot encodes");
        let decoded: Ballot = serde_json::from_slice(&encoded).expect("ballot re-decodes");
        assert_eq!(decoded, ballot);
    }

    if let Ok(entry) = serde_json::from_slice::<VoterLogEntry>(data) {
        let encoded = serde_json::to_vec(&entry).expect("entry encodes");
        let decoded: VoterLogEntry = serde_json::from_slice(&encoded).expect("entry re-decodes");
        assert_eq!(decoded, entry);
    }

    let _ = serde_json::from_slice::<Vec<Ballot>>(data);
    let _ = serde_json::from_slice::<Vec<VoterLogEntry>>(data);
});
