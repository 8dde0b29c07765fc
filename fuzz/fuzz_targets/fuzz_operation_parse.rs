#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use evote_election::{RegistryOperation, VoterLogOperation};

#[derive(Arbitrary, Debug)]
struct Call {
    function: String,
    args: Vec<String>,
}

fuzz_target!(|call: Call| {
    // Parsing must never panic, and an accepted call names itself.
    if let Ok(op) = RegistryOperation::parse(&call.function, &call.args) {
        assert_eq!(op.name(), call.function);
    }
    if let Ok(op) = VoterLogOperation::parse(&call.function, &call.args) {
        assert_eq!(op.name(), call.function);
    }
});
