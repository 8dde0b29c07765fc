#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use evote_election::{invoke, BallotRegistry, VoterLog};
use evote_nullables::NullLedger;

#[derive(Arbitrary, Debug)]
enum Target {
    Ballots,
    VoterLog,
}

#[derive(Arbitrary, Debug)]
struct Call {
    target: Target,
    function: String,
    args: Vec<String>,
}

// Drive both applications with arbitrary calls. A rejected call must leave
// the ledger exactly as it found it.
fuzz_target!(|calls: Vec<Call>| {
    let ballots = NullLedger::new();
    let log = NullLedger::new();

    for call in calls.into_iter().take(64) {
        let ledger = match call.target {
            Target::Ballots => &ballots,
            Target::VoterLog => &log,
        };
        let before = ledger.snapshot();
        let result = match call.target {
            Target::Ballots => invoke(ledger, &BallotRegistry, &call.function, &call.args),
            Target::VoterLog => invoke(ledger, &VoterLog, &call.function, &call.args),
        };
        if result.is_err() {
            assert_eq!(ledger.snapshot(), before);
        }
    }
});
