//! Property tests driving both applications with arbitrary operation
//! sequences and checking them against a simple phase model.

use std::collections::HashSet;

use proptest::prelude::*;

use evote_election::{check_status, invoke, BallotRegistry, ContractError, VoterLog};
use evote_nullables::NullLedger;
use evote_store::Ledger;
use evote_types::ElectionPhase;

#[derive(Clone, Debug)]
enum Step {
    Init,
    End,
    Register(u8),
    Vote(u8, i64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => Just(Step::Init),
        1 => Just(Step::End),
        4 => (0u8..6).prop_map(Step::Register),
        4 => (0u8..6, -3i64..10).prop_map(|(id, c)| Step::Vote(id, c)),
    ]
}

fn phase(ledger: &NullLedger) -> ElectionPhase {
    let txn = ledger.begin().unwrap();
    check_status(&txn)
}

const TS: &str = "2024-01-01T00:00:00Z";

proptest! {
    /// Phase only moves forward and each transition happens at most once.
    #[test]
    fn phase_progression_is_forward_only(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let ledger = NullLedger::new();
        let mut model = ElectionPhase::NotStarted;
        let mut rank = 0;

        for step in steps {
            let result = match step {
                Step::Init => invoke(&ledger, &VoterLog, "initElection", &[]),
                Step::End => invoke(&ledger, &VoterLog, "endElection", &[]),
                _ => continue,
            };
            let expected_ok = match (&step, model) {
                (Step::Init, ElectionPhase::NotStarted) => {
                    model = ElectionPhase::Started;
                    true
                }
                (Step::End, ElectionPhase::Started) => {
                    model = ElectionPhase::Ended;
                    true
                }
                _ => false,
            };
            prop_assert_eq!(result.is_ok(), expected_ok);

            let now = phase(&ledger);
            prop_assert_eq!(now, model);
            let now_rank = match now {
                ElectionPhase::NotStarted => 0,
                ElectionPhase::Started => 1,
                ElectionPhase::Ended => 2,
                ElectionPhase::Error => unreachable!(),
            };
            prop_assert!(now_rank >= rank);
            rank = now_rank;
        }
    }

    /// Registrations succeed exactly once per voter and only while open;
    /// votes succeed whenever the election is open.
    #[test]
    fn writes_follow_the_model(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let log = NullLedger::new();
        let ballots = NullLedger::new();
        let mut open = false;
        let mut started = false;
        let mut registered = HashSet::new();

        for step in steps {
            match step {
                Step::Init => {
                    let a = invoke(&log, &VoterLog, "initElection", &[]);
                    let b = invoke(&ballots, &BallotRegistry, "initElection", &[]);
                    prop_assert_eq!(a.is_ok(), !started);
                    prop_assert_eq!(b.is_ok(), !started);
                    if !started {
                        started = true;
                        open = true;
                    }
                }
                Step::End => {
                    let a = invoke(&log, &VoterLog, "endElection", &[]);
                    let b = invoke(&ballots, &BallotRegistry, "endElection", &[]);
                    prop_assert_eq!(a.is_ok(), open);
                    prop_assert_eq!(b.is_ok(), open);
                    open = false;
                }
                Step::Register(id) => {
                    let voter = format!("v{id}");
                    let result = invoke(&log, &VoterLog, "register", &[voter.clone(), "k".into(), TS.into()]);
                    match result {
                        Ok(payload) => {
                            prop_assert!(open);
                            prop_assert!(registered.insert(voter.clone()));
                            prop_assert_eq!(payload, voter.into_bytes());
                        }
                        Err(ContractError::AlreadyVoted(_)) => {
                            prop_assert!(open);
                            prop_assert!(registered.contains(&voter));
                        }
                        Err(ContractError::ElectionNotOpen(_)) => prop_assert!(!open),
                        Err(other) => prop_assert!(false, "unexpected error {}", other),
                    }
                }
                Step::Vote(id, candidate) => {
                    let ballot = format!("b{id}");
                    let result = invoke(
                        &ballots,
                        &BallotRegistry,
                        "vote",
                        &[ballot, candidate.to_string(), TS.into()],
                    );
                    prop_assert_eq!(result.is_ok(), open);
                }
            }
        }

        // Every registered voter is in the log exactly once; nothing else is.
        let txn = log.begin().unwrap();
        let entries = VoterLog.get_by_range(&txn, "", "").unwrap();
        let voters: HashSet<String> = entries.iter().map(|e| e.voter_id.clone()).collect();
        prop_assert_eq!(entries.len(), voters.len());
        prop_assert_eq!(voters, registered);
    }
}
