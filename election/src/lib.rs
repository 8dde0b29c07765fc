//! Election business logic for the evote ledger applications.
//!
//! Two applications share one design:
//! - **Ballot Registry** records votes keyed by ballot id and supports audits.
//! - **Voter Log** records voter participation and enforces one vote per voter.
//!
//! Election phase is derived on every call from two control keys
//! (`InitElection`, `EndElection`); the handlers hold no state between
//! invocations. Progression is forward only:
//! `NOT_STARTED -> STARTED -> ENDED`.

pub mod args;
pub mod contract;
pub mod error;
pub mod lifecycle;
pub mod operation;
pub mod registry;
mod scan;
pub mod voter_log;

pub use contract::{invoke, Contract};
pub use error::ContractError;
pub use lifecycle::{check_status, current_phase, end_election, init_election};
pub use operation::{RegistryOperation, VoterLogOperation};
pub use registry::BallotRegistry;
pub use voter_log::VoterLog;
