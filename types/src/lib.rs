//! Fundamental types for the evote ledger applications.
//!
//! This crate defines the records persisted by both applications (ballots and
//! voter log entries), the derived election phase, RFC3339 timestamps and the
//! control keys that encode phase transitions in the shared key namespace.

pub mod ballot;
pub mod error;
pub mod keys;
pub mod state;
pub mod time;
pub mod voter_log;

pub use ballot::Ballot;
pub use error::TypeError;
pub use keys::{is_control_key, CONTROL_SENTINEL, END_ELECTION_KEY, INIT_ELECTION_KEY};
pub use state::ElectionPhase;
pub use time::Timestamp;
pub use voter_log::VoterLogEntry;
