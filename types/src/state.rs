//! Election phase.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypeError;

/// The lifecycle stage of an election, derived from the control keys.
///
/// Progression is strictly forward: `NotStarted -> Started -> Ended`.
/// `Error` is never a stored state; it only reports that the ledger read
/// used to derive the phase failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElectionPhase {
    /// `InitElection` is absent.
    NotStarted,
    /// `InitElection` is present, `EndElection` is absent.
    Started,
    /// Both control keys are present.
    Ended,
    /// The control keys could not be read.
    Error,
}

impl ElectionPhase {
    /// Derive the phase from the presence of the two control keys.
    ///
    /// `EndElection` is ignored while `InitElection` is absent.
    pub fn from_markers(init_present: bool, end_present: bool) -> Self {
        match (init_present, end_present) {
            (false, _) => Self::NotStarted,
            (true, false) => Self::Started,
            (true, true) => Self::Ended,
        }
    }

    /// Whether ballots and registrations are accepted in this phase.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Started)
    }

    /// Wire name, as reported in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::Started => "STARTED",
            Self::Ended => "ENDED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ElectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElectionPhase {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "STARTED" => Ok(Self::Started),
            "ENDED" => Ok(Self::Ended),
            "ERROR" => Ok(Self::Error),
            other => Err(TypeError::UnknownPhase(other.to_string())),
        }
    }
}
