//! Operation sets of both applications.
//!
//! Each application accepts a closed set of operations. Parsing turns the
//! raw `(function, args)` pair into a variant carrying validated arguments,
//! so every handler receives well-formed input and no ledger access happens
//! for a malformed call.

use evote_types::{is_control_key, Ballot, VoterLogEntry};

use crate::args::{expect_args, parse_candidate_number, parse_timestamp};
use crate::ContractError;

/// Operations of the Ballot Registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryOperation {
    InitElection,
    EndElection,
    /// `vote(id, candidateNumber, timestamp)`
    Vote(Ballot),
    /// `auditById(id)`
    AuditById { id: String },
    /// `auditByRange(startKey, endKey)`
    AuditByRange { start: String, end: String },
}

impl RegistryOperation {
    /// Wire names of every operation, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "initElection",
        "endElection",
        "vote",
        "auditById",
        "auditByRange",
    ];

    pub fn parse(function: &str, args: &[String]) -> Result<Self, ContractError> {
        match function {
            "initElection" => {
                expect_args(args, 0)?;
                Ok(Self::InitElection)
            }
            "endElection" => {
                expect_args(args, 0)?;
                Ok(Self::EndElection)
            }
            "vote" => {
                expect_args(args, 3)?;
                let id = entity_key("id", &args[0])?;
                let candidate_number = parse_candidate_number(&args[1])?;
                let timestamp = parse_timestamp(&args[2])?;
                Ok(Self::Vote(Ballot::new(id, candidate_number, timestamp)))
            }
            "auditById" => {
                expect_args(args, 1)?;
                Ok(Self::AuditById {
                    id: args[0].clone(),
                })
            }
            "auditByRange" => {
                expect_args(args, 2)?;
                Ok(Self::AuditByRange {
                    start: args[0].clone(),
                    end: args[1].clone(),
                })
            }
            other => Err(ContractError::InvalidFunction(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InitElection => "initElection",
            Self::EndElection => "endElection",
            Self::Vote(_) => "vote",
            Self::AuditById { .. } => "auditById",
            Self::AuditByRange { .. } => "auditByRange",
        }
    }
}

/// Operations of the Voter Log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoterLogOperation {
    InitElection,
    EndElection,
    /// `register(voterId, confirmationKey, timestamp)`
    Register(VoterLogEntry),
    /// `getByVoterId(voterId)`
    GetByVoterId { voter_id: String },
    /// `getByRange(startKey, endKey)`
    GetByRange { start: String, end: String },
}

impl VoterLogOperation {
    pub const NAMES: &'static [&'static str] = &[
        "initElection",
        "endElection",
        "register",
        "getByVoterId",
        "getByRange",
    ];

    pub fn parse(function: &str, args: &[String]) -> Result<Self, ContractError> {
        match function {
            "initElection" => {
                expect_args(args, 0)?;
                Ok(Self::InitElection)
            }
            "endElection" => {
                expect_args(args, 0)?;
                Ok(Self::EndElection)
            }
            "register" => {
                expect_args(args, 3)?;
                let voter_id = entity_key("voterId", &args[0])?;
                let timestamp = parse_timestamp(&args[2])?;
                Ok(Self::Register(VoterLogEntry::new(
                    voter_id,
                    args[1].clone(),
                    timestamp,
                )))
            }
            "getByVoterId" => {
                expect_args(args, 1)?;
                Ok(Self::GetByVoterId {
                    voter_id: args[0].clone(),
                })
            }
            "getByRange" => {
                expect_args(args, 2)?;
                Ok(Self::GetByRange {
                    start: args[0].clone(),
                    end: args[1].clone(),
                })
            }
            other => Err(ContractError::InvalidFunction(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InitElection => "initElection",
            Self::EndElection => "endElection",
            Self::Register(_) => "register",
            Self::GetByVoterId { .. } => "getByVoterId",
            Self::GetByRange { .. } => "getByRange",
        }
    }
}

/// An id that will become a ledger key: non-empty and not a control key.
fn entity_key(name: &'static str, raw: &str) -> Result<String, ContractError> {
    if raw.is_empty() {
        return Err(ContractError::InvalidArgumentFormat {
            name,
            reason: "must not be empty".to_string(),
        });
    }
    if is_control_key(raw) {
        return Err(ContractError::InvalidArgumentFormat {
            name,
            reason: format!("{raw:?} is a reserved key"),
        });
    }
    Ok(raw.to_string())
}
