//! Control keys.
//!
//! Entity records and the two phase sentinels live in one key namespace. A
//! sentinel carries no payload; only its presence matters.

/// Present once the election has been opened.
pub const INIT_ELECTION_KEY: &str = "InitElection";

/// Present once the election has been closed.
pub const END_ELECTION_KEY: &str = "EndElection";

/// Value written at either control key.
pub const CONTROL_SENTINEL: &[u8] = &[0x00];

/// Whether `key` is one of the two phase sentinels.
pub fn is_control_key(key: &str) -> bool {
    key == INIT_ELECTION_KEY || key == END_ELECTION_KEY
}
