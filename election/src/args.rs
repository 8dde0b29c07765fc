//! Positional argument validation.

use evote_types::Timestamp;

use crate::ContractError;

/// Fail unless exactly `expected` arguments were supplied.
pub fn expect_args(args: &[String], expected: usize) -> Result<(), ContractError> {
    if args.len() != expected {
        return Err(ContractError::InvalidArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Parse a decimal candidate number. A leading `+` or `-` is accepted.
pub fn parse_candidate_number(raw: &str) -> Result<i64, ContractError> {
    raw.parse::<i64>()
        .map_err(|e| ContractError::InvalidArgumentFormat {
            name: "candidateNumber",
            reason: format!("{raw:?}: {e}"),
        })
}

/// Parse an RFC3339 timestamp.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, ContractError> {
    Timestamp::parse_rfc3339(raw).map_err(|e| ContractError::InvalidArgumentFormat {
        name: "timestamp",
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arity_matches() {
        assert!(expect_args(&args(&["a", "b"]), 2).is_ok());
        assert!(expect_args(&[], 0).is_ok());
    }

    #[test]
    fn arity_mismatch_reports_both_counts() {
        let err = expect_args(&args(&["a"]), 3).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgumentCount { expected: 3, got: 1 }
        ));
    }

    #[test]
    fn candidate_numbers() {
        assert_eq!(parse_candidate_number("2").unwrap(), 2);
        assert_eq!(parse_candidate_number("-7").unwrap(), -7);
        assert_eq!(parse_candidate_number("+9").unwrap(), 9);
        assert_eq!(parse_candidate_number("007").unwrap(), 7);
    }

    #[test]
    fn bad_candidate_numbers() {
        for raw in ["", "two", "2.5", " 2", "2 ", "99999999999999999999", "0x10"] {
            let err = parse_candidate_number(raw).unwrap_err();
            assert!(
                matches!(err, ContractError::InvalidArgumentFormat { name: "candidateNumber", .. }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn timestamps() {
        assert!(parse_timestamp("2024-01-01T00:00:00Z").is_ok());
        assert!(parse_timestamp("2024-01-01T00:00:00.123456789-05:00").is_ok());
        let err = parse_timestamp("01/01/2024").unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgumentFormat { name: "timestamp", .. }
        ));
    }
}
