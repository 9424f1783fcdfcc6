//! Duration input parsing

use std::fmt;

use serde::Serialize;

/// Why a duration input was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Empty,
    NotANumber,
    NotPositive,
    Fractional,
    TooLarge,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::Empty => "duration is empty",
            RejectReason::NotANumber => "duration is not a number",
            RejectReason::NotPositive => "duration must be greater than zero",
            RejectReason::Fractional => "duration must be a whole number of seconds",
            RejectReason::TooLarge => "duration is too large",
        };
        f.write_str(text)
    }
}

/// Result of a set-duration intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetDurationOutcome {
    Accepted { duration: u64 },
    Rejected(RejectReason),
}

impl SetDurationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SetDurationOutcome::Accepted { .. })
    }
}

/// Parse raw input text into a duration in whole seconds
pub fn parse_duration(input: &str) -> Result<u64, RejectReason> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RejectReason::Empty);
    }

    let value: f64 = trimmed.parse().map_err(|_| RejectReason::NotANumber)?;
    if value.is_nan() {
        return Err(RejectReason::NotANumber);
    }
    if value <= 0.0 {
        return Err(RejectReason::NotPositive);
    }
    if value.is_infinite() || value >= u64::MAX as f64 {
        return Err(RejectReason::TooLarge);
    }
    if value.fract() != 0.0 {
        return Err(RejectReason::Fractional);
    }

    Ok(value as u64)
}
