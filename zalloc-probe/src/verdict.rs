// ZALLOC - zalloc-probe
// Module: Verdicts and Observations
// SW-REQ-ID: REQ_PROBE_002
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Verdict, strategy and observation types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one probe invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The operation grew the heap
    Allocated,
    /// The operation left the heap untouched
    DidNotAllocate,
}

impl Verdict {
    /// Classify a heap byte delta. Only a strictly positive delta allocates.
    #[must_use]
    pub const fn from_delta(bytes_delta: i64) -> Self {
        if bytes_delta > 0 { Self::Allocated } else { Self::DidNotAllocate }
    }

    /// Stable lowercase name used in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allocated => "allocated",
            Self::DidNotAllocate => "did_not_allocate",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the probe decides whether an operation allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Collect, sample heap size, run the operation many times, sample again
    Differential,
    /// Count bytes allocated around exactly one execution
    #[default]
    SingleShot,
}

impl Strategy {
    /// Name as accepted on the command line and in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Differential => "differential",
            Self::SingleShot => "single-shot",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Strategy {
    type Err = zalloc_error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "differential" => Ok(Self::Differential),
            "single-shot" | "single_shot" => Ok(Self::SingleShot),
            _ => Err(zalloc_error::helpers::config_invalid(
                "Unknown strategy; expected differential or single-shot",
            )),
        }
    }
}

/// Everything the probe learned about one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Strategy that produced this observation
    pub strategy:     Strategy,
    /// Allocated or not
    pub verdict:      Verdict,
    /// Heap byte change attributed to the operation
    pub bytes_delta:  i64,
    /// Allocation calls made during the measured region
    pub allocations:  u64,
    /// Number of measured executions
    pub repetitions:  u32,
    /// Bytes allocated while warming up, outside the measured region
    pub warmup_bytes: u64,
}

impl Observation {
    /// Whether the verdict is [`Verdict::Allocated`]
    #[must_use]
    pub fn allocated(&self) -> bool {
        self.verdict == Verdict::Allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative_deltas_do_not_allocate() {
        assert_eq!(Verdict::from_delta(0), Verdict::DidNotAllocate);
        assert_eq!(Verdict::from_delta(-4096), Verdict::DidNotAllocate);
        assert_eq!(Verdict::from_delta(1), Verdict::Allocated);
    }

    #[test]
    fn test_strategy_parses_cli_names() {
        assert_eq!("differential".parse::<Strategy>(), Ok(Strategy::Differential));
        assert_eq!("single-shot".parse::<Strategy>(), Ok(Strategy::SingleShot));
        assert!("sampling".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::SingleShot);
    }
}
