// ZALLOC - zalloc-probe
// Module: Probe Configuration
// SW-REQ-ID: REQ_PROBE_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Probe configuration.
//!
//! Repetition count and post-loop collection are calibration knobs, not
//! universal constants; they are read from the `[probe]` table of a suite
//! config file or set from command-line flags.

use serde::{Deserialize, Serialize};
use zalloc_error::{helpers, Result};

use crate::verdict::Strategy;

/// Default number of measured executions for the differential strategy
pub const DEFAULT_REPETITIONS: u32 = 1000;

/// Default warm-up allocation budget (64 MiB)
pub const DEFAULT_WARMUP_BUDGET_BYTES: u64 = 64 * 1024 * 1024;

/// Tunable probe parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Strategy used when a scenario does not pick one
    pub default_strategy:    Strategy,
    /// Measured executions for the differential strategy
    pub repetitions:         u32,
    /// Collect again after the measured loop
    pub collect_after:       bool,
    /// Unmeasured executions before measuring
    pub warmup_rounds:       u32,
    /// Bytes warm-up may allocate before the probe gives up
    pub warmup_budget_bytes: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            default_strategy:    Strategy::SingleShot,
            repetitions:         DEFAULT_REPETITIONS,
            collect_after:       false,
            warmup_rounds:       1,
            warmup_budget_bytes: DEFAULT_WARMUP_BUDGET_BYTES,
        }
    }
}

impl ProbeConfig {
    /// Check the configuration for values the probe cannot honour.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `repetitions` or
    /// `warmup_budget_bytes` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(helpers::config_invalid("repetitions must be at least 1"));
        }
        if self.warmup_budget_bytes == 0 {
            return Err(helpers::config_invalid("warmup_budget_bytes must be greater than 0"));
        }
        Ok(())
    }

    /// Same configuration with a different repetition count.
    #[must_use]
    pub const fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Same configuration with a different default strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    /// Same configuration with a different warm-up round count.
    #[must_use]
    pub const fn with_warmup_rounds(mut self, warmup_rounds: u32) -> Self {
        self.warmup_rounds = warmup_rounds;
        self
    }
}
