// ZALLOC - zalloc-probe
// Module: Allocation Probe
// SW-REQ-ID: REQ_PROBE_002
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The allocation probe.
//!
//! Both strategies share a mandatory warm-up: the operation runs
//! `warmup_rounds` times unmeasured so one-time costs (lazy tables, first
//! growth of a reused buffer, interned data) never show up as steady-state
//! allocation.
//!
//! Nothing inside the measured region logs or allocates on behalf of the
//! probe; spans are entered before warm-up and events are emitted after the
//! last sample.

use zalloc_error::{Error, Result};

use crate::config::ProbeConfig;
use crate::spans::ProbeTrace;
use crate::substrate::MeasurementSubstrate;
use crate::verdict::{Observation, Strategy, Verdict};

/// Measures whether an operation allocates in steady state.
#[derive(Debug)]
pub struct Probe<'s, S: MeasurementSubstrate + ?Sized> {
    substrate: &'s S,
    config:    ProbeConfig,
}

impl<'s, S: MeasurementSubstrate + ?Sized> Probe<'s, S> {
    /// Create a probe over `substrate`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(substrate: &'s S, config: ProbeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { substrate, config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Substrate this probe samples
    #[must_use]
    pub const fn substrate(&self) -> &'s S {
        self.substrate
    }

    /// A probe on the same substrate with another configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn reconfigured(&self, config: ProbeConfig) -> Result<Self> {
        Self::new(self.substrate, config)
    }

    /// Measure `op` with the configured default strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WARMUP_RUNAWAY`] when warm-up exceeds its budget.
    pub fn measure(&self, op: &mut dyn FnMut()) -> Result<Observation> {
        self.measure_with(self.config.default_strategy, op)
    }

    /// Measure `op` with an explicit strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WARMUP_RUNAWAY`] when warm-up exceeds its budget.
    pub fn measure_with(&self, strategy: Strategy, op: &mut dyn FnMut()) -> Result<Observation> {
        let repetitions = match strategy {
            Strategy::Differential => self.config.repetitions,
            Strategy::SingleShot => 1,
        };
        let span = ProbeTrace::measuring(strategy, repetitions);
        let _entered = span.enter();

        let warmup_bytes = self.warm_up(op)?;
        let observation = match strategy {
            Strategy::Differential => self.differential(op, warmup_bytes),
            Strategy::SingleShot => self.single_shot(op, warmup_bytes),
        };

        tracing::debug!(
            verdict = %observation.verdict,
            bytes_delta = observation.bytes_delta,
            allocations = observation.allocations,
            warmup_bytes = observation.warmup_bytes,
            "probe finished"
        );
        Ok(observation)
    }

    fn warm_up(&self, op: &mut dyn FnMut()) -> Result<u64> {
        let rounds = self.config.warmup_rounds;
        let span = ProbeTrace::warming_up(rounds);
        let _entered = span.enter();

        let start = self.substrate.allocated_bytes();
        for _ in 0..rounds {
            op();
            let spent = self.substrate.allocated_bytes().saturating_sub(start);
            if spent > self.config.warmup_budget_bytes {
                tracing::warn!(
                    spent,
                    budget = self.config.warmup_budget_bytes,
                    "warm-up exceeded its allocation budget"
                );
                return Err(Error::WARMUP_RUNAWAY);
            }
        }
        Ok(self.substrate.allocated_bytes().saturating_sub(start))
    }

    fn differential(&self, op: &mut dyn FnMut(), warmup_bytes: u64) -> Observation {
        let substrate = self.substrate;
        let repetitions = self.config.repetitions;

        substrate.collect();
        let calls_before = substrate.allocation_count();
        let baseline = substrate.current_live_heap_bytes();
        for _ in 0..repetitions {
            op();
        }
        if self.config.collect_after {
            substrate.collect();
        }
        let after = substrate.current_live_heap_bytes();
        let allocations = substrate.allocation_count().saturating_sub(calls_before);

        let bytes_delta = after.saturating_sub(baseline);
        Observation {
            strategy: Strategy::Differential,
            verdict: Verdict::from_delta(bytes_delta),
            bytes_delta,
            allocations,
            repetitions,
            warmup_bytes,
        }
    }

    fn single_shot(&self, op: &mut dyn FnMut(), warmup_bytes: u64) -> Observation {
        let check = self.substrate.run_with_allocation_check(op);
        let bytes_delta = i64::try_from(check.bytes_allocated).unwrap_or(i64::MAX);
        Observation {
            strategy: Strategy::SingleShot,
            verdict: if check.did_allocate { Verdict::Allocated } else { Verdict::DidNotAllocate },
            bytes_delta,
            allocations: check.allocations,
            repetitions: 1,
            warmup_bytes,
        }
    }
}
