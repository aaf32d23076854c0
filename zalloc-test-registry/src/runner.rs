// ZALLOC - zalloc-test-registry
// Module: Scenario Runner
// SW-REQ-ID: REQ_RUNNER_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Sequential scenario runner.
//!
//! For each selected scenario the runner builds the fixture (unmeasured),
//! hands the operation to the probe and compares the observed verdict with
//! the expected one. Only a missing measurement substrate aborts a run;
//! every other problem is recorded against the scenario and the run goes on.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use zalloc_error::{helpers, Error, Result};
use zalloc_probe::spans::ScenarioTrace;
use zalloc_probe::{MeasurementSubstrate, Observation, Probe, Strategy, Verdict};

use crate::catalog::Catalog;
use crate::scenario::{ScenarioCase, ScenarioGroup};

/// Per-scenario adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioOverride {
    /// Strategy for this scenario only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy:    Option<Strategy>,
    /// Differential repetitions for this scenario only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,
}

/// Which scenarios to run and how.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Run scenarios whose name contains this text
    pub name_filter:       Option<String>,
    /// Run scenarios of this group only
    pub group_filter:      Option<ScenarioGroup>,
    /// Strategy for every scenario without its own override
    pub strategy_override: Option<Strategy>,
    /// Adjustments keyed by scenario name
    pub overrides:         BTreeMap<String, ScenarioOverride>,
}

impl RunOptions {
    /// Options that run every scenario with its own settings
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict the run to names containing `filter`
    #[must_use]
    pub fn with_name_filter(mut self, filter: impl Into<String>) -> Self {
        self.name_filter = Some(filter.into());
        self
    }

    /// Restrict the run to one group
    #[must_use]
    pub fn with_group(mut self, group: ScenarioGroup) -> Self {
        self.group_filter = Some(group);
        self
    }

    /// Force a strategy on every scenario without its own override
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy_override = Some(strategy);
        self
    }

    /// Strategy for `scenario`, most specific setting first: the
    /// per-scenario override, the run-wide override, the scenario's own
    /// choice, then `default`.
    #[must_use]
    pub fn strategy_for(&self, scenario: &dyn ScenarioCase, default: Strategy) -> Strategy {
        self.overrides
            .get(scenario.name())
            .and_then(|o| o.strategy)
            .or(self.strategy_override)
            .or(scenario.strategy())
            .unwrap_or(default)
    }

    /// Repetition count override for `scenario`
    #[must_use]
    pub fn repetitions_for(&self, scenario: &dyn ScenarioCase) -> Option<u32> {
        self.overrides.get(scenario.name()).and_then(|o| o.repetitions)
    }
}

/// How a scenario ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Observed verdict matched the expected verdict
    Passed,
    /// Observed verdict differed from the expected verdict
    Mismatch,
    /// No verdict: setup failed or warm-up ran away
    Inconclusive,
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Scenario name
    pub name:        &'static str,
    /// Scenario group
    pub group:       ScenarioGroup,
    /// Expected verdict
    pub expected:    Verdict,
    /// Strategy the probe used
    pub strategy:    Strategy,
    /// How the scenario ended
    pub outcome:     Outcome,
    /// Probe output, absent when inconclusive
    pub observation: Option<Observation>,
    /// Why the scenario did not pass
    pub detail:      Option<String>,
    /// Wall time spent on the scenario, setup included
    pub duration_ms: u64,
}

impl ScenarioResult {
    /// Whether the scenario passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

/// Statistics about a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Number of scenarios passed
    pub passed:            usize,
    /// Number of verdict mismatches
    pub failed:            usize,
    /// Number of scenarios without a verdict
    pub inconclusive:      usize,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
}

impl RunStats {
    /// Number of scenarios run
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.inconclusive
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Mismatch => self.failed += 1,
            Outcome::Inconclusive => self.inconclusive += 1,
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Per-scenario results in run order
    pub results: Vec<ScenarioResult>,
    /// Aggregate statistics
    pub stats:   RunStats,
}

impl RunReport {
    /// True iff nothing mismatched and nothing was inconclusive
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.stats.failed == 0 && self.stats.inconclusive == 0
    }

    /// Results that did not pass
    pub fn problems(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|result| !result.passed())
    }

    /// Result for the named scenario
    #[must_use]
    pub fn result(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|result| result.name == name)
    }

    /// [`Error::RUN_FAILED`] unless the run succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RUN_FAILED`] when any scenario mismatched or was
    /// inconclusive.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() { Ok(self) } else { Err(Error::RUN_FAILED) }
    }
}

/// Runs catalog scenarios through a probe.
#[derive(Debug)]
pub struct Runner<'c, 's, S: MeasurementSubstrate + ?Sized> {
    catalog: &'c Catalog,
    probe:   Probe<'s, S>,
}

impl<'c, 's, S: MeasurementSubstrate + ?Sized> Runner<'c, 's, S> {
    /// Create a runner over `catalog` using `probe`
    #[must_use]
    pub fn new(catalog: &'c Catalog, probe: Probe<'s, S>) -> Self {
        Self { catalog, probe }
    }

    /// The probe used for scenarios without a repetition override
    #[must_use]
    pub fn probe(&self) -> &Probe<'s, S> {
        &self.probe
    }

    /// Run every scenario selected by `options`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns the fatal error when the measurement substrate is missing,
    /// before or during the run.
    pub fn run(&self, options: &RunOptions) -> Result<RunReport> {
        let start = Instant::now();
        let mut report = RunReport::default();

        if let Err(error) = self.probe.substrate().verify() {
            tracing::error!(%error, "measurement unavailable; nothing was run");
            return Err(error);
        }

        for scenario in self.catalog.select(options.name_filter.as_deref(), options.group_filter) {
            let result = self.run_scenario(scenario, options)?;
            report.stats.record(result.outcome);
            report.results.push(result);
        }

        report.stats.execution_time_ms = elapsed_ms(start);
        tracing::info!(
            passed = report.stats.passed,
            failed = report.stats.failed,
            inconclusive = report.stats.inconclusive,
            execution_time_ms = report.stats.execution_time_ms,
            "run finished"
        );
        Ok(report)
    }

    /// Run one scenario.
    ///
    /// # Errors
    ///
    /// Returns the fatal error when the measurement substrate is missing.
    pub fn run_scenario(
        &self,
        scenario: &dyn ScenarioCase,
        options: &RunOptions,
    ) -> Result<ScenarioResult> {
        let start = Instant::now();
        let span = ScenarioTrace::running(scenario.name(), scenario.group().as_str());
        let _entered = span.enter();

        let strategy = options.strategy_for(scenario, self.probe.config().default_strategy);
        let mut result = ScenarioResult {
            name: scenario.name(),
            group: scenario.group(),
            expected: scenario.expected(),
            strategy,
            outcome: Outcome::Inconclusive,
            observation: None,
            detail: None,
            duration_ms: 0,
        };

        let mut workload = match setup(scenario) {
            Ok(workload) => workload,
            Err(error) => {
                tracing::warn!(%error, "setup failed; scenario is inconclusive");
                result.detail = Some(error.to_string());
                result.duration_ms = elapsed_ms(start);
                return Ok(result);
            }
        };

        let measured = match options.repetitions_for(scenario) {
            Some(repetitions) => self
                .probe
                .reconfigured(self.probe.config().with_repetitions(repetitions))
                .and_then(|probe| probe.measure_with(strategy, workload.as_op())),
            None => self.probe.measure_with(strategy, workload.as_op()),
        };

        match measured {
            Ok(observation) => {
                result.observation = Some(observation);
                if observation.verdict == result.expected {
                    result.outcome = Outcome::Passed;
                    tracing::debug!("scenario passed");
                } else {
                    result.outcome = Outcome::Mismatch;
                    result.detail = Some(format!(
                        "{}: expected {}, observed {} (bytes_delta={}, allocations={}, strategy={})",
                        Error::VERDICT_MISMATCH,
                        result.expected,
                        observation.verdict,
                        observation.bytes_delta,
                        observation.allocations,
                        observation.strategy,
                    ));
                    tracing::warn!(
                        expected = %result.expected,
                        observed = %observation.verdict,
                        bytes_delta = observation.bytes_delta,
                        allocations = observation.allocations,
                        strategy = %observation.strategy,
                        "verdict mismatch"
                    );
                }
            }
            Err(error) if error.is_fatal() => {
                tracing::error!(%error, "measurement unavailable; aborting run");
                return Err(error);
            }
            Err(error) => {
                tracing::warn!(%error, "no verdict; scenario is inconclusive");
                result.detail = Some(error.to_string());
            }
        }

        result.duration_ms = elapsed_ms(start);
        Ok(result)
    }
}

/// Build the fixture, turning a panic into a setup error.
fn setup(scenario: &dyn ScenarioCase) -> Result<crate::scenario::Workload> {
    let span = ScenarioTrace::setting_up(scenario.name());
    let _entered = span.enter();
    panic::catch_unwind(AssertUnwindSafe(|| scenario.setup()))
        .unwrap_or(Err(helpers::setup_panicked("Scenario setup panicked")))
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
