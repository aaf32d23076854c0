// ZALLOC - zalloc-test-registry
// Module: Report Formatting
// SW-REQ-ID: REQ_RUNNER_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Human and JSON renderings of listings and run reports.

use core::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::runner::{Outcome, RunReport, ScenarioResult};
use crate::scenario::{ScenarioCase, ScenarioInfo};

/// One line per scenario: name, group, expected verdict, description.
pub fn format_listing_human<'a>(scenarios: impl IntoIterator<Item = &'a dyn ScenarioCase>) -> String {
    let mut out = String::new();
    let mut count = 0usize;
    for scenario in scenarios {
        count += 1;
        let name = if scenario.name().starts_with(crate::scenario::OK_PREFIX) {
            scenario.name().bright_green()
        } else {
            scenario.name().bright_yellow()
        };
        let _ = writeln!(
            out,
            "{:<44} {:<13} {:<17} {}",
            name,
            scenario.group().as_str().bright_blue(),
            scenario.expected().as_str(),
            scenario.description().bright_black()
        );
    }
    let _ = writeln!(out, "{} scenarios", count.to_string().bright_white());
    out
}

/// JSON array of [`ScenarioInfo`].
///
/// # Errors
///
/// Returns the serializer error, if any.
pub fn format_listing_json<'a>(
    scenarios: impl IntoIterator<Item = &'a dyn ScenarioCase>,
) -> serde_json::Result<String> {
    let infos: Vec<ScenarioInfo> = scenarios.into_iter().map(ScenarioInfo::from).collect();
    serde_json::to_string_pretty(&infos)
}

fn outcome_marker(outcome: Outcome) -> colored::ColoredString {
    match outcome {
        Outcome::Passed => "PASS".bright_green(),
        Outcome::Mismatch => "FAIL".bright_red(),
        Outcome::Inconclusive => "INCONCLUSIVE".bright_yellow(),
    }
}

fn format_result_line(out: &mut String, result: &ScenarioResult, verbose: bool) {
    let numbers = result.observation.map_or_else(String::new, |observation| {
        format!(
            "{} bytes, {} allocations, {} x{}",
            observation.bytes_delta,
            observation.allocations,
            observation.strategy,
            observation.repetitions
        )
    });
    let _ = writeln!(
        out,
        "{:>12} {:<44} {}",
        outcome_marker(result.outcome),
        result.name,
        numbers.bright_black()
    );
    if let Some(detail) = &result.detail {
        if verbose || !result.passed() {
            let _ = writeln!(out, "{:>12} {}", "", detail.bright_red());
        }
    }
}

/// Per-scenario lines followed by a summary.
///
/// Passing scenarios are listed only when `verbose` is set.
#[must_use]
pub fn format_report_human(report: &RunReport, verbose: bool) -> String {
    let mut out = String::new();
    for result in &report.results {
        if verbose || !result.passed() {
            format_result_line(&mut out, result, verbose);
        }
    }

    let stats = &report.stats;
    let summary = format!(
        "{} passed, {} failed, {} inconclusive ({} ms)",
        stats.passed, stats.failed, stats.inconclusive, stats.execution_time_ms
    );
    let _ = if report.is_success() {
        writeln!(out, "{} {}", "✅".bright_green(), summary.bright_white())
    } else {
        writeln!(out, "{} {}", "❌".bright_red(), summary.bright_red())
    };
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    #[serde(flatten)]
    report:  &'a RunReport,
}

/// JSON document with `success`, `results` and `stats`.
///
/// # Errors
///
/// Returns the serializer error, if any.
pub fn format_report_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        success: report.is_success(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use zalloc_probe::{Observation, Strategy, Verdict};

    use super::*;
    use crate::catalog::Catalog;
    use crate::runner::RunStats;
    use crate::scenario::ScenarioGroup;

    fn report() -> RunReport {
        RunReport {
            results: vec![
                ScenarioResult {
                    name:        "OK_vec_refill",
                    group:       ScenarioGroup::Insertion,
                    expected:    Verdict::DidNotAllocate,
                    strategy:    Strategy::SingleShot,
                    outcome:     Outcome::Passed,
                    observation: Some(Observation {
                        strategy:     Strategy::SingleShot,
                        verdict:      Verdict::DidNotAllocate,
                        bytes_delta:  0,
                        allocations:  0,
                        repetitions:  1,
                        warmup_bytes: 0,
                    }),
                    detail:      None,
                    duration_ms: 1,
                },
                ScenarioResult {
                    name:        "BAD_vec_tail",
                    group:       ScenarioGroup::Variadic,
                    expected:    Verdict::Allocated,
                    strategy:    Strategy::SingleShot,
                    outcome:     Outcome::Inconclusive,
                    observation: None,
                    detail:      Some("setup failed".to_owned()),
                    duration_ms: 0,
                },
            ],
            stats:   RunStats {
                passed:            1,
                failed:            0,
                inconclusive:      1,
                execution_time_ms: 1,
            },
        }
    }

    #[test]
    fn test_human_report_hides_passes_unless_verbose() {
        colored::control::set_override(false);
        let quiet = format_report_human(&report(), false);
        assert!(!quiet.contains("OK_vec_refill"));
        assert!(quiet.contains("INCONCLUSIVE"));
        assert!(quiet.contains("setup failed"));
        assert!(quiet.contains("1 passed, 0 failed, 1 inconclusive"));

        let verbose = format_report_human(&report(), true);
        assert!(verbose.contains("OK_vec_refill"));
    }

    #[test]
    fn test_json_report_shape() {
        let text = format_report_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["stats"]["inconclusive"], 1);
        assert_eq!(value["results"][0]["outcome"], "passed");
        assert_eq!(value["results"][0]["observation"]["verdict"], "did_not_allocate");
        assert_eq!(value["results"][1]["group"], "variadic");
    }

    #[test]
    fn test_listing_json_covers_catalog() {
        let catalog = Catalog::global().unwrap();
        let text = format_listing_json(catalog.iter()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), catalog.len());
        let listing = format_listing_human(catalog.iter());
        assert!(listing.contains("BAD_vec_tail"));
    }
}
