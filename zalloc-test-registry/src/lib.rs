// ZALLOC - zalloc-test-registry
// Module: Scenario Catalog and Runner
// SW-REQ-ID: REQ_CATALOG_001
// SW-REQ-ID: REQ_RUNNER_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)] // Rule 2

//! Scenario catalog and runner for steady-state allocation audits.
//!
//! Every scenario exercises one idiom over a standard collection or language
//! feature and declares whether it should allocate once warmed up. Names
//! carry the answer: `OK_` scenarios must not allocate, `BAD_` scenarios
//! must.
//!
//! ## Organization
//!
//! - [`fixtures`]: payload types and fixture builders
//! - [`containers`]: `Refill`/`Traverse` capability traits and the generic
//!   templates instantiated per container
//! - [`catalog`]: the standard catalog, one module per idiom group
//! - [`runner`]: sequential execution, outcomes and statistics
//! - [`config`]: TOML suite configuration
//! - [`reporting`]: human and JSON output
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zalloc_probe::{CountingAllocator, MeasurementContext, Probe};
//! use zalloc_test_registry::{Catalog, RunOptions, Runner, SuiteConfig};
//!
//! #[global_allocator]
//! static GLOBAL: CountingAllocator = CountingAllocator;
//!
//! let config = SuiteConfig::default();
//! let context = MeasurementContext::init()?;
//! let runner = Runner::new(Catalog::global()?, Probe::new(&context, config.probe)?);
//! let report = runner.run(&config.run_options())?;
//! assert!(report.is_success());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod containers;
pub mod fixtures;
pub mod reporting;
pub mod runner;
pub mod scenario;

pub use catalog::Catalog;
pub use config::SuiteConfig;
pub use runner::{Outcome, RunOptions, RunReport, RunStats, Runner, ScenarioOverride, ScenarioResult};
pub use scenario::{
    ClosureKind, OperationKind, Scenario, ScenarioCase, ScenarioGroup, ScenarioInfo, Workload,
};
pub use zalloc_error::{Error, Result};
pub use zalloc_probe::{Strategy, Verdict};
