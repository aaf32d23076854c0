// ZALLOC - zalloc-probe
// Module: Tracing Spans
// SW-REQ-ID: REQ_PROBE_004
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Span helpers for probe and scenario execution.
//!
//! Spans are created and entered before warm-up starts, so the subscriber's
//! bookkeeping never lands inside a measured region.

use tracing::{debug_span, info_span, trace_span, Span};

use crate::verdict::Strategy;

/// Spans for probe execution
#[derive(Debug, Clone)]
pub struct ProbeTrace;

impl ProbeTrace {
    /// Span covering one probe invocation
    #[inline]
    pub fn measuring(strategy: Strategy, repetitions: u32) -> Span {
        debug_span!("probe_measure", strategy = %strategy, repetitions = repetitions)
    }

    /// Span covering warm-up
    #[inline]
    pub fn warming_up(rounds: u32) -> Span {
        trace_span!("probe_warmup", rounds = rounds)
    }
}

/// Spans for scenario execution
#[derive(Debug, Clone)]
pub struct ScenarioTrace;

impl ScenarioTrace {
    /// Span covering one scenario, setup included
    #[inline]
    pub fn running(name: &str, group: &str) -> Span {
        info_span!("scenario", name = %name, group = %group)
    }

    /// Span covering fixture construction
    #[inline]
    pub fn setting_up(name: &str) -> Span {
        debug_span!("scenario_setup", name = %name)
    }
}
