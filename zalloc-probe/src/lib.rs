// ZALLOC - zalloc-probe
// Module: Allocation Probe
// SW-REQ-ID: REQ_PROBE_001
// SW-REQ-ID: REQ_PROBE_002
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Allocation probe for steady-state allocation audits.
//!
//! The probe answers one question: *did running this operation allocate
//! heap memory, once one-time costs are out of the way?*
//!
//! ## Pieces
//!
//! - [`CountingAllocator`]: a thin wrapper around [`std::alloc::System`] that
//!   keeps per-thread byte and call counters. Install it as the process
//!   global allocator in the binary or test crate that measures.
//! - [`MeasurementSubstrate`]: the two capabilities a probe needs (heap size
//!   sampling with a blocking `collect`, and a precise per-call check).
//! - [`MeasurementContext`]: the substrate backed by the counting allocator,
//!   scoped to the thread that created it.
//! - [`Probe`]: runs the mandatory warm-up, then one of the two strategies
//!   ([`Strategy::Differential`] or [`Strategy::SingleShot`]).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zalloc_probe::{CountingAllocator, MeasurementContext, Probe, ProbeConfig, Verdict};
//!
//! #[global_allocator]
//! static GLOBAL: CountingAllocator = CountingAllocator;
//!
//! let context = MeasurementContext::init()?;
//! let probe = Probe::new(&context, ProbeConfig::default())?;
//!
//! let mut buffer: Vec<u32> = Vec::with_capacity(16);
//! let observation = probe.measure(&mut || {
//!     buffer.clear();
//!     buffer.extend_from_slice(&[1, 2, 3]);
//! })?;
//! assert_eq!(observation.verdict, Verdict::DidNotAllocate);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod config;
pub mod probe;
pub mod spans;
pub mod substrate;
pub mod verdict;

pub use allocator::{AllocationCounters, CountingAllocator};
pub use config::ProbeConfig;
pub use probe::Probe;
pub use substrate::{AllocationCheck, MeasurementContext, MeasurementSubstrate};
pub use verdict::{Observation, Strategy, Verdict};
pub use zalloc_error::{Error, Result};
