// ZALLOC - zalloc-error
// Module: Error Codes
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for zalloc

// Measurement error codes (1000-1999)
/// The measurement substrate (counting allocator) is not installed
pub const MEASUREMENT_UNAVAILABLE: u16 = 1000;
/// Warm-up allocated more than the configured budget
pub const WARMUP_RUNAWAY: u16 = 1001;

// Verdict error codes (2000-2999)
/// Observed verdict differs from the expected verdict
pub const VERDICT_MISMATCH: u16 = 2000;
/// At least one scenario in a run did not pass
pub const RUN_FAILED: u16 = 2001;

// Setup error codes (3000-3999)
/// Fixture construction returned an error
pub const SETUP_FAILURE: u16 = 3000;
/// Fixture construction panicked
pub const SETUP_PANICKED: u16 = 3001;

// Configuration error codes (4000-4999)
/// A probe or suite setting is out of range
pub const CONFIG_INVALID: u16 = 4000;
/// A configuration file could not be parsed
pub const CONFIG_PARSE: u16 = 4001;
/// A configuration file could not be read
pub const CONFIG_IO: u16 = 4002;

// Catalog error codes (5000-5999)
/// Two scenarios share a name
pub const CATALOG_DUPLICATE_NAME: u16 = 5000;
/// A scenario name prefix contradicts its expected verdict
pub const CATALOG_NAME_CONVENTION: u16 = 5001;
/// No scenario with the requested name exists
pub const SCENARIO_NOT_FOUND: u16 = 5002;
