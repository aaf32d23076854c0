// ZALLOC - zalloc-error
// Module: Error Helpers
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error helper functions for common error patterns.
//!
//! Measurement and verdict errors carry no caller-specific message and are
//! raised through the associated constants on [`Error`] instead.

use crate::{codes, Error, ErrorCategory};

/// Create a setup failure error
#[must_use]
pub const fn setup_failure(message: &'static str) -> Error {
    Error::new(ErrorCategory::Setup, codes::SETUP_FAILURE, message)
}

/// Create a setup panicked error
#[must_use]
pub const fn setup_panicked(message: &'static str) -> Error {
    Error::new(ErrorCategory::Setup, codes::SETUP_PANICKED, message)
}

/// Create an invalid configuration error
#[must_use]
pub const fn config_invalid(message: &'static str) -> Error {
    Error::new(ErrorCategory::Configuration, codes::CONFIG_INVALID, message)
}

/// Create a configuration parse error
#[must_use]
pub const fn config_parse(message: &'static str) -> Error {
    Error::new(ErrorCategory::Configuration, codes::CONFIG_PARSE, message)
}

/// Create a configuration I/O error
#[must_use]
pub const fn config_io(message: &'static str) -> Error {
    Error::new(ErrorCategory::Configuration, codes::CONFIG_IO, message)
}

/// Create a duplicate scenario name error
#[must_use]
pub const fn catalog_duplicate_name(message: &'static str) -> Error {
    Error::new(ErrorCategory::Catalog, codes::CATALOG_DUPLICATE_NAME, message)
}

/// Create a naming convention violation error
#[must_use]
pub const fn catalog_name_convention(message: &'static str) -> Error {
    Error::new(ErrorCategory::Catalog, codes::CATALOG_NAME_CONVENTION, message)
}

/// Create a scenario not found error
#[must_use]
pub const fn scenario_not_found(message: &'static str) -> Error {
    Error::new(ErrorCategory::Catalog, codes::SCENARIO_NOT_FOUND, message)
}
