// ZALLOC - zalloc-error
// Module: Error Types
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error and category types shared by every zalloc crate.

use core::fmt;

use crate::codes;

/// `Error` categories for zalloc operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Measurement substrate errors; abort the run
    Measurement   = 1,
    /// Observed allocation behaviour differs from the declaration
    Verdict       = 2,
    /// Fixture construction errors
    Setup         = 3,
    /// Configuration errors
    Configuration = 4,
    /// Catalog construction and lookup errors
    Catalog       = 5,
}

/// Base trait for all error types
pub trait ErrorSource: fmt::Debug + Send + Sync {
    /// Get the error code
    fn code(&self) -> u16;

    /// Get the error message
    fn message(&self) -> &'static str;

    /// Get the error category
    fn category(&self) -> ErrorCategory;
}

/// zalloc `Error` type
///
/// Categorised errors with a numeric code and a static message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
}

impl Error {
    /// The counting allocator is not the process global allocator
    pub const MEASUREMENT_UNAVAILABLE: Self = Self::new(
        ErrorCategory::Measurement,
        codes::MEASUREMENT_UNAVAILABLE,
        "Allocation counters did not move; install CountingAllocator as #[global_allocator]",
    );
    /// At least one scenario mismatched or was inconclusive
    pub const RUN_FAILED: Self = Self::new(
        ErrorCategory::Verdict,
        codes::RUN_FAILED,
        "One or more scenarios did not pass",
    );
    /// Observed verdict differs from the expected one
    pub const VERDICT_MISMATCH: Self = Self::new(
        ErrorCategory::Verdict,
        codes::VERDICT_MISMATCH,
        "Observed allocation verdict differs from the expected verdict",
    );
    /// Warm-up exceeded its allocation budget
    pub const WARMUP_RUNAWAY: Self = Self::new(
        ErrorCategory::Measurement,
        codes::WARMUP_RUNAWAY,
        "Warm-up allocated beyond its budget; the fixture or operation is unbounded",
    );

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
        }
    }

    /// Whether this error must abort the whole run.
    ///
    /// Only a missing measurement substrate is fatal. Warm-up runaways are
    /// tied to a single scenario and are reported as inconclusive.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category, ErrorCategory::Measurement)
            && self.code == codes::MEASUREMENT_UNAVAILABLE
    }

    /// Check if this is a measurement error
    #[must_use]
    pub fn is_measurement_error(&self) -> bool {
        self.category == ErrorCategory::Measurement
    }

    /// Check if this is a verdict error
    #[must_use]
    pub fn is_verdict_error(&self) -> bool {
        self.category == ErrorCategory::Verdict
    }

    /// Check if this is a setup error
    #[must_use]
    pub fn is_setup_error(&self) -> bool {
        self.category == ErrorCategory::Setup
    }

    /// Check if this is a configuration error
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        self.category == ErrorCategory::Configuration
    }

    /// Check if this is a catalog error
    #[must_use]
    pub fn is_catalog_error(&self) -> bool {
        self.category == ErrorCategory::Catalog
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}][E{:04X}] {}",
            self.category, self.code, self.message
        )
    }
}

impl ErrorSource for Error {
    fn code(&self) -> u16 {
        self.code
    }

    fn message(&self) -> &'static str {
        self.message
    }

    fn category(&self) -> ErrorCategory {
        self.category
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category_and_code() {
        let error = Error::MEASUREMENT_UNAVAILABLE;
        let text = format!("{error}");
        assert!(text.starts_with("[Measurement][E03E8]"));
        assert!(text.contains("CountingAllocator"));
    }

    #[test]
    fn test_only_missing_substrate_is_fatal() {
        assert!(Error::MEASUREMENT_UNAVAILABLE.is_fatal());
        assert!(!Error::WARMUP_RUNAWAY.is_fatal());
        assert!(!Error::VERDICT_MISMATCH.is_fatal());
        assert!(Error::WARMUP_RUNAWAY.is_measurement_error());
    }

    #[test]
    fn test_category_predicates() {
        let error = Error::new(ErrorCategory::Catalog, codes::SCENARIO_NOT_FOUND, "missing");
        assert!(error.is_catalog_error());
        assert!(!error.is_setup_error());
        assert_eq!(ErrorSource::code(&error), codes::SCENARIO_NOT_FOUND);
        assert_eq!(ErrorSource::message(&error), "missing");
    }
}
