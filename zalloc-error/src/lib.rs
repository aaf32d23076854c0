// ZALLOC - zalloc-error
// Module: Error Handling
// SW-REQ-ID: REQ_ERROR_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! zalloc error handling library
//!
//! Every failure the allocation probe, the scenario catalog and the runner
//! can raise is an [`Error`]: a category, a numeric code and a static
//! message. Errors are `Copy` so they can be carried through outcomes and
//! reports without allocating.
//!
//! # Error Categories
//!
//! ## Measurement Errors (1000-1999)
//! - Measurement substrate unavailable (counting allocator not installed)
//! - Warm-up allocating beyond its budget
//!
//! ## Verdict Errors (2000-2999)
//! - Observed allocation behaviour differs from the declared expectation
//!
//! ## Setup Errors (3000-3999)
//! - Fixture construction failed or panicked
//!
//! ## Configuration Errors (4000-4999)
//! - Invalid probe settings, unreadable or malformed config files
//!
//! ## Catalog Errors (5000-5999)
//! - Duplicate scenario names, naming convention violations, unknown names
//!
//! # Usage
//!
//! ```
//! use zalloc_error::{codes, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Measurement,
//!     codes::MEASUREMENT_UNAVAILABLE,
//!     "Counting allocator is not installed",
//! );
//! assert!(error.is_fatal());
//!
//! let setup = zalloc_error::helpers::setup_failure("fixture panicked");
//! assert!(!setup.is_fatal());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Error codes for zalloc
pub mod codes;
/// Error and error category types
pub mod errors;
pub mod helpers;

pub use errors::{Error, ErrorCategory, ErrorSource};

/// A specialized `Result` type for zalloc operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error conversion trait for converting to specific error categories
pub trait ToErrorCategory {
    /// Convert the error to a specific category
    fn to_category(&self) -> ErrorCategory;
}

impl ToErrorCategory for Error {
    fn to_category(&self) -> ErrorCategory {
        self.category
    }
}
