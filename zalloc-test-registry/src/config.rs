// ZALLOC - zalloc-test-registry
// Module: Suite Configuration
// SW-REQ-ID: REQ_RUNNER_002
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Suite configuration file support.
//!
//! A TOML file with a `[probe]` table for the probe calibration and one
//! `[scenarios.NAME]` table per scenario that needs its own strategy or
//! repetition count:
//!
//! ```toml
//! [probe]
//! default_strategy = "single-shot"
//! repetitions = 1000
//! collect_after = false
//! warmup_rounds = 1
//! warmup_budget_bytes = 67108864
//!
//! [scenarios.OK_vec_refill]
//! strategy = "differential"
//! repetitions = 200
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zalloc_error::{helpers, Result};
use zalloc_probe::{ProbeConfig, Strategy};

use crate::catalog::Catalog;
use crate::runner::{RunOptions, ScenarioOverride};

/// Main suite configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Probe calibration
    pub probe:     ProbeConfig,
    /// Per-scenario adjustments keyed by scenario name
    pub scenarios: BTreeMap<String, ScenarioOverride>,
}

impl SuiteConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is not valid TOML for this
    /// structure or fails [`SuiteConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|error| {
            tracing::error!(%error, "failed to parse suite configuration");
            helpers::config_parse("Failed to parse suite configuration TOML")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|error| {
            tracing::error!(%error, path = %path.display(), "failed to read suite configuration");
            helpers::config_io("Failed to read suite configuration file")
        })?;
        tracing::debug!(path = %path.display(), "loaded suite configuration");
        Self::from_toml_str(&content)
    }

    /// Load configuration from a file, falling back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|error| {
            tracing::error!(%error, "failed to serialize suite configuration");
            helpers::config_parse("Failed to serialize suite configuration")
        })
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if serialization or the write fails.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        fs::write(path.as_ref(), content).map_err(|error| {
            tracing::error!(%error, "failed to write suite configuration");
            helpers::config_io("Failed to write suite configuration file")
        })
    }

    /// Check the probe table and every override.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid probe table or a zero
    /// repetition override.
    pub fn validate(&self) -> Result<()> {
        self.probe.validate()?;
        for (name, adjustment) in &self.scenarios {
            if adjustment.repetitions == Some(0) {
                tracing::error!(scenario = %name, "repetitions override is zero");
                return Err(helpers::config_invalid("Scenario repetitions must be at least 1"));
            }
        }
        Ok(())
    }

    /// Check that every override names a scenario in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a catalog error naming no scenario.
    pub fn check_against(&self, catalog: &Catalog) -> Result<()> {
        for name in self.scenarios.keys() {
            if !catalog.contains(name) {
                tracing::error!(scenario = %name, "override for unknown scenario");
                return Err(helpers::scenario_not_found(
                    "Configuration overrides a scenario that is not in the catalog",
                ));
            }
        }
        Ok(())
    }

    /// Run options carrying this file's per-scenario overrides
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            overrides: self.scenarios.clone(),
            ..RunOptions::default()
        }
    }

    /// A configuration showing every knob
    #[must_use]
    pub fn example_config() -> Self {
        let mut scenarios = BTreeMap::new();
        scenarios.insert(
            "OK_vec_refill".to_owned(),
            ScenarioOverride {
                strategy:    Some(Strategy::Differential),
                repetitions: Some(200),
            },
        );
        scenarios.insert(
            "BAD_btreemap_refill".to_owned(),
            ScenarioOverride {
                strategy:    None,
                repetitions: Some(10),
            },
        );
        Self {
            probe: ProbeConfig::default(),
            scenarios,
        }
    }
}
