// ZALLOC - zalloc-test-registry
// Module: Scenario Catalog
// SW-REQ-ID: REQ_CATALOG_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The scenario catalog.
//!
//! Entries are grouped by idiom, one module per group. Construction checks
//! that names are unique and that every name's `OK_`/`BAD_` prefix agrees
//! with its expected verdict; afterwards the catalog is read-only.

use std::collections::HashSet;

use once_cell::sync::OnceCell;
use zalloc_error::{helpers, Result};
use zalloc_probe::Verdict;

use crate::scenario::{Scenario, ScenarioCase, ScenarioGroup, BAD_PREFIX, OK_PREFIX};

pub mod clearing;
pub mod delegates;
pub mod hashing;
pub mod insertion;
pub mod iteration;
pub mod keyed_lookup;
pub mod lazy_init;
pub mod list_methods;
pub mod nullable;
pub mod ordered;
pub mod range_copy;
pub mod set_algebra;
pub mod variadic;

/// Validated, read-only collection of scenarios.
pub struct Catalog {
    scenarios: Vec<Box<dyn ScenarioCase>>,
}

impl core::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.scenarios.iter().map(|s| s.name())).finish()
    }
}

impl Catalog {
    /// Build a catalog from arbitrary entries.
    ///
    /// # Errors
    ///
    /// Returns a catalog error on a duplicate name or a name whose prefix
    /// contradicts its expected verdict.
    pub fn new(scenarios: Vec<Box<dyn ScenarioCase>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(scenarios.len());
        for scenario in &scenarios {
            let name = scenario.name();
            if !seen.insert(name) {
                tracing::error!(name, "duplicate scenario name");
                return Err(helpers::catalog_duplicate_name("Scenario name registered twice"));
            }
            check_prefix(name, scenario.expected())?;
        }
        Ok(Self { scenarios })
    }

    /// Build a catalog from table-driven entries.
    ///
    /// # Errors
    ///
    /// See [`Catalog::new`].
    pub fn from_scenarios(scenarios: impl IntoIterator<Item = Scenario>) -> Result<Self> {
        Self::new(
            scenarios
                .into_iter()
                .map(|scenario| Box::new(scenario) as Box<dyn ScenarioCase>)
                .collect(),
        )
    }

    /// The standard catalog, every group in order.
    ///
    /// # Errors
    ///
    /// See [`Catalog::new`].
    pub fn standard() -> Result<Self> {
        let groups: [fn() -> Vec<Scenario>; 13] = [
            insertion::scenarios,
            clearing::scenarios,
            iteration::scenarios,
            keyed_lookup::scenarios,
            hashing::scenarios,
            range_copy::scenarios,
            set_algebra::scenarios,
            variadic::scenarios,
            nullable::scenarios,
            delegates::scenarios,
            list_methods::scenarios,
            ordered::scenarios,
            lazy_init::scenarios,
        ];
        Self::from_scenarios(groups.into_iter().flat_map(|group| group()))
    }

    /// Process-wide standard catalog, built on first use.
    ///
    /// # Errors
    ///
    /// See [`Catalog::new`].
    pub fn global() -> Result<&'static Self> {
        static CATALOG: OnceCell<Catalog> = OnceCell::new();
        CATALOG.get_or_try_init(Self::standard)
    }

    /// Number of scenarios
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// All scenarios in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &dyn ScenarioCase> + '_ {
        self.scenarios.iter().map(|scenario| scenario.as_ref())
    }

    /// Scenarios whose name contains `name_filter` and whose group equals
    /// `group_filter`; `None` matches everything.
    pub fn select<'a>(
        &'a self,
        name_filter: Option<&'a str>,
        group_filter: Option<ScenarioGroup>,
    ) -> impl Iterator<Item = &'a dyn ScenarioCase> + 'a {
        self.iter().filter(move |scenario| {
            name_filter.is_none_or(|name| scenario.name().contains(name))
                && group_filter.is_none_or(|group| scenario.group() == group)
        })
    }

    /// Scenario with exactly this name.
    ///
    /// # Errors
    ///
    /// Returns a catalog error if no scenario has that name.
    pub fn find(&self, name: &str) -> Result<&dyn ScenarioCase> {
        self.iter()
            .find(|scenario| scenario.name() == name)
            .ok_or(helpers::scenario_not_found("No scenario with that name"))
    }

    /// Whether a scenario with this name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|scenario| scenario.name() == name)
    }
}

fn check_prefix(name: &str, expected: Verdict) -> Result<()> {
    let consistent = match expected {
        Verdict::DidNotAllocate => name.starts_with(OK_PREFIX),
        Verdict::Allocated => name.starts_with(BAD_PREFIX),
    };
    if consistent {
        Ok(())
    } else {
        tracing::error!(name, expected = %expected, "scenario name prefix contradicts its verdict");
        Err(helpers::catalog_name_convention(
            "Scenario names must start with OK_ (did not allocate) or BAD_ (allocated)",
        ))
    }
}

#[cfg(test)]
mod tests {
    use zalloc_error::codes;

    use super::*;
    use crate::scenario::Workload;

    fn noop() -> Result<Workload> {
        Ok(Workload::new(|| {}))
    }

    fn entry(name: &'static str, expected: Verdict) -> Scenario {
        Scenario {
            name,
            group: ScenarioGroup::Nullable,
            expected,
            strategy: None,
            kind: crate::OperationKind::Plain,
            description: "test entry",
            setup: noop,
        }
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = Catalog::standard().unwrap();
        assert!(catalog.len() >= 60);
        for group in ScenarioGroup::ALL {
            assert!(
                catalog.select(None, Some(group)).next().is_some(),
                "group {group} is empty"
            );
        }
    }

    #[test]
    fn test_every_group_mixes_verdicts() {
        let catalog = Catalog::standard().unwrap();
        for group in ScenarioGroup::ALL {
            let verdicts: HashSet<_> =
                catalog.select(None, Some(group)).map(|s| s.expected()).collect();
            assert_eq!(verdicts.len(), 2, "group {group} is one-sided");
        }
    }

    #[test]
    fn test_global_is_shared() {
        let first = Catalog::global().unwrap();
        let second = Catalog::global().unwrap();
        assert!(core::ptr::eq(first, second));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let error = Catalog::from_scenarios([
            entry("OK_twice", Verdict::DidNotAllocate),
            entry("OK_twice", Verdict::DidNotAllocate),
        ])
        .unwrap_err();
        assert_eq!(error.code, codes::CATALOG_DUPLICATE_NAME);
    }

    #[test]
    fn test_contradicting_prefix_rejected() {
        let error = Catalog::from_scenarios([entry("OK_boxes", Verdict::Allocated)]).unwrap_err();
        assert_eq!(error.code, codes::CATALOG_NAME_CONVENTION);
        let error = Catalog::from_scenarios([entry("boxes", Verdict::Allocated)]).unwrap_err();
        assert_eq!(error.code, codes::CATALOG_NAME_CONVENTION);
    }

    #[test]
    fn test_select_and_find() {
        let catalog = Catalog::standard().unwrap();
        assert!(catalog.select(Some("hashmap"), None).all(|s| s.name().contains("hashmap")));
        let iteration_bad = catalog
            .select(Some("BAD_"), Some(ScenarioGroup::Iteration))
            .count();
        assert_eq!(iteration_bad, 4);
        assert_eq!(catalog.find("BAD_vec_tail").unwrap().group(), ScenarioGroup::Variadic);
        let Err(error) = catalog.find("OK_missing") else {
            panic!("found a scenario that is not in the catalog");
        };
        assert_eq!(error.code, codes::SCENARIO_NOT_FOUND);
    }
}
