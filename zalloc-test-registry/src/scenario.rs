// ZALLOC - zalloc-test-registry
// Module: Scenario Definitions
// SW-REQ-ID: REQ_CATALOG_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Scenario definitions.
//!
//! A scenario pairs an operation with the verdict its author expects. The
//! fixture the operation works on is built by the scenario's `setup`
//! function, outside any measurement, and moved into a [`Workload`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use zalloc_error::{helpers, Result};
use zalloc_probe::{Strategy, Verdict};

/// Name prefix of scenarios expected not to allocate
pub const OK_PREFIX: &str = "OK_";

/// Name prefix of scenarios expected to allocate
pub const BAD_PREFIX: &str = "BAD_";

/// Idiom family a scenario belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioGroup {
    /// Refilling a container that already has room
    Insertion,
    /// Emptying a container and reusing it, or replacing it
    Clearing,
    /// Walking a container directly or through a trait object
    Iteration,
    /// Lookups with composite keys
    KeyedLookup,
    /// Hashing scalars and text
    Hashing,
    /// Copying ranges between containers
    RangeCopy,
    /// Union and intersection of sets
    SetAlgebra,
    /// Variable-length argument tails
    Variadic,
    /// Optional values
    Nullable,
    /// Closures and function values
    Delegates,
    /// In-place list reordering
    ListMethods,
    /// Ordered and node-based containers
    Ordered,
    /// First-use initialisation
    LazyInit,
}

impl ScenarioGroup {
    /// Every group, in catalog order
    pub const ALL: [Self; 13] = [
        Self::Insertion,
        Self::Clearing,
        Self::Iteration,
        Self::KeyedLookup,
        Self::Hashing,
        Self::RangeCopy,
        Self::SetAlgebra,
        Self::Variadic,
        Self::Nullable,
        Self::Delegates,
        Self::ListMethods,
        Self::Ordered,
        Self::LazyInit,
    ];

    /// Kebab-case name used on the command line and in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Clearing => "clearing",
            Self::Iteration => "iteration",
            Self::KeyedLookup => "keyed-lookup",
            Self::Hashing => "hashing",
            Self::RangeCopy => "range-copy",
            Self::SetAlgebra => "set-algebra",
            Self::Variadic => "variadic",
            Self::Nullable => "nullable",
            Self::Delegates => "delegates",
            Self::ListMethods => "list-methods",
            Self::Ordered => "ordered",
            Self::LazyInit => "lazy-init",
        }
    }
}

impl fmt::Display for ScenarioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioGroup {
    type Err = zalloc_error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or(helpers::config_invalid("Unknown scenario group"))
    }
}

/// What a closure-based operation captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosureKind {
    /// Captures nothing; a zero-sized value
    NonCapturing,
    /// Captures outer state by mutable reference
    CapturingMutableState,
    /// Boxed once at setup and reused on every call
    CachedReusable,
}

/// Shape of the measured operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// A direct call on the fixture
    #[default]
    Plain,
    /// The operation builds or invokes a closure
    Closure(ClosureKind),
}

/// Fixture plus the operation to measure.
pub struct Workload {
    op: Box<dyn FnMut()>,
}

impl Workload {
    /// Wrap `op`, which owns its fixture.
    pub fn new(op: impl FnMut() + 'static) -> Self {
        Self { op: Box::new(op) }
    }

    /// The operation in the form the probe accepts
    pub fn as_op(&mut self) -> &mut dyn FnMut() {
        &mut *self.op
    }

    /// Run the operation once, unmeasured.
    pub fn run(&mut self) {
        (self.op)();
    }
}

impl fmt::Debug for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workload").finish_non_exhaustive()
    }
}

/// Trait every catalog entry implements.
pub trait ScenarioCase: Send + Sync {
    /// Unique name, prefixed `OK_` or `BAD_`
    fn name(&self) -> &'static str;

    /// Idiom family
    fn group(&self) -> ScenarioGroup;

    /// Verdict the operation must produce
    fn expected(&self) -> Verdict;

    /// Strategy pinned by the scenario, if any
    fn strategy(&self) -> Option<Strategy> {
        None
    }

    /// Operation shape
    fn kind(&self) -> OperationKind {
        OperationKind::Plain
    }

    /// Description of the scenario
    fn description(&self) -> &'static str {
        "No description provided"
    }

    /// Build the fixture and operation.
    ///
    /// # Errors
    ///
    /// Returns a setup error when the fixture cannot be built.
    fn setup(&self) -> Result<Workload>;
}

/// Table-driven scenario.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Unique name
    pub name:        &'static str,
    /// Idiom family
    pub group:       ScenarioGroup,
    /// Expected verdict
    pub expected:    Verdict,
    /// Strategy pinned by the scenario
    pub strategy:    Option<Strategy>,
    /// Operation shape
    pub kind:        OperationKind,
    /// Description of the scenario
    pub description: &'static str,
    /// Fixture builder
    pub setup:       fn() -> Result<Workload>,
}

impl ScenarioCase for Scenario {
    fn name(&self) -> &'static str {
        self.name
    }

    fn group(&self) -> ScenarioGroup {
        self.group
    }

    fn expected(&self) -> Verdict {
        self.expected
    }

    fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    fn kind(&self) -> OperationKind {
        self.kind
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn setup(&self) -> Result<Workload> {
        (self.setup)()
    }
}

/// Serializable summary of a scenario, used for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioInfo {
    /// Unique name
    pub name:        &'static str,
    /// Idiom family
    pub group:       ScenarioGroup,
    /// Expected verdict
    pub expected:    Verdict,
    /// Strategy pinned by the scenario
    pub strategy:    Option<Strategy>,
    /// Operation shape
    pub kind:        OperationKind,
    /// Description of the scenario
    pub description: &'static str,
}

impl From<&dyn ScenarioCase> for ScenarioInfo {
    fn from(scenario: &dyn ScenarioCase) -> Self {
        Self {
            name:        scenario.name(),
            group:       scenario.group(),
            expected:    scenario.expected(),
            strategy:    scenario.strategy(),
            kind:        scenario.kind(),
            description: scenario.description(),
        }
    }
}

/// Declare a [`Scenario`].
///
/// ```rust
/// use zalloc_test_registry::{scenario, Workload};
///
/// let entry = scenario! {
///     name: "OK_noop",
///     group: Nullable,
///     expected: DidNotAllocate,
///     description: "Does nothing",
///     setup: || Ok(Workload::new(|| {})),
/// };
/// assert_eq!(entry.name, "OK_noop");
/// ```
#[macro_export]
macro_rules! scenario {
    (
        name: $name:literal,
        group: $group:ident,
        expected: $expected:ident,
        $(strategy: $strategy:ident,)?
        $(kind: $kind:expr,)?
        description: $description:literal,
        setup: $setup:expr $(,)?
    ) => {
        $crate::Scenario {
            name:        $name,
            group:       $crate::ScenarioGroup::$group,
            expected:    $crate::Verdict::$expected,
            strategy:    $crate::scenario!(@strategy $($strategy)?),
            kind:        $crate::scenario!(@kind $($kind)?),
            description: $description,
            setup:       $setup,
        }
    };
    (@strategy) => {
        None
    };
    (@strategy $strategy:ident) => {
        Some($crate::Strategy::$strategy)
    };
    (@kind) => {
        $crate::OperationKind::Plain
    };
    (@kind $kind:expr) => {
        $kind
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_names_round_trip() {
        for group in ScenarioGroup::ALL {
            assert_eq!(group.as_str().parse::<ScenarioGroup>(), Ok(group));
        }
        assert!("heap".parse::<ScenarioGroup>().is_err());
    }

    #[test]
    fn test_macro_fills_defaults() {
        let entry = crate::scenario! {
            name: "BAD_box",
            group: Nullable,
            expected: Allocated,
            strategy: Differential,
            description: "Boxes a value",
            setup: || Ok(Workload::new(|| drop(Box::new(1u8)))),
        };
        assert_eq!(entry.strategy, Some(Strategy::Differential));
        assert_eq!(entry.kind, OperationKind::Plain);
        assert!(entry.setup().is_ok());
    }
}
