// ZALLOC - zalloc-test-registry
// Module: Set Algebra Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Union and intersection into fresh sets versus a reused one.

use core::hint::black_box;
use std::collections::{BTreeSet, HashSet};

use zalloc_error::Result;

use crate::scenario;
use crate::scenario::{Scenario, Workload};

const SPAN: i32 = 100;

fn operands() -> (HashSet<i32>, HashSet<i32>) {
    ((0..SPAN).collect(), (SPAN / 2..SPAN + SPAN / 2).collect())
}

fn union_collect() -> Result<Workload> {
    let (left, right) = operands();
    Ok(Workload::new(move || {
        let union: HashSet<i32> = left.union(&right).copied().collect();
        black_box(&union);
    }))
}

fn intersection_collect() -> Result<Workload> {
    let (left, right) = operands();
    Ok(Workload::new(move || {
        let common: HashSet<i32> = left.intersection(&right).copied().collect();
        black_box(&common);
    }))
}

fn btreeset_bitor() -> Result<Workload> {
    let left: BTreeSet<i32> = (0..SPAN).collect();
    let right: BTreeSet<i32> = (SPAN / 2..SPAN + SPAN / 2).collect();
    Ok(Workload::new(move || {
        let union = &left | &right;
        black_box(&union);
    }))
}

fn extend_union() -> Result<Workload> {
    let (left, right) = operands();
    let mut target: HashSet<i32> = HashSet::with_capacity(4 * SPAN as usize);
    Ok(Workload::new(move || {
        target.clear();
        target.extend(left.iter().copied());
        target.extend(right.iter().copied());
        black_box(target.len());
    }))
}

fn retain_intersection() -> Result<Workload> {
    let (left, right) = operands();
    let mut target: HashSet<i32> = HashSet::with_capacity(4 * SPAN as usize);
    Ok(Workload::new(move || {
        target.clear();
        target.extend(left.iter().copied());
        target.retain(|value| right.contains(value));
        black_box(target.len());
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "BAD_hashset_union_collect",
            group: SetAlgebra,
            expected: Allocated,
            description: "Collect a union into a new HashSet",
            setup: union_collect,
        },
        scenario! {
            name: "BAD_hashset_intersection_collect",
            group: SetAlgebra,
            expected: Allocated,
            description: "Collect an intersection into a new HashSet",
            setup: intersection_collect,
        },
        scenario! {
            name: "BAD_btreeset_bitor",
            group: SetAlgebra,
            expected: Allocated,
            description: "&a | &b on BTreeSets builds a new set",
            setup: btreeset_bitor,
        },
        scenario! {
            name: "OK_hashset_extend_union",
            group: SetAlgebra,
            expected: DidNotAllocate,
            description: "Union into a cleared, pre-sized HashSet with extend",
            setup: extend_union,
        },
        scenario! {
            name: "OK_hashset_retain_intersection",
            group: SetAlgebra,
            expected: DidNotAllocate,
            description: "Intersection in place: fill a pre-sized HashSet, then retain",
            setup: retain_intersection,
        },
    ]
}
