// ZALLOC - zalloc-test-registry
// Module: Iteration Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Walking containers with concrete iterators versus boxed trait objects.

use core::hint::black_box;
use std::collections::{HashMap, HashSet, VecDeque};

use zalloc_error::Result;

use crate::containers::{sum_values, traverse_dyn_workload, traverse_workload};
use crate::fixtures::{dummies, Dummy, SortedDummies, SMALL};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

fn generic_into_iterator() -> Result<Workload> {
    let items = dummies(SMALL);
    let map: HashMap<i32, Dummy> = items.iter().map(|d| (d.id, *d)).collect();
    Ok(Workload::new(move || {
        black_box(sum_values(&items));
        black_box(sum_values(map.values()));
    }))
}

fn for_loop_by_reference() -> Result<Workload> {
    let map: HashMap<i32, Dummy> = dummies(SMALL).into_iter().map(|d| (d.id, d)).collect();
    Ok(Workload::new(move || {
        let mut total = 0i64;
        for (id, item) in &map {
            total += i64::from(*id) + item.value;
        }
        black_box(total);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_vec_iteration",
            group: Iteration,
            expected: DidNotAllocate,
            description: "Iterate a Vec through its slice iterator",
            setup: traverse_workload::<Vec<Dummy>>,
        },
        scenario! {
            name: "OK_vecdeque_iteration",
            group: Iteration,
            expected: DidNotAllocate,
            description: "Iterate a VecDeque through its concrete iterator",
            setup: traverse_workload::<VecDeque<Dummy>>,
        },
        scenario! {
            name: "OK_hashmap_iteration",
            group: Iteration,
            expected: DidNotAllocate,
            description: "Iterate HashMap values through the concrete Values iterator",
            setup: traverse_workload::<HashMap<i32, Dummy>>,
        },
        scenario! {
            name: "OK_hashset_iteration",
            group: Iteration,
            expected: DidNotAllocate,
            description: "Iterate a HashSet through its concrete iterator",
            setup: traverse_workload::<HashSet<Dummy>>,
        },
        scenario! {
            name: "OK_sorted_vec_iteration",
            group: Iteration,
            expected: DidNotAllocate,
            description: "Iterate a SortedVec through the slice iterator",
            setup: traverse_workload::<SortedDummies>,
        },
        scenario! {
            name: "OK_generic_into_iterator",
            group: Iteration,
            expected: DidNotAllocate,
            description: "Pass containers to an impl IntoIterator parameter",
            setup: generic_into_iterator,
        },
        scenario! {
            name: "OK_for_loop_by_reference",
            group: Iteration,
            expected: DidNotAllocate,
            description: "for loop over &HashMap",
            setup: for_loop_by_reference,
        },
        scenario! {
            name: "BAD_vec_dyn_iteration",
            group: Iteration,
            expected: Allocated,
            description: "Iterate a Vec through Box<dyn Iterator>",
            setup: traverse_dyn_workload::<Vec<Dummy>>,
        },
        scenario! {
            name: "BAD_vecdeque_dyn_iteration",
            group: Iteration,
            expected: Allocated,
            description: "Iterate a VecDeque through Box<dyn Iterator>",
            setup: traverse_dyn_workload::<VecDeque<Dummy>>,
        },
        scenario! {
            name: "BAD_hashmap_dyn_iteration",
            group: Iteration,
            expected: Allocated,
            description: "Iterate HashMap values through Box<dyn Iterator>",
            setup: traverse_dyn_workload::<HashMap<i32, Dummy>>,
        },
        scenario! {
            name: "BAD_hashset_dyn_iteration",
            group: Iteration,
            expected: Allocated,
            description: "Iterate a HashSet through Box<dyn Iterator>",
            setup: traverse_dyn_workload::<HashSet<Dummy>>,
        },
    ]
}
