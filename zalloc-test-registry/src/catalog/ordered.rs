// ZALLOC - zalloc-test-registry
// Module: Ordered Container Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Ordered and node-based containers.
//!
//! Node-based containers free their nodes on `clear` and allocate fresh
//! ones on every insert, so no amount of warm-up makes them clean. A
//! sorted array keeps its buffer and stays clean.

use core::hint::black_box;
use std::collections::{BTreeMap, BTreeSet, HashMap, LinkedList};

use zalloc_error::Result;

use crate::containers::{refill_workload, Traverse};
use crate::fixtures::{dummies, Dummy, SortedDummies, SMALL};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

fn sorted_vec_ids() -> Result<Workload> {
    let sorted = SortedDummies::from_items(&dummies(SMALL));
    Ok(Workload::new(move || {
        black_box(sorted.iter().map(|item| i64::from(item.id)).sum::<i64>());
    }))
}

fn hashmap_sorted_keys() -> Result<Workload> {
    let map: HashMap<i32, Dummy> = dummies(SMALL).into_iter().map(|d| (d.id, d)).collect();
    Ok(Workload::new(move || {
        let mut keys: Vec<i32> = map.keys().copied().collect();
        keys.sort_unstable();
        black_box(keys.iter().map(|k| map[k].value).sum::<i64>());
        black_box(&keys);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_sorted_vec_refill",
            group: Ordered,
            expected: DidNotAllocate,
            description: "Refill a pre-sized SortedVec in id order",
            setup: refill_workload::<SortedDummies>,
        },
        scenario! {
            name: "OK_sorted_vec_id_iteration",
            group: Ordered,
            expected: DidNotAllocate,
            description: "Walk the ids of a SortedVec in order",
            setup: sorted_vec_ids,
        },
        scenario! {
            name: "BAD_btreemap_refill",
            group: Ordered,
            expected: Allocated,
            description: "Clear a BTreeMap and insert 1000 entries; nodes are reallocated",
            setup: refill_workload::<BTreeMap<i32, Dummy>>,
        },
        scenario! {
            name: "BAD_btreeset_refill",
            group: Ordered,
            expected: Allocated,
            description: "Clear a BTreeSet and insert 1000 items; nodes are reallocated",
            setup: refill_workload::<BTreeSet<Dummy>>,
        },
        scenario! {
            name: "BAD_linkedlist_refill",
            group: Ordered,
            expected: Allocated,
            description: "Clear a LinkedList and push_back 1000 items; one node each",
            setup: refill_workload::<LinkedList<Dummy>>,
        },
        scenario! {
            name: "BAD_hashmap_sorted_key_iteration",
            group: Ordered,
            expected: Allocated,
            description: "Collect and sort HashMap keys to walk it in key order",
            setup: hashmap_sorted_keys,
        },
    ]
}
