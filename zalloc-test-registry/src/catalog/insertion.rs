// ZALLOC - zalloc-test-registry
// Module: Insertion Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Refilling array- and hash-backed containers that already have room.

use core::hint::black_box;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use zalloc_error::Result;

use crate::containers::refill_workload;
use crate::fixtures::{dummies, Dummy, LARGE};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

fn vec_shrink_refill() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut buffer: Vec<Dummy> = Vec::with_capacity(LARGE);
    Ok(Workload::new(move || {
        buffer.clear();
        buffer.shrink_to_fit();
        buffer.extend_from_slice(&items);
        black_box(&buffer);
    }))
}

fn vec_pop_push_refill() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut stack: Vec<Dummy> = items.clone();
    Ok(Workload::new(move || {
        while let Some(top) = stack.pop() {
            black_box(top);
        }
        for item in &items {
            stack.push(*item);
        }
        black_box(&stack);
    }))
}

fn hashmap_shrink_refill() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut map: HashMap<i32, Dummy> = HashMap::with_capacity(LARGE);
    Ok(Workload::new(move || {
        map.clear();
        map.shrink_to_fit();
        for item in &items {
            map.insert(item.id, *item);
        }
        black_box(&map);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_vec_refill",
            group: Insertion,
            expected: DidNotAllocate,
            description: "Clear a pre-sized Vec and push 1000 items",
            setup: refill_workload::<Vec<Dummy>>,
        },
        scenario! {
            name: "OK_vecdeque_refill",
            group: Insertion,
            expected: DidNotAllocate,
            description: "Clear a pre-sized VecDeque and push_back 1000 items",
            setup: refill_workload::<VecDeque<Dummy>>,
        },
        scenario! {
            name: "OK_vec_pop_push_refill",
            group: Insertion,
            expected: DidNotAllocate,
            description: "Pop a Vec used as a stack empty, then push 1000 items",
            setup: vec_pop_push_refill,
        },
        scenario! {
            name: "OK_hashmap_refill",
            group: Insertion,
            expected: DidNotAllocate,
            description: "Clear a HashMap (capacity kept) and insert 1000 entries",
            setup: refill_workload::<HashMap<i32, Dummy>>,
        },
        scenario! {
            name: "OK_hashset_refill",
            group: Insertion,
            expected: DidNotAllocate,
            description: "Clear a HashSet (capacity kept) and insert 1000 items",
            setup: refill_workload::<HashSet<Dummy>>,
        },
        scenario! {
            name: "OK_binaryheap_refill",
            group: Insertion,
            expected: DidNotAllocate,
            description: "Clear a pre-sized BinaryHeap and push 1000 items",
            setup: refill_workload::<BinaryHeap<Dummy>>,
        },
        scenario! {
            name: "BAD_vec_shrink_then_refill",
            group: Insertion,
            expected: Allocated,
            description: "shrink_to_fit after clear releases the buffer; the refill regrows it",
            setup: vec_shrink_refill,
        },
        scenario! {
            name: "BAD_hashmap_shrink_then_refill",
            group: Insertion,
            expected: Allocated,
            description: "shrink_to_fit after clear releases the table; inserts regrow it",
            setup: hashmap_shrink_refill,
        },
    ]
}
