// ZALLOC - zalloc-test-registry
// Module: List Method Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! In-place reordering of a `Vec`.
//!
//! The stable sort needs a scratch buffer once the input outgrows its
//! insertion-sort threshold and its stack scratch space; the unstable sort
//! never does.

use core::hint::black_box;

use zalloc_error::Result;

use crate::fixtures::{dummies, Dummy, LARGE, SMALL};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

fn reordering(count: usize, reorder: fn(&mut Vec<Dummy>)) -> Result<Workload> {
    let mut items = dummies(count);
    Ok(Workload::new(move || {
        reorder(&mut items);
        black_box(&items);
    }))
}

fn reverse() -> Result<Workload> {
    reordering(LARGE, |items| items.reverse())
}

fn rotate_left() -> Result<Workload> {
    reordering(LARGE, |items| items.rotate_left(LARGE / 3))
}

fn sort_unstable() -> Result<Workload> {
    reordering(LARGE, |items| {
        items.reverse();
        items.sort_unstable();
    })
}

fn stable_sort_small() -> Result<Workload> {
    reordering(SMALL, |items| {
        items.reverse();
        items.sort();
    })
}

fn stable_sort() -> Result<Workload> {
    reordering(LARGE, |items| {
        items.reverse();
        items.sort();
    })
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_vec_reverse",
            group: ListMethods,
            expected: DidNotAllocate,
            description: "reverse 1000 items in place",
            setup: reverse,
        },
        scenario! {
            name: "OK_vec_rotate_left",
            group: ListMethods,
            expected: DidNotAllocate,
            description: "rotate_left 1000 items in place",
            setup: rotate_left,
        },
        scenario! {
            name: "OK_vec_sort_unstable",
            group: ListMethods,
            expected: DidNotAllocate,
            description: "sort_unstable 1000 reversed items",
            setup: sort_unstable,
        },
        scenario! {
            name: "OK_vec_stable_sort_small",
            group: ListMethods,
            expected: DidNotAllocate,
            description: "Stable sort of 10 items stays within insertion sort",
            setup: stable_sort_small,
        },
        scenario! {
            name: "BAD_vec_stable_sort",
            group: ListMethods,
            expected: Allocated,
            description: "Stable sort of 1000 items allocates a scratch buffer",
            setup: stable_sort,
        },
    ]
}
