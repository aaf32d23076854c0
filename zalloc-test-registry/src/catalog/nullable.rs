// ZALLOC - zalloc-test-registry
// Module: Nullable Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Optional values inline versus boxed.

use core::hint::black_box;

use zalloc_error::Result;

use crate::fixtures::{dummies, Dummy, SMALL};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

fn sparse_values() -> Vec<Option<i32>> {
    (0..SMALL as i32).map(|i| (i % 3 != 0).then_some(i)).collect()
}

fn unwrap_or_default() -> Result<Workload> {
    let values = sparse_values();
    Ok(Workload::new(move || {
        let total: i64 = values.iter().map(|v| i64::from(v.unwrap_or_default())).sum();
        black_box(total);
    }))
}

fn map_and_take() -> Result<Workload> {
    let mut slots: Vec<Option<Dummy>> = dummies(SMALL).into_iter().map(Some).collect();
    Ok(Workload::new(move || {
        for slot in &mut slots {
            let taken = slot.take().map(|d| Dummy {
                value: d.value + 1,
                ..d
            });
            *slot = taken;
        }
        black_box(&slots);
    }))
}

fn boxed_option() -> Result<Workload> {
    let values: Vec<i32> = (0..SMALL as i32).collect();
    Ok(Workload::new(move || {
        let mut total = 0i64;
        for value in &values {
            let boxed: Option<Box<i32>> = black_box(Some(Box::new(*value)));
            total += boxed.map_or(0, |v| i64::from(*v));
        }
        black_box(total);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_option_unwrap_or_default",
            group: Nullable,
            expected: DidNotAllocate,
            description: "Sum Option<i32> values with unwrap_or_default",
            setup: unwrap_or_default,
        },
        scenario! {
            name: "OK_option_map_and_take",
            group: Nullable,
            expected: DidNotAllocate,
            description: "take, map and store back Option<Dummy> slots",
            setup: map_and_take,
        },
        scenario! {
            name: "BAD_option_boxed",
            group: Nullable,
            expected: Allocated,
            description: "Wrap each value in Option<Box<i32>>",
            setup: boxed_option,
        },
    ]
}
