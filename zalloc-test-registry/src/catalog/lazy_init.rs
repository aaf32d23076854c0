// ZALLOC - zalloc-test-registry
// Module: Lazy Initialisation Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! First-use initialisation.
//!
//! These fixtures allocate on their first call only. They pass after
//! warm-up and report a false `Allocated` without it.

use core::hint::black_box;

use once_cell::unsync::{Lazy, OnceCell};
use zalloc_error::Result;

use crate::scenario;
use crate::scenario::{Scenario, Workload};

const TABLE_LEN: i64 = 256;

fn squares() -> Vec<i64> {
    (0..TABLE_LEN).map(|i| i * i).collect()
}

fn lazy_table() -> Result<Workload> {
    let table: OnceCell<Vec<i64>> = OnceCell::new();
    let mut index = 0usize;
    Ok(Workload::new(move || {
        let squares = table.get_or_init(squares);
        index = (index + 17) % squares.len();
        black_box(squares[index]);
    }))
}

fn lazy_label() -> Result<Workload> {
    let label: Lazy<String> = Lazy::new(|| format!("table of {TABLE_LEN} squares"));
    Ok(Workload::new(move || {
        black_box(label.len());
    }))
}

fn eager_table() -> Result<Workload> {
    let mut index = 0usize;
    Ok(Workload::new(move || {
        let squares = squares();
        index = (index + 17) % squares.len();
        black_box(squares[index]);
        black_box(&squares);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_lazy_table_lookup",
            group: LazyInit,
            expected: DidNotAllocate,
            strategy: Differential,
            description: "Read a OnceCell table built on first use",
            setup: lazy_table,
        },
        scenario! {
            name: "OK_lazy_label",
            group: LazyInit,
            expected: DidNotAllocate,
            description: "Read a Lazy<String> formatted on first use",
            setup: lazy_label,
        },
        scenario! {
            name: "BAD_eager_table_rebuild",
            group: LazyInit,
            expected: Allocated,
            description: "Rebuild the table on every call instead of caching it",
            setup: eager_table,
        },
    ]
}
