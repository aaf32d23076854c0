// ZALLOC - zalloc-test-registry
// Module: Clearing Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Emptying a container in place versus replacing it.

use core::hint::black_box;
use core::mem;
use std::collections::HashMap;

use zalloc_error::Result;

use crate::fixtures::{dummies, Dummy, LARGE};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

const GREETING: &str = "hello world, steady state";

fn vec_truncate_reuse() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut buffer: Vec<Dummy> = Vec::with_capacity(LARGE);
    Ok(Workload::new(move || {
        buffer.truncate(0);
        buffer.extend_from_slice(&items);
        black_box(buffer.len());
    }))
}

fn vec_retain_reuse() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut buffer = items.clone();
    let half = LARGE as i32 / 2;
    Ok(Workload::new(move || {
        buffer.retain(|d| d.id < half);
        buffer.extend_from_slice(&items[half as usize..]);
        black_box(buffer.len());
    }))
}

fn string_clear_reuse() -> Result<Workload> {
    let mut text = String::with_capacity(GREETING.len());
    Ok(Workload::new(move || {
        text.clear();
        text.push_str(GREETING);
        black_box(text.len());
    }))
}

fn vec_replace_with_new() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut buffer: Vec<Dummy> = Vec::new();
    Ok(Workload::new(move || {
        drop(mem::take(&mut buffer));
        buffer.extend_from_slice(&items);
        black_box(&buffer);
    }))
}

fn hashmap_replace_with_new() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut map: HashMap<i32, Dummy> = HashMap::new();
    Ok(Workload::new(move || {
        drop(mem::take(&mut map));
        for item in &items {
            map.insert(item.id, *item);
        }
        black_box(&map);
    }))
}

fn string_replace_with_new() -> Result<Workload> {
    let mut text = String::new();
    Ok(Workload::new(move || {
        drop(mem::take(&mut text));
        text.push_str(GREETING);
        black_box(&text);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_vec_truncate_reuse",
            group: Clearing,
            expected: DidNotAllocate,
            description: "truncate(0) keeps the buffer for the next fill",
            setup: vec_truncate_reuse,
        },
        scenario! {
            name: "OK_vec_retain_reuse",
            group: Clearing,
            expected: DidNotAllocate,
            description: "retain drops half the items in place, then the Vec is topped up",
            setup: vec_retain_reuse,
        },
        scenario! {
            name: "OK_string_clear_reuse",
            group: Clearing,
            expected: DidNotAllocate,
            description: "clear a String and push text that fits its capacity",
            setup: string_clear_reuse,
        },
        scenario! {
            name: "BAD_vec_replace_with_new",
            group: Clearing,
            expected: Allocated,
            description: "Swapping in a fresh Vec::new() discards the buffer; the next fill allocates",
            setup: vec_replace_with_new,
        },
        scenario! {
            name: "BAD_hashmap_replace_with_new",
            group: Clearing,
            expected: Allocated,
            description: "Swapping in a fresh HashMap::new() discards the table; inserts allocate",
            setup: hashmap_replace_with_new,
        },
        scenario! {
            name: "BAD_string_replace_with_new",
            group: Clearing,
            expected: Allocated,
            description: "Swapping in a fresh String::new() discards the buffer; push_str allocates",
            setup: string_replace_with_new,
        },
    ]
}
