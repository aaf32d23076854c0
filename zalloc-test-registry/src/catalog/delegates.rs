// ZALLOC - zalloc-test-registry
// Module: Delegate Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Closures and function values passed as callbacks.
//!
//! `Box::new` of a zero-sized closure or fn item does not touch the heap.
//! A closure that captures anything has a size, so boxing it allocates on
//! every call. Boxing once at setup and reusing the box is clean.

use core::cell::Cell;
use core::hint::black_box;
use std::rc::Rc;

use zalloc_error::Result;

use crate::fixtures::{dummies, Dummy, SMALL};
use crate::scenario;
use crate::scenario::{ClosureKind, OperationKind, Scenario, Workload};

/// Apply a boxed callback to every item
pub fn for_each_boxed<'a>(items: &mut [Dummy], mut action: Box<dyn FnMut(&mut Dummy) + 'a>) {
    for item in items {
        action(item);
    }
}

/// Apply a borrowed callback to every item
pub fn for_each_dyn(items: &mut [Dummy], action: &mut dyn FnMut(&mut Dummy)) {
    for item in items {
        action(item);
    }
}

/// Apply a statically dispatched callback to every item
pub fn for_each_generic(items: &mut [Dummy], mut action: impl FnMut(&mut Dummy)) {
    for item in items {
        action(item);
    }
}

fn bump_value(item: &mut Dummy) {
    item.value = item.value.wrapping_add(1);
}

/// Callback owner whose method is wrapped in a closure.
#[derive(Debug, Default)]
struct Processor {
    visited: u64,
    step:    i64,
}

impl Processor {
    fn apply(&mut self, item: &mut Dummy) {
        self.visited += 1;
        item.value = item.value.wrapping_add(self.step);
    }
}

fn non_capturing_closure() -> Result<Workload> {
    let mut items = dummies(SMALL);
    Ok(Workload::new(move || {
        for_each_boxed(
            &mut items,
            Box::new(|item: &mut Dummy| item.value = item.value.wrapping_add(2)),
        );
        black_box(&items);
    }))
}

fn fn_item() -> Result<Workload> {
    let mut items = dummies(SMALL);
    Ok(Workload::new(move || {
        for_each_boxed(&mut items, Box::new(bump_value));
        black_box(&items);
    }))
}

fn capturing_closure() -> Result<Workload> {
    let mut items = dummies(SMALL);
    Ok(Workload::new(move || {
        let mut total = 0i64;
        for_each_boxed(&mut items, black_box(Box::new(|item: &mut Dummy| total += item.value)));
        black_box(total);
    }))
}

fn method_closure() -> Result<Workload> {
    let mut items = dummies(SMALL);
    let mut processor = Processor {
        step: 3,
        ..Processor::default()
    };
    Ok(Workload::new(move || {
        for_each_boxed(
            &mut items,
            black_box(Box::new(|item: &mut Dummy| processor.apply(item))),
        );
        black_box(processor.visited);
    }))
}

fn generic_capturing_closure() -> Result<Workload> {
    let mut items = dummies(SMALL);
    Ok(Workload::new(move || {
        let mut total = 0i64;
        for_each_generic(&mut items, |item| total += item.value);
        black_box(total);
    }))
}

fn cached_closure() -> Result<Workload> {
    let mut items = dummies(SMALL);
    let step = Rc::new(Cell::new(0i64));
    let shared = Rc::clone(&step);
    let mut cached: Box<dyn FnMut(&mut Dummy)> =
        Box::new(move |item: &mut Dummy| item.value = item.value.wrapping_add(shared.get()));
    Ok(Workload::new(move || {
        step.set(step.get() + 1);
        for_each_dyn(&mut items, &mut *cached);
        black_box(&items);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_boxed_non_capturing_closure",
            group: Delegates,
            expected: DidNotAllocate,
            kind: OperationKind::Closure(ClosureKind::NonCapturing),
            description: "Box a closure that captures nothing; it is zero-sized",
            setup: non_capturing_closure,
        },
        scenario! {
            name: "OK_boxed_fn_item",
            group: Delegates,
            expected: DidNotAllocate,
            kind: OperationKind::Closure(ClosureKind::NonCapturing),
            description: "Box a named function item; it is zero-sized",
            setup: fn_item,
        },
        scenario! {
            name: "BAD_boxed_capturing_closure",
            group: Delegates,
            expected: Allocated,
            kind: OperationKind::Closure(ClosureKind::CapturingMutableState),
            description: "Box a closure capturing a local by &mut on every call",
            setup: capturing_closure,
        },
        scenario! {
            name: "BAD_boxed_method_closure",
            group: Delegates,
            expected: Allocated,
            kind: OperationKind::Closure(ClosureKind::CapturingMutableState),
            description: "Box a closure wrapping a method of a captured processor",
            setup: method_closure,
        },
        scenario! {
            name: "OK_generic_capturing_closure",
            group: Delegates,
            expected: DidNotAllocate,
            kind: OperationKind::Closure(ClosureKind::CapturingMutableState),
            description: "Pass a capturing closure as impl FnMut; it stays on the stack",
            setup: generic_capturing_closure,
        },
        scenario! {
            name: "OK_cached_boxed_closure",
            group: Delegates,
            expected: DidNotAllocate,
            kind: OperationKind::Closure(ClosureKind::CachedReusable),
            description: "Box a closure once at setup and reuse it through &mut dyn FnMut",
            setup: cached_closure,
        },
    ]
}
