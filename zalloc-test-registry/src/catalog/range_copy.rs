// ZALLOC - zalloc-test-registry
// Module: Range Copy Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Copying ranges into a destination that already has room.
//!
//! `Vec::splice` at the front only stays in place when the inserted
//! iterator reports its length up front; otherwise the remainder is staged
//! in a temporary `Vec` before the tail is moved.

use core::hint::black_box;

use zalloc_error::Result;

use crate::fixtures::{dummies, Dummy, LARGE};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

fn extend_from_slice() -> Result<Workload> {
    let source = dummies(LARGE);
    let mut destination: Vec<Dummy> = Vec::with_capacity(LARGE);
    Ok(Workload::new(move || {
        destination.clear();
        destination.extend_from_slice(&source);
        black_box(destination.len());
    }))
}

fn extend_exact_iterator() -> Result<Workload> {
    let source = dummies(LARGE);
    let mut destination: Vec<Dummy> = Vec::with_capacity(LARGE);
    Ok(Workload::new(move || {
        destination.clear();
        destination.extend(source.iter().map(|d| Dummy {
            value: d.value + 1,
            ..*d
        }));
        black_box(destination.len());
    }))
}

fn copy_from_slice() -> Result<Workload> {
    let source = dummies(LARGE);
    let mut destination = vec![Dummy::default(); LARGE];
    Ok(Workload::new(move || {
        destination.copy_from_slice(&source);
        black_box(&destination);
    }))
}

fn splice_front(exact: bool) -> Workload {
    let source = dummies(LARGE);
    let base = dummies(LARGE / 4);
    let mut destination: Vec<Dummy> = Vec::with_capacity(LARGE + base.len());
    Workload::new(move || {
        destination.clear();
        destination.extend_from_slice(&base);
        if exact {
            drop(destination.splice(0..0, source.iter().copied()));
        } else {
            drop(destination.splice(0..0, source.iter().filter(|d| d.id % 2 == 0).copied()));
        }
        black_box(destination.len());
    })
}

fn splice_front_exact() -> Result<Workload> {
    Ok(splice_front(true))
}

fn splice_front_filtered() -> Result<Workload> {
    Ok(splice_front(false))
}

fn extend_from_collected() -> Result<Workload> {
    let source = dummies(LARGE);
    let mut destination: Vec<Dummy> = Vec::with_capacity(LARGE);
    Ok(Workload::new(move || {
        destination.clear();
        let staged: Vec<Dummy> = source.iter().filter(|d| d.id % 2 == 0).copied().collect();
        destination.extend(black_box(staged));
        black_box(destination.len());
    }))
}

fn concat_slices() -> Result<Workload> {
    let source = dummies(LARGE);
    let (head, tail) = source.split_at(LARGE / 2);
    let (head, tail) = (head.to_vec(), tail.to_vec());
    Ok(Workload::new(move || {
        let joined = [head.as_slice(), tail.as_slice()].concat();
        black_box(&joined);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_extend_from_slice",
            group: RangeCopy,
            expected: DidNotAllocate,
            description: "extend_from_slice into a cleared, pre-sized Vec",
            setup: extend_from_slice,
        },
        scenario! {
            name: "OK_extend_exact_iterator",
            group: RangeCopy,
            expected: DidNotAllocate,
            description: "extend with an exact-size mapped iterator into a pre-sized Vec",
            setup: extend_exact_iterator,
        },
        scenario! {
            name: "OK_copy_from_slice",
            group: RangeCopy,
            expected: DidNotAllocate,
            description: "copy_from_slice over an equally long destination",
            setup: copy_from_slice,
        },
        scenario! {
            name: "OK_vec_splice_front_exact",
            group: RangeCopy,
            expected: DidNotAllocate,
            description: "splice an exact-size range in front of existing items with room to spare",
            setup: splice_front_exact,
        },
        scenario! {
            name: "BAD_vec_splice_front_filtered",
            group: RangeCopy,
            expected: Allocated,
            description: "splice a filtered range in front of existing items; the unsized remainder is staged",
            setup: splice_front_filtered,
        },
        scenario! {
            name: "BAD_extend_from_collected",
            group: RangeCopy,
            expected: Allocated,
            description: "collect a filtered range into a temporary Vec, then extend",
            setup: extend_from_collected,
        },
        scenario! {
            name: "BAD_concat_slices",
            group: RangeCopy,
            expected: Allocated,
            description: "concat two slices into a new Vec",
            setup: concat_slices,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_front_keeps_existing_items_last() {
        let mut workload = splice_front_filtered().unwrap();
        workload.run();
        workload.run();

        let base = dummies(LARGE / 4);
        let mut destination = base.clone();
        let filtered = dummies(LARGE).into_iter().filter(|d| d.id % 2 == 0);
        drop(destination.splice(0..0, filtered));
        assert_eq!(destination.len(), LARGE / 2 + LARGE / 4);
        assert_eq!(destination[0].id, 0);
        assert_eq!(destination[1].id, 2);
        assert_eq!(destination[LARGE / 2..], base[..]);
    }
}
