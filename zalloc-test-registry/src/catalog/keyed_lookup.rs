// ZALLOC - zalloc-test-registry
// Module: Keyed Lookup Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Lookups with composite keys.
//!
//! `std::collections::HashMap::get` only accepts types the key can
//! `Borrow` as. A composite key with an owned `String` part has no such
//! borrowed form, so every lookup builds an owned probe key. An explicit
//! equivalence (`hashbrown::Equivalent`) lets a borrowed twin stand in.

use core::hint::black_box;
use std::collections::HashMap;

use zalloc_error::Result;

use crate::fixtures::{slot_name, PackedKey, SlotKey, SlotKeyRef, LARGE};
use crate::scenario;
use crate::scenario::{Scenario, Workload};

fn slot_names() -> Vec<String> {
    (0..LARGE as u32).map(slot_name).collect()
}

fn owned_composite_key() -> Result<Workload> {
    let names = slot_names();
    let map: HashMap<SlotKey, i32> = (0..LARGE as u32)
        .map(|slot| (SlotKey::numbered(slot), slot as i32))
        .collect();
    Ok(Workload::new(move || {
        let mut hits = 0i64;
        for (slot, name) in names.iter().enumerate() {
            let probe = black_box(SlotKey {
                name: name.clone(),
                slot: slot as u32,
            });
            if let Some(value) = map.get(&probe) {
                hits += i64::from(*value);
            }
        }
        black_box(hits);
    }))
}

fn equivalent_composite_key() -> Result<Workload> {
    let names = slot_names();
    let map: hashbrown::HashMap<SlotKey, i32> = (0..LARGE as u32)
        .map(|slot| (SlotKey::numbered(slot), slot as i32))
        .collect();
    Ok(Workload::new(move || {
        let mut hits = 0i64;
        for (slot, name) in names.iter().enumerate() {
            let probe = SlotKeyRef {
                name: name.as_str(),
                slot: slot as u32,
            };
            if let Some(value) = map.get(&probe) {
                hits += i64::from(*value);
            }
        }
        black_box(hits);
    }))
}

fn packed_key() -> Result<Workload> {
    let map: HashMap<PackedKey, i32> = (0..LARGE as u32)
        .map(|slot| ((slot % 7, slot), slot as i32))
        .collect();
    Ok(Workload::new(move || {
        let mut hits = 0i64;
        for slot in 0..LARGE as u32 {
            if let Some(value) = map.get(&(slot % 7, slot)) {
                hits += i64::from(*value);
            }
        }
        black_box(hits);
    }))
}

fn borrowed_text_key() -> Result<Workload> {
    let names = slot_names();
    let map: HashMap<String, i32> = names
        .iter()
        .enumerate()
        .map(|(slot, name)| (name.clone(), slot as i32))
        .collect();
    Ok(Workload::new(move || {
        let mut hits = 0i64;
        for name in &names {
            if let Some(value) = map.get(name.as_str()) {
                hits += i64::from(*value);
            }
        }
        black_box(hits);
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "BAD_owned_composite_key_lookup",
            group: KeyedLookup,
            expected: Allocated,
            description: "1000 lookups keyed by (String, u32) without an equivalence; each builds an owned key",
            setup: owned_composite_key,
        },
        scenario! {
            name: "OK_equivalent_composite_key_lookup",
            group: KeyedLookup,
            expected: DidNotAllocate,
            description: "1000 lookups through a borrowed key twin with hashbrown::Equivalent",
            setup: equivalent_composite_key,
        },
        scenario! {
            name: "OK_packed_key_lookup",
            group: KeyedLookup,
            expected: DidNotAllocate,
            description: "1000 lookups keyed by a Copy (u32, u32) tuple",
            setup: packed_key,
        },
        scenario! {
            name: "OK_borrowed_text_key_lookup",
            group: KeyedLookup,
            expected: DidNotAllocate,
            description: "1000 lookups of String keys through Borrow<str>",
            setup: borrowed_text_key,
        },
    ]
}
