// ZALLOC - zalloc-test-registry
// Module: Scenario Fixtures
// SW-REQ-ID: REQ_CATALOG_002
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Payload types and fixture builders shared by the catalog.

use core::hash::{Hash, Hasher};

use hashbrown::Equivalent;

/// Number of elements in refill and lookup fixtures
pub const LARGE: usize = 1000;

/// Number of elements in iteration fixtures
pub const SMALL: usize = 10;

/// Inert payload stored in every container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Dummy {
    /// Identifier, unique within a fixture
    pub id:    i32,
    /// Payload value
    pub value: i64,
}

impl Dummy {
    /// Payload whose value is derived from its id
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self {
            id,
            value: id as i64 * 31,
        }
    }
}

/// `count` dummies with ids `0..count`.
#[must_use]
pub fn dummies(count: usize) -> Vec<Dummy> {
    (0..count as i32).map(Dummy::new).collect()
}

/// Composite key with an owned text part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// Slot owner name
    pub name: String,
    /// Slot index
    pub slot: u32,
}

impl SlotKey {
    /// Build the key for slot `slot`, named `slot-{slot}`
    #[must_use]
    pub fn numbered(slot: u32) -> Self {
        Self {
            name: slot_name(slot),
            slot,
        }
    }

    /// Borrowed view of this key
    #[must_use]
    pub fn as_ref(&self) -> SlotKeyRef<'_> {
        SlotKeyRef {
            name: &self.name,
            slot: self.slot,
        }
    }
}

/// Name used for slot `slot` in keyed fixtures
#[must_use]
pub fn slot_name(slot: u32) -> String {
    format!("slot-{slot}")
}

/// Borrowed twin of [`SlotKey`], hashed identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotKeyRef<'a> {
    /// Slot owner name
    pub name: &'a str,
    /// Slot index
    pub slot: u32,
}

impl Hash for SlotKeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Same field order and encoding as the derived `SlotKey` hash.
        self.name.hash(state);
        self.slot.hash(state);
    }
}

impl Equivalent<SlotKey> for SlotKeyRef<'_> {
    fn equivalent(&self, key: &SlotKey) -> bool {
        self.slot == key.slot && self.name == key.name
    }
}

/// Plain `Copy` composite key: `(owner, slot)`.
pub type PackedKey = (u32, u32);

/// Sorted array of dummies, ordered by id.
pub type SortedDummies = sorted_vec::SortedVec<Dummy>;

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_slot_key_ref_hashes_like_owned_key() {
        let key = SlotKey::numbered(17);
        assert_eq!(hash_of(&key), hash_of(&key.as_ref()));
        assert!(key.as_ref().equivalent(&key));
        assert!(!SlotKeyRef { name: "slot-17", slot: 18 }.equivalent(&key));
    }

    #[test]
    fn test_sorted_dummies_order_by_id() {
        let mut sorted = SortedDummies::with_capacity(4);
        for id in [3, 1, 2] {
            sorted.insert(Dummy::new(id));
        }
        let ids: Vec<i32> = sorted.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_dummies_are_numbered() {
        let items = dummies(SMALL);
        assert_eq!(items.len(), SMALL);
        assert_eq!(items[4], Dummy { id: 4, value: 124 });
    }
}
