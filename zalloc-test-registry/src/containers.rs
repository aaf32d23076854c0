// ZALLOC - zalloc-test-registry
// Module: Container Capabilities
// SW-REQ-ID: REQ_CATALOG_002
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Container capability traits and the generic scenario templates built on
//! them.
//!
//! One template body covers every container that implements the capability;
//! the catalog instantiates it per container type.

use core::hint::black_box;
use std::collections::{
    hash_map, hash_set, vec_deque, BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList,
    VecDeque,
};

use zalloc_error::Result;

use crate::fixtures::{dummies, Dummy, SortedDummies, LARGE, SMALL};
use crate::scenario::Workload;

/// Containers that can be emptied and filled again with the same items.
pub trait Refill: 'static {
    /// Empty container with room for `capacity` items where supported
    fn with_room(capacity: usize) -> Self
    where
        Self: Sized;

    /// Remove everything, then insert `items`.
    fn refill(&mut self, items: &[Dummy]);

    /// Number of stored items
    fn count(&self) -> usize;
}

/// Containers whose elements can be walked by reference.
pub trait Traverse: 'static {
    /// Concrete iterator type
    type Iter<'a>: Iterator<Item = &'a Dummy> + 'a
    where
        Self: 'a;

    /// Container holding `items`
    fn from_items(items: &[Dummy]) -> Self
    where
        Self: Sized;

    /// Iterate with the concrete iterator type.
    fn traverse(&self) -> Self::Iter<'_>;

    /// Iterate through a trait-object handle.
    fn traverse_dyn(&self) -> Box<dyn Iterator<Item = &Dummy> + '_> {
        Box::new(self.traverse())
    }
}

impl Refill for Vec<Dummy> {
    fn with_room(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.push(*item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for VecDeque<Dummy> {
    fn with_room(capacity: usize) -> Self {
        VecDeque::with_capacity(capacity)
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.push_back(*item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for HashMap<i32, Dummy> {
    fn with_room(capacity: usize) -> Self {
        HashMap::with_capacity(capacity)
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.insert(item.id, *item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for HashSet<Dummy> {
    fn with_room(capacity: usize) -> Self {
        HashSet::with_capacity(capacity)
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.insert(*item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for BinaryHeap<Dummy> {
    fn with_room(capacity: usize) -> Self {
        BinaryHeap::with_capacity(capacity)
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.push(*item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for SortedDummies {
    fn with_room(capacity: usize) -> Self {
        SortedDummies::with_capacity(capacity)
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.insert(*item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for BTreeMap<i32, Dummy> {
    fn with_room(_capacity: usize) -> Self {
        BTreeMap::new()
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.insert(item.id, *item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for BTreeSet<Dummy> {
    fn with_room(_capacity: usize) -> Self {
        BTreeSet::new()
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.insert(*item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Refill for LinkedList<Dummy> {
    fn with_room(_capacity: usize) -> Self {
        LinkedList::new()
    }

    fn refill(&mut self, items: &[Dummy]) {
        self.clear();
        for item in items {
            self.push_back(*item);
        }
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Traverse for Vec<Dummy> {
    type Iter<'a> = core::slice::Iter<'a, Dummy>;

    fn from_items(items: &[Dummy]) -> Self {
        items.to_vec()
    }

    fn traverse(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl Traverse for VecDeque<Dummy> {
    type Iter<'a> = vec_deque::Iter<'a, Dummy>;

    fn from_items(items: &[Dummy]) -> Self {
        items.iter().copied().collect()
    }

    fn traverse(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl Traverse for HashMap<i32, Dummy> {
    type Iter<'a> = hash_map::Values<'a, i32, Dummy>;

    fn from_items(items: &[Dummy]) -> Self {
        items.iter().map(|item| (item.id, *item)).collect()
    }

    fn traverse(&self) -> Self::Iter<'_> {
        self.values()
    }
}

impl Traverse for HashSet<Dummy> {
    type Iter<'a> = hash_set::Iter<'a, Dummy>;

    fn from_items(items: &[Dummy]) -> Self {
        items.iter().copied().collect()
    }

    fn traverse(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl Traverse for SortedDummies {
    type Iter<'a> = core::slice::Iter<'a, Dummy>;

    fn from_items(items: &[Dummy]) -> Self {
        SortedDummies::from_unsorted(items.to_vec())
    }

    fn traverse(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

/// Sum of payload values, consuming any by-reference iterator.
pub fn sum_values<'a>(items: impl IntoIterator<Item = &'a Dummy>) -> i64 {
    items.into_iter().map(|item| item.value).sum()
}

/// Refill a pre-filled `C` with [`LARGE`] items on every call.
///
/// # Errors
///
/// Never fails; the signature matches scenario setup functions.
pub fn refill_workload<C: Refill>() -> Result<Workload> {
    let items = dummies(LARGE);
    let mut container = C::with_room(LARGE);
    container.refill(&items);
    Ok(Workload::new(move || {
        container.refill(&items);
        black_box(container.count());
    }))
}

/// Walk a [`SMALL`] `C` with its concrete iterator on every call.
///
/// # Errors
///
/// Never fails; the signature matches scenario setup functions.
pub fn traverse_workload<C: Traverse>() -> Result<Workload> {
    let container = C::from_items(&dummies(SMALL));
    Ok(Workload::new(move || {
        black_box(sum_values(container.traverse()));
    }))
}

/// Walk a [`SMALL`] `C` through a boxed iterator on every call.
///
/// # Errors
///
/// Never fails; the signature matches scenario setup functions.
pub fn traverse_dyn_workload<C: Traverse>() -> Result<Workload> {
    let container = C::from_items(&dummies(SMALL));
    Ok(Workload::new(move || {
        let iter = black_box(container.traverse_dyn());
        black_box(sum_values(iter));
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refilled<C: Refill>() -> usize {
        let mut container = C::with_room(4);
        container.refill(&dummies(4));
        container.refill(&dummies(4));
        container.count()
    }

    #[test]
    fn test_refill_replaces_contents() {
        assert_eq!(refilled::<Vec<Dummy>>(), 4);
        assert_eq!(refilled::<VecDeque<Dummy>>(), 4);
        assert_eq!(refilled::<HashMap<i32, Dummy>>(), 4);
        assert_eq!(refilled::<HashSet<Dummy>>(), 4);
        assert_eq!(refilled::<BinaryHeap<Dummy>>(), 4);
        assert_eq!(refilled::<SortedDummies>(), 4);
        assert_eq!(refilled::<BTreeMap<i32, Dummy>>(), 4);
        assert_eq!(refilled::<BTreeSet<Dummy>>(), 4);
        assert_eq!(refilled::<LinkedList<Dummy>>(), 4);
    }

    fn totals<C: Traverse>() -> (i64, i64) {
        let container = C::from_items(&dummies(SMALL));
        (sum_values(container.traverse()), sum_values(container.traverse_dyn()))
    }

    #[test]
    fn test_both_traversals_visit_every_item() {
        let expected = sum_values(&dummies(SMALL));
        assert_eq!(totals::<Vec<Dummy>>(), (expected, expected));
        assert_eq!(totals::<VecDeque<Dummy>>(), (expected, expected));
        assert_eq!(totals::<HashMap<i32, Dummy>>(), (expected, expected));
        assert_eq!(totals::<HashSet<Dummy>>(), (expected, expected));
        assert_eq!(totals::<SortedDummies>(), (expected, expected));
    }
}
