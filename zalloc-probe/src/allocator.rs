// ZALLOC - zalloc-probe
// Module: Counting Allocator
// SW-REQ-ID: REQ_PROBE_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Counting global allocator.
//!
//! [`CountingAllocator`] forwards every request to [`System`] and records
//! the request in counters owned by the calling thread. Keeping the
//! counters thread-local means a measurement taken on one thread is never
//! disturbed by a test harness, a log writer, or any other thread
//! allocating at the same time.
//!
//! The counters are const-initialised and have no destructor, so touching
//! them from inside the allocator never allocates and never re-enters it.
//!
//! # Installing
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: zalloc_probe::CountingAllocator = zalloc_probe::CountingAllocator;
//! ```

#![allow(unsafe_code)]

use core::cell::Cell;
use std::alloc::{GlobalAlloc, Layout, System};

use serde::Serialize;

thread_local! {
    static COUNTERS: Cell<AllocationCounters> = const { Cell::new(AllocationCounters::ZERO) };
}

/// Per-thread allocation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AllocationCounters {
    /// Bytes handed out by `alloc`, `alloc_zeroed` and `realloc`
    pub bytes_allocated: u64,
    /// Bytes returned through `dealloc` and `realloc`
    pub bytes_freed:     u64,
    /// Number of successful allocation calls
    pub allocations:     u64,
    /// Number of deallocation calls
    pub deallocations:   u64,
}

impl AllocationCounters {
    /// All counters at zero.
    pub const ZERO: Self = Self {
        bytes_allocated: 0,
        bytes_freed:     0,
        allocations:     0,
        deallocations:   0,
    };

    /// Read the calling thread's counters.
    #[must_use]
    pub fn snapshot() -> Self {
        COUNTERS.try_with(Cell::get).unwrap_or(Self::ZERO)
    }

    /// Counter movement between `earlier` and `self`.
    #[must_use]
    pub const fn since(&self, earlier: &Self) -> Self {
        Self {
            bytes_allocated: self.bytes_allocated.wrapping_sub(earlier.bytes_allocated),
            bytes_freed:     self.bytes_freed.wrapping_sub(earlier.bytes_freed),
            allocations:     self.allocations.wrapping_sub(earlier.allocations),
            deallocations:   self.deallocations.wrapping_sub(earlier.deallocations),
        }
    }

    /// Bytes allocated minus bytes freed on this thread.
    ///
    /// Negative when the thread freed memory another thread allocated.
    #[must_use]
    pub fn live_bytes(&self) -> i64 {
        net_bytes(self.bytes_allocated, self.bytes_freed)
    }
}

/// `allocated - freed` without clamping at zero.
pub(crate) fn net_bytes(allocated: u64, freed: u64) -> i64 {
    let net = i128::from(allocated) - i128::from(freed);
    i64::try_from(net).unwrap_or(if net < 0 { i64::MIN } else { i64::MAX })
}

#[inline]
fn record_alloc(size: usize) {
    let _ = COUNTERS.try_with(|counters| {
        let mut current = counters.get();
        current.bytes_allocated = current.bytes_allocated.wrapping_add(size as u64);
        current.allocations = current.allocations.wrapping_add(1);
        counters.set(current);
    });
}

#[inline]
fn record_free(size: usize) {
    let _ = COUNTERS.try_with(|counters| {
        let mut current = counters.get();
        current.bytes_freed = current.bytes_freed.wrapping_add(size as u64);
        current.deallocations = current.deallocations.wrapping_add(1);
        counters.set(current);
    });
}

/// A wrapper around [`System`] that counts allocations per thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    #[inline]
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: the caller upholds `GlobalAlloc::alloc` preconditions.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    #[inline]
    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: the caller upholds `GlobalAlloc::alloc_zeroed` preconditions.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    #[inline]
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        record_free(layout.size());
        // SAFETY: `ptr` was returned by this allocator with `layout`.
        unsafe { System.dealloc(ptr, layout) }
    }

    #[inline]
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: the caller upholds `GlobalAlloc::realloc` preconditions.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        // A failed realloc leaves the old block in place.
        if !new_ptr.is_null() {
            record_free(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_since_reports_movement() {
        let earlier = AllocationCounters {
            bytes_allocated: 100,
            bytes_freed:     40,
            allocations:     3,
            deallocations:   1,
        };
        let later = AllocationCounters {
            bytes_allocated: 164,
            bytes_freed:     104,
            allocations:     5,
            deallocations:   3,
        };
        let delta = later.since(&earlier);
        assert_eq!(delta.bytes_allocated, 64);
        assert_eq!(delta.bytes_freed, 64);
        assert_eq!(delta.allocations, 2);
        assert_eq!(delta.deallocations, 2);
    }

    #[test]
    fn test_live_bytes_goes_negative_on_foreign_frees() {
        let counters = AllocationCounters {
            bytes_allocated: 8,
            bytes_freed:     32,
            ..AllocationCounters::ZERO
        };
        assert_eq!(counters.live_bytes(), -24);
        assert_eq!(net_bytes(u64::MAX, 0), i64::MAX);
        assert_eq!(net_bytes(0, u64::MAX), i64::MIN);
    }
}
