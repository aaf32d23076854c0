// ZALLOC - zalloc-probe
// Module: Measurement Substrate
// SW-REQ-ID: REQ_PROBE_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The measurement substrate seen by the probe.
//!
//! A substrate offers two capabilities: sampling the live heap size after a
//! blocking collection, and checking whether a single call allocated.
//! [`MeasurementContext`] implements both on top of
//! [`CountingAllocator`](crate::CountingAllocator).
//!
//! Heap size follows a reclaim-mark model: bytes freed since the last
//! [`collect`](MeasurementSubstrate::collect) still count as heap until the
//! next collection, the way garbage stays on a managed heap until a cycle
//! runs. Counters are per thread, so a thread that frees memory allocated
//! elsewhere can see a negative heap size; the probe only ever compares two
//! samples.

use core::cell::Cell;
use core::hint::black_box;
use core::marker::PhantomData;

use zalloc_error::{Error, Result};

use crate::allocator::{net_bytes, AllocationCounters};

/// Result of a single-call allocation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocationCheck {
    /// Any byte was allocated during the call
    pub did_allocate:    bool,
    /// Bytes allocated during the call
    pub bytes_allocated: u64,
    /// Allocation calls made during the call
    pub allocations:     u64,
}

/// Capabilities the probe needs from its host.
pub trait MeasurementSubstrate {
    /// Heap bytes not yet reclaimed by a collection.
    ///
    /// Only differences between two samples are meaningful. The value is
    /// signed and never clamped.
    fn current_live_heap_bytes(&self) -> i64;

    /// Blocking collection. Freed bytes stop counting as heap.
    fn collect(&self);

    /// Run `op` once and report whether it allocated.
    fn run_with_allocation_check(&self, op: &mut dyn FnMut()) -> AllocationCheck;

    /// Monotonic count of bytes allocated on this thread.
    fn allocated_bytes(&self) -> u64;

    /// Monotonic count of allocation calls on this thread.
    fn allocation_count(&self) -> u64;

    /// Confirm the substrate observes allocations at all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MEASUREMENT_UNAVAILABLE`] when it does not.
    fn verify(&self) -> Result<()> {
        Ok(())
    }
}

/// Make one throwaway allocation and report the counters after it.
fn calibrate() -> Result<AllocationCounters> {
    let before = AllocationCounters::snapshot();
    drop(black_box(Box::new(black_box(0xA110_C8ED_u64))));
    let after = AllocationCounters::snapshot();

    let movement = after.since(&before);
    if movement.allocations == 0 || movement.bytes_allocated == 0 {
        return Err(Error::MEASUREMENT_UNAVAILABLE);
    }
    Ok(after)
}

/// Substrate backed by the counting global allocator.
///
/// The context reads the counters of the thread that created it and is
/// neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct MeasurementContext {
    origin:         AllocationCounters,
    reclaimed_mark: Cell<u64>,
    _not_send:      PhantomData<*const ()>,
}

impl MeasurementContext {
    /// Initialise the context for the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MEASUREMENT_UNAVAILABLE`] when a calibration
    /// allocation leaves the counters untouched, which means
    /// [`CountingAllocator`](crate::CountingAllocator) is not the global
    /// allocator.
    pub fn init() -> Result<Self> {
        let after = calibrate()?;
        tracing::debug!(
            bytes_allocated = after.bytes_allocated,
            bytes_freed = after.bytes_freed,
            "measurement context initialised"
        );

        Ok(Self {
            origin:         after,
            reclaimed_mark: Cell::new(after.bytes_freed),
            _not_send:      PhantomData,
        })
    }

    /// Counter movement on this thread since [`init`](Self::init).
    #[must_use]
    pub fn counters(&self) -> AllocationCounters {
        AllocationCounters::snapshot().since(&self.origin)
    }

    /// End the measurement session and return its counter totals.
    pub fn teardown(self) -> AllocationCounters {
        let totals = self.counters();
        tracing::debug!(
            bytes_allocated = totals.bytes_allocated,
            allocations = totals.allocations,
            "measurement context torn down"
        );
        totals
    }
}

impl MeasurementSubstrate for MeasurementContext {
    fn current_live_heap_bytes(&self) -> i64 {
        net_bytes(AllocationCounters::snapshot().bytes_allocated, self.reclaimed_mark.get())
    }

    fn collect(&self) {
        self.reclaimed_mark.set(AllocationCounters::snapshot().bytes_freed);
    }

    fn run_with_allocation_check(&self, op: &mut dyn FnMut()) -> AllocationCheck {
        let before = AllocationCounters::snapshot();
        op();
        let delta = AllocationCounters::snapshot().since(&before);
        AllocationCheck {
            did_allocate:    delta.bytes_allocated > 0,
            bytes_allocated: delta.bytes_allocated,
            allocations:     delta.allocations,
        }
    }

    fn allocated_bytes(&self) -> u64 {
        AllocationCounters::snapshot().bytes_allocated
    }

    fn allocation_count(&self) -> u64 {
        AllocationCounters::snapshot().allocations
    }

    fn verify(&self) -> Result<()> {
        calibrate().map(|_| ())
    }
}
