// ZALLOC - zalloc-test-registry
// Module: Variadic Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Variable-length argument tails.

use core::hint::black_box;

use zalloc_error::Result;

use crate::scenario;
use crate::scenario::{Scenario, Workload};

/// Sum of `first` and an owned `Vec` tail
#[must_use]
pub fn total_vec(first: i32, rest: Vec<i32>) -> i64 {
    i64::from(first) + rest.iter().copied().map(i64::from).sum::<i64>()
}

/// Sum of `first` and a borrowed slice tail
#[must_use]
pub fn total_slice(first: i32, rest: &[i32]) -> i64 {
    i64::from(first) + rest.iter().copied().map(i64::from).sum::<i64>()
}

/// Sum of `first` and a fixed-size array tail
#[must_use]
pub fn total_array<const N: usize>(first: i32, rest: [i32; N]) -> i64 {
    i64::from(first) + rest.into_iter().map(i64::from).sum::<i64>()
}

/// Call [`total_vec`] with a `Vec` tail built from the trailing arguments.
#[macro_export]
macro_rules! variadic {
    ($first:expr; $($rest:expr),* $(,)?) => {
        $crate::catalog::variadic::total_vec(
            $first,
            ::core::hint::black_box(::std::vec![$($rest),*]),
        )
    };
}

fn vec_tail() -> Result<Workload> {
    Ok(Workload::new(|| {
        black_box(crate::variadic!(black_box(10); 1, 2, 3));
    }))
}

fn vec_tail_empty() -> Result<Workload> {
    Ok(Workload::new(|| {
        black_box(crate::variadic!(black_box(10);));
    }))
}

fn slice_tail() -> Result<Workload> {
    Ok(Workload::new(|| {
        black_box(total_slice(black_box(10), black_box(&[1, 2, 3])));
    }))
}

fn array_tail() -> Result<Workload> {
    Ok(Workload::new(|| {
        black_box(total_array(black_box(10), black_box([1, 2, 3])));
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "BAD_vec_tail",
            group: Variadic,
            expected: Allocated,
            description: "variadic!(10; 1, 2, 3) builds a Vec for the tail",
            setup: vec_tail,
        },
        scenario! {
            name: "OK_vec_tail_empty",
            group: Variadic,
            expected: DidNotAllocate,
            description: "variadic!(10;) passes an empty Vec, which owns no buffer",
            setup: vec_tail_empty,
        },
        scenario! {
            name: "OK_slice_tail",
            group: Variadic,
            expected: DidNotAllocate,
            description: "Pass the tail as &[i32]",
            setup: slice_tail,
        },
        scenario! {
            name: "OK_array_tail",
            group: Variadic,
            expected: DidNotAllocate,
            description: "Pass the tail as a const-generic [i32; N]",
            setup: array_tail,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tails_sum_alike() {
        assert_eq!(crate::variadic!(10; 1, 2, 3), 16);
        assert_eq!(total_slice(10, &[1, 2, 3]), 16);
        assert_eq!(total_array(10, [1, 2, 3]), 16);
        assert_eq!(crate::variadic!(10;), 10);
    }
}
