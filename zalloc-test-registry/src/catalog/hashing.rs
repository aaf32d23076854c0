// ZALLOC - zalloc-test-registry
// Module: Hashing Scenarios
// SW-REQ-ID: REQ_CATALOG_003
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Hashing scalars and text.
//!
//! A Rust string literal is a `&'static str` and costs nothing to hash.
//! What allocates is handing text to an owning entry point
//! ([`hash_owned`]): every call copies it into a fresh `String`. The text
//! pairs below therefore contrast the owning and borrowing entry points,
//! with the literal hashed through both.

use core::hash::BuildHasher;
use core::hint::black_box;
use std::collections::hash_map::RandomState;

use zalloc_error::Result;

use crate::scenario;
use crate::scenario::{Scenario, Workload};

/// Text hashed by the text scenarios
pub const GREETING: &str = "helloworld";

/// Hash text through an owning API; converts its argument into a `String`.
pub fn hash_owned(state: &RandomState, text: impl Into<String>) -> u64 {
    let owned: String = black_box(text.into());
    state.hash_one(&owned)
}

/// Hash text through a borrowing API.
pub fn hash_borrowed(state: &RandomState, text: &str) -> u64 {
    state.hash_one(text)
}

fn integer() -> Result<Workload> {
    let state = RandomState::new();
    let mut value = 0i64;
    Ok(Workload::new(move || {
        value = value.wrapping_add(1);
        black_box(state.hash_one(black_box(value)));
    }))
}

fn float_bits() -> Result<Workload> {
    let state = RandomState::new();
    let mut value = 0.5f64;
    Ok(Workload::new(move || {
        value += 1.0;
        black_box(state.hash_one(black_box(value).to_bits()));
    }))
}

fn vector3() -> Result<Workload> {
    let state = RandomState::new();
    let position = [1.0f32, 2.5, -3.25];
    Ok(Workload::new(move || {
        black_box(state.hash_one(black_box(position).map(f32::to_bits)));
    }))
}

fn text_variable() -> Result<Workload> {
    let state = RandomState::new();
    let text = GREETING.to_owned();
    Ok(Workload::new(move || {
        black_box(hash_borrowed(&state, &text));
        black_box(hash_borrowed(&state, &text));
    }))
}

fn text_literal() -> Result<Workload> {
    let state = RandomState::new();
    Ok(Workload::new(move || {
        black_box(hash_owned(&state, "helloworld"));
        black_box(hash_owned(&state, "helloworld"));
    }))
}

fn text_literal_borrowed() -> Result<Workload> {
    let state = RandomState::new();
    Ok(Workload::new(move || {
        black_box(hash_borrowed(&state, "helloworld"));
        black_box(hash_borrowed(&state, "helloworld"));
    }))
}

fn text_const() -> Result<Workload> {
    let state = RandomState::new();
    Ok(Workload::new(move || {
        black_box(hash_owned(&state, GREETING));
    }))
}

pub(crate) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario! {
            name: "OK_hash_integer",
            group: Hashing,
            expected: DidNotAllocate,
            description: "Hash an i64",
            setup: integer,
        },
        scenario! {
            name: "OK_hash_float_bits",
            group: Hashing,
            expected: DidNotAllocate,
            description: "Hash the bit pattern of an f64",
            setup: float_bits,
        },
        scenario! {
            name: "OK_hash_vector3",
            group: Hashing,
            expected: DidNotAllocate,
            description: "Hash a [f32; 3] position by bit patterns",
            setup: vector3,
        },
        scenario! {
            name: "OK_hash_text_variable",
            group: Hashing,
            expected: DidNotAllocate,
            description: "Hash a String variable twice through the borrowing &str entry point",
            setup: text_variable,
        },
        scenario! {
            name: "OK_hash_text_literal_borrowed",
            group: Hashing,
            expected: DidNotAllocate,
            description: "Hash the literal \"helloworld\" twice through the borrowing &str entry point",
            setup: text_literal_borrowed,
        },
        scenario! {
            name: "BAD_hash_text_literal",
            group: Hashing,
            expected: Allocated,
            strategy: SingleShot,
            description: "Hash the literal \"helloworld\" twice through the owning impl Into<String> entry point",
            setup: text_literal,
        },
        scenario! {
            name: "BAD_hash_text_const",
            group: Hashing,
            expected: Allocated,
            description: "Hash a &str const through the owning impl Into<String> entry point",
            setup: text_const,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_and_borrowed_hashes_agree() {
        let state = RandomState::new();
        let text = GREETING.to_owned();
        assert_eq!(hash_owned(&state, GREETING), hash_borrowed(&state, &text));
    }
}
