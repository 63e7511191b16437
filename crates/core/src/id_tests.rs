// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

crate::define_id! {
    /// Identifier used only by these tests.
    pub struct SampleId;
}

#[test]
fn define_id_display_matches_inner() {
    let id = SampleId::new("build-test-main-abc");
    assert_eq!(id.to_string(), "build-test-main-abc");
    assert_eq!(id.as_str(), "build-test-main-abc");
}

#[test]
fn define_id_compares_with_str() {
    let id: SampleId = "slot".into();
    assert_eq!(id, "slot");
}

#[test]
fn define_id_reference_compares_with_str() {
    let id = SampleId::new("build-test-feature-x-anysha");
    let borrowed: &SampleId = &id;
    assert_eq!(borrowed, "build-test-feature-x-anysha");
    assert!(*borrowed == *"build-test-feature-x-anysha");
}

#[test]
fn define_id_looks_up_by_str_in_maps() {
    let mut map = HashMap::new();
    map.insert(SampleId::new("k"), 7);
    assert_eq!(map.get("k"), Some(&7));
}

#[test]
fn define_id_serializes_as_plain_string() {
    let id = SampleId::new("run-9");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"run-9\"");
    let back: SampleId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[yare::parameterized(
    truncates      = { "abcdefghij", 4, "abcd" },
    exact_length   = { "abcd", 4, "abcd" },
    shorter        = { "ab", 4, "ab" },
    multibyte_safe = { "ééééé", 2, "éé" },
)]
fn short_truncates_on_char_boundaries(input: &str, n: usize, expected: &str) {
    assert_eq!(input.short(n), expected);
    assert_eq!(SampleId::new(input).short(n), expected);
}

#[test]
fn uuid_gen_yields_distinct_ids() {
    let id_gen = UuidIdGen;
    let a = id_gen.next();
    let b = id_gen.next();
    assert_ne!(a, b);
    assert_eq!(a.len(), 36);
}

#[test]
fn sequential_gen_counter_is_shared_between_clones() {
    let first = SequentialIdGen::new("run");
    let second = first.clone();
    assert_eq!(first.next(), "run-1");
    assert_eq!(second.next(), "run-2");
    assert_eq!(first.next(), "run-3");
}
