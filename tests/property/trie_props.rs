//! Trie invariants over arbitrary key sets: word-id bijection, membership
//! equivalence, lexicographic prefix enumeration, deterministic bytes.

use std::collections::BTreeSet;

use proptest::prelude::*;

use owlex::trie::{BuildOptions, Trie, TrieFormat};

fn key_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-e]{1,8}", 0..60)
}

fn build(keys: &BTreeSet<String>) -> Trie {
    Trie::build(keys.iter().cloned().collect(), &BuildOptions::default()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: word_id is a bijection between the key set and 0..N-1,
    /// and key_of_id inverts it.
    #[test]
    fn prop_word_id_bijection(keys in key_set()) {
        let trie = build(&keys);
        prop_assert_eq!(trie.word_count() as usize, keys.len());
        let mut ids: Vec<u32> = Vec::new();
        for k in &keys {
            let id = trie.word_id(k).expect("member key must have an id");
            prop_assert!((id as usize) < keys.len());
            let key_of_id = trie.key_of_id(id);
            prop_assert_eq!(key_of_id.as_deref(), Some(k.as_str()));
            ids.push(id);
        }
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), keys.len());
    }

    /// Property: contains(k) exactly reflects set membership, including
    /// for prefixes and extensions of member keys.
    #[test]
    fn prop_membership(keys in key_set(), probes in prop::collection::vec("[a-f]{0,9}", 0..40)) {
        let trie = build(&keys);
        for k in &keys {
            prop_assert!(trie.contains(k));
        }
        for p in &probes {
            prop_assert_eq!(trie.contains(p), keys.contains(p), "probe {}", p);
        }
        // Near-misses derived from members.
        for k in keys.iter().take(10) {
            let shorter: String = k.chars().take(k.chars().count() - 1).collect();
            prop_assert_eq!(trie.contains(&shorter), keys.contains(&shorter));
            let longer = format!("{}z", k);
            prop_assert_eq!(trie.contains(&longer), keys.contains(&longer));
        }
    }

    /// Property: prefix enumeration equals the filtered key set in
    /// lexicographic order.
    #[test]
    fn prop_prefix_enumeration(keys in key_set(), prefix in "[a-e]{0,3}") {
        let trie = build(&keys);
        let expected: Vec<String> = keys
            .iter()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect(); // BTreeSet iterates lexicographically
        prop_assert_eq!(trie.enumerate_prefix(&prefix, usize::MAX), expected);
    }

    /// Property: the limit bounds enumeration without reordering it.
    #[test]
    fn prop_prefix_limit(keys in key_set(), limit in 0usize..10) {
        let trie = build(&keys);
        let full = trie.enumerate_prefix("", usize::MAX);
        let bounded = trie.enumerate_prefix("", limit);
        prop_assert_eq!(&bounded[..], &full[..limit.min(full.len())]);
    }

    /// Property: next_letters lists exactly the distinct continuation code
    /// points of matching keys.
    #[test]
    fn prop_next_letters(keys in key_set(), prefix in "[a-e]{0,3}") {
        let trie = build(&keys);
        let expected: BTreeSet<char> = keys
            .iter()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter_map(|rest| rest.chars().next())
            .collect();
        let got: BTreeSet<char> = trie.next_letters(&prefix).into_iter().collect();
        // A prefix with no matching keys descends nowhere; both are empty.
        prop_assert_eq!(got, expected);
    }

    /// Property: build is deterministic and v7 serialization is
    /// byte-identical across runs; v8 decompresses to the same structure.
    #[test]
    fn prop_deterministic_serialization(keys in key_set()) {
        let a = build(&keys);
        let b = build(&keys);
        let bytes_a = a.to_bytes(TrieFormat::V7).unwrap();
        let bytes_b = b.to_bytes(TrieFormat::V7).unwrap();
        prop_assert_eq!(&bytes_a, &bytes_b);
        let reloaded = Trie::from_bytes(&bytes_a).unwrap();
        let via_v8 = Trie::from_bytes(&a.to_bytes(TrieFormat::V8).unwrap()).unwrap();
        prop_assert_eq!(&reloaded, &via_v8);
        for k in &keys {
            prop_assert_eq!(reloaded.word_id(k), a.word_id(k));
        }
    }
}
