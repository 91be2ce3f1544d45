//! Binary format edge cases exercised through the public API.

use owlex::trie::{BuildOptions, Trie, TrieFormat};
use owlex::Error;

use crate::common::synthetic_keys;

fn build(keys: Vec<String>) -> Trie {
    Trie::build(keys, &BuildOptions::default()).unwrap()
}

#[test]
fn v8_differs_from_v7_only_by_the_compressed_payload() {
    let trie = build(synthetic_keys(500));
    let v7 = trie.to_bytes(TrieFormat::V7).unwrap();
    let v8 = trie.to_bytes(TrieFormat::V8).unwrap();
    // Shared header prefix, apart from version and flag bytes.
    assert_eq!(&v7[..6], &v8[..6]);
    assert_eq!(&v7[8..16], &v8[8..16]); // word + node counts
    assert_eq!(&v7[20..24], &v8[20..24]); // tail size
    // Both parse to the same structure.
    assert_eq!(
        Trie::from_bytes(&v7).unwrap(),
        Trie::from_bytes(&v8).unwrap()
    );
}

#[test]
fn v8_compresses_redundant_key_sets() {
    let trie = build(synthetic_keys(2000));
    let v7 = trie.to_bytes(TrieFormat::V7).unwrap();
    let v8 = trie.to_bytes(TrieFormat::V8).unwrap();
    assert!(
        v8.len() < v7.len(),
        "brotli should shrink {} bytes, got {}",
        v7.len(),
        v8.len()
    );
}

#[test]
fn nested_tail_trie_must_be_uncompressed() {
    // Hand-build a v7 file whose tail blob claims v8: find the nested
    // header by its magic and flip its version+flag.
    let trie = build(vec!["abcdefgh".to_string(), "abcdefxy".to_string()]);
    let mut bytes = trie.to_bytes(TrieFormat::V7).unwrap();
    let nested = bytes[24..]
        .windows(6)
        .position(|w| w == b"OWTRIE")
        .map(|p| p + 24)
        .expect("tail trie present for chained keys");
    bytes[nested + 6] = 8; // version
    bytes[nested + 16] |= 0x20; // BROTLI flag
    assert!(matches!(Trie::from_bytes(&bytes), Err(Error::Format(_))));
}

#[test]
fn single_key_and_single_char_keys() {
    for keys in [vec!["a".to_string()], vec!["a".to_string(), "b".to_string()]] {
        let trie = build(keys.clone());
        let bytes = trie.to_bytes(TrieFormat::V7).unwrap();
        let back = Trie::from_bytes(&bytes).unwrap();
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(back.word_id(k), Some(i as u32));
        }
    }
}

#[test]
fn garbage_input_is_rejected_not_panicked() {
    assert!(Trie::from_bytes(&[]).is_err());
    assert!(Trie::from_bytes(b"OWTRIE").is_err());
    assert!(Trie::from_bytes(&[0u8; 64]).is_err());
    let mut junk = b"OWTRIE".to_vec();
    junk.extend_from_slice(&[7, 0]);
    junk.extend_from_slice(&[0xFF; 40]);
    assert!(Trie::from_bytes(&junk).is_err());
}

#[test]
fn empty_key_set_roundtrips_to_a_root_only_trie() {
    let trie = build(Vec::new());
    let bytes = trie.to_bytes(TrieFormat::V7).unwrap();
    let back = Trie::from_bytes(&bytes).unwrap();
    assert_eq!(back.word_count(), 0);
    assert_eq!(back.node_count(), 1);
    assert_eq!(back.key_of_id(0), None);
    assert!(back.enumerate_prefix("", 10).is_empty());
    assert!(back.next_letters("").is_empty());
}

#[test]
fn deeper_tail_recursion_is_a_knob() {
    let keys = synthetic_keys(300);
    for depth in [0, 1, 2, 3] {
        let opts = BuildOptions {
            depth,
            ..BuildOptions::default()
        };
        let trie = Trie::build(keys.clone(), &opts).unwrap();
        let back = Trie::from_bytes(&trie.to_bytes(TrieFormat::V7).unwrap()).unwrap();
        for k in &keys {
            assert!(back.contains(k), "depth {} lost {}", depth, k);
        }
        assert_eq!(back.word_count(), keys.len() as u32);
    }
}
