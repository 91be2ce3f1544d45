//! Wordlist file → serialized trie file → loaded queries.

use std::fs;

use owlex::trie::{run_build_trie, BuildOptions, Trie, TrieFormat};
use owlex::Error;

use crate::common::synthetic_keys;

#[test]
fn build_trie_file_roundtrip_v7_and_v8() {
    let dir = tempfile::tempdir().unwrap();
    let keys = synthetic_keys(800);
    let wordlist = dir.path().join("wordlist.txt");
    fs::write(&wordlist, keys.join("\n")).unwrap();

    for format in [TrieFormat::V7, TrieFormat::V8] {
        let out = dir.path().join(format!("words-{:?}.trie", format));
        run_build_trie(&wordlist, &out, format, &BuildOptions::default()).unwrap();

        let trie = Trie::from_bytes(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(trie.word_count() as usize, keys.len());
        for k in &keys {
            assert!(trie.contains(k), "{:?} lost {}", format, k);
        }
        assert!(!trie.contains("definitely-absent"));
    }
}

#[test]
fn trailing_newline_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let wordlist = dir.path().join("wordlist.txt");
    fs::write(&wordlist, "ant\nbee\ncat\n").unwrap();
    let out = dir.path().join("words.trie");
    run_build_trie(&wordlist, &out, TrieFormat::V7, &BuildOptions::default()).unwrap();
    let trie = Trie::from_bytes(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(trie.word_count(), 3);
}

#[test]
fn empty_lines_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let wordlist = dir.path().join("wordlist.txt");
    fs::write(&wordlist, "ant\n\nbee\n").unwrap();
    let out = dir.path().join("words.trie");
    let err = run_build_trie(&wordlist, &out, TrieFormat::V7, &BuildOptions::default());
    assert!(matches!(err, Err(Error::Format(_))));
    assert!(!out.exists());
}

#[test]
fn word_ids_are_stable_for_a_fixed_key_set() {
    let dir = tempfile::tempdir().unwrap();
    let keys = synthetic_keys(300);
    let wordlist = dir.path().join("wordlist.txt");
    fs::write(&wordlist, keys.join("\n")).unwrap();

    let out_a = dir.path().join("a.trie");
    let out_b = dir.path().join("b.trie");
    run_build_trie(&wordlist, &out_a, TrieFormat::V7, &BuildOptions::default()).unwrap();
    run_build_trie(&wordlist, &out_b, TrieFormat::V7, &BuildOptions::default()).unwrap();
    assert_eq!(fs::read(&out_a).unwrap(), fs::read(&out_b).unwrap());

    let trie = Trie::from_bytes(&fs::read(&out_a).unwrap()).unwrap();
    for id in 0..trie.word_count() {
        let key = trie.key_of_id(id).unwrap();
        assert_eq!(trie.word_id(&key), Some(id));
    }
}

#[test]
fn prefix_queries_serve_from_the_loaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let wordlist = dir.path().join("wordlist.txt");
    fs::write(&wordlist, "act\nacting\naction\nactor\nrun\nrunning\n").unwrap();
    let out = dir.path().join("words.trie");
    run_build_trie(&wordlist, &out, TrieFormat::V8, &BuildOptions::default()).unwrap();

    let trie = Trie::from_bytes(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(
        trie.enumerate_prefix("act", usize::MAX),
        vec!["act", "acting", "action", "actor"]
    );
    assert_eq!(trie.enumerate_prefix("acti", 1), vec!["acting"]);
    assert_eq!(trie.next_letters("act"), vec!['i', 'o']);
    assert_eq!(trie.next_letters("ru"), vec!['n']);
}
