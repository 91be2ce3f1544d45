//! End-to-end scan runs over synthetic dumps, compressed and plain.

use std::fs;
use std::io::Write;
use std::path::Path;

use bzip2::write::BzEncoder;
use bzip2::Compression;

use owlex::{run_scan, Entry, ScanOptions};

use crate::common::{dump_xml, page_xml};

fn write_bz2(path: &Path, xml: &str) {
    let file = fs::File::create(path).unwrap();
    let mut encoder = BzEncoder::new(file, Compression::best());
    encoder.write_all(xml.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

fn read_entries(path: &Path) -> Vec<Entry> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn fixture_dump() -> String {
    dump_xml(&[
        page_xml(
            "dictionary",
            0,
            "==English==\n===Noun===\n{{en-noun}}\n{{hyphenation|en|dic|tion|a|ry}}",
        ),
        page_xml("Wiktionary:Welcome", 4, "==English==\nwelcome text"),
        page_xml("woordenboek", 0, "==Dutch==\n===Noun===\n{{nl-noun}}"),
        page_xml("olde", 0, "#REDIRECT [[old]]"),
        page_xml("слово", 0, "==English==\n===Noun===\n{{en-noun}}"),
        page_xml(
            "kick the bucket",
            0,
            "==English==\n===Verb===\n{{en-verb}}\n{{lb|en|informal}}",
        ),
    ])
}

#[test]
fn scan_compressed_dump_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml.bz2");
    let out = dir.path().join("entries.jsonl");
    write_bz2(&dump, &fixture_dump());

    let stats = run_scan(&dump, &out, &ScanOptions::default()).unwrap();

    assert_eq!(stats.pages, 6);
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.reject_namespace, 1);
    assert_eq!(stats.reject_language, 1);
    assert_eq!(stats.reject_redirect, 1);
    assert_eq!(stats.reject_script, 1);
    assert_eq!(stats.reject_dict_only, 0);

    let entries = read_entries(&out);
    assert_eq!(entries.len(), 2);

    let dict = &entries[0];
    assert_eq!(dict.word, "dictionary");
    assert_eq!(dict.pos, vec!["noun"]);
    assert_eq!(dict.syllables, Some(4));
    assert_eq!(dict.sources, vec!["wikt"]);

    let phrase = &entries[1];
    assert_eq!(phrase.word, "kick the bucket");
    assert!(phrase.is_phrase);
    assert!(phrase.is_informal);
}

#[test]
fn scan_accepts_plain_xml_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml");
    let out = dir.path().join("entries.jsonl");
    fs::write(&dump, fixture_dump()).unwrap();

    let stats = run_scan(&dump, &out, &ScanOptions::default()).unwrap();
    assert_eq!(stats.entries, 2);
}

#[test]
fn limit_stops_after_n_entries() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml");
    let out = dir.path().join("entries.jsonl");
    fs::write(&dump, fixture_dump()).unwrap();

    let opts = ScanOptions {
        limit: Some(1),
        ..ScanOptions::default()
    };
    let stats = run_scan(&dump, &out, &opts).unwrap();
    assert_eq!(stats.entries, 1);
    assert_eq!(read_entries(&out).len(), 1);
}

#[test]
fn diagnostic_mode_accepts_truncated_text() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml");
    let out = dir.path().join("entries.jsonl");
    // Final page loses its </text> and everything after.
    let xml = "<mediawiki><page><title>cut</title><ns>0</ns>\
               <text xml:space=\"preserve\">==English==\n===Noun===\n{{en-noun}}";
    fs::write(&dump, xml).unwrap();

    let opts = ScanOptions {
        diagnostic: true,
        ..ScanOptions::default()
    };
    let stats = run_scan(&dump, &out, &opts).unwrap();
    assert_eq!(stats.entries, 1);
    assert_eq!(read_entries(&out)[0].word, "cut");

    // Production path drops the same page as malformed.
    let out2 = dir.path().join("entries2.jsonl");
    let stats = run_scan(&dump, &out2, &ScanOptions::default()).unwrap();
    assert_eq!(stats.entries, 0);
    assert_eq!(stats.malformed_pages, 1);
}

#[test]
fn parallel_configuration_produces_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml");
    fs::write(&dump, fixture_dump()).unwrap();

    let serial_out = dir.path().join("serial.jsonl");
    run_scan(&dump, &serial_out, &ScanOptions::default()).unwrap();

    let parallel_out = dir.path().join("parallel.jsonl");
    let opts = ScanOptions {
        parallelism: 4,
        ..ScanOptions::default()
    };
    run_scan(&dump, &parallel_out, &opts).unwrap();

    assert_eq!(
        fs::read_to_string(&serial_out).unwrap(),
        fs::read_to_string(&parallel_out).unwrap()
    );
}

#[test]
fn failed_scan_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml.bz2");
    let out = dir.path().join("entries.jsonl");
    fs::write(&dump, b"this is not a bzip2 stream").unwrap();

    assert!(run_scan(&dump, &out, &ScanOptions::default()).is_err());
    assert!(!out.exists());
    assert!(fs::read_dir(dir.path())
        .unwrap()
        .all(|e| !e.unwrap().file_name().to_string_lossy().ends_with(".tmp")));
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("entries.jsonl");
    let err = run_scan(&dir.path().join("absent.xml.bz2"), &out, &ScanOptions::default());
    assert!(matches!(err, Err(owlex::Error::Io(_))));
    assert!(!out.exists());
}

#[test]
fn cancellation_aborts_without_output() {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.xml");
    let out = dir.path().join("entries.jsonl");
    fs::write(&dump, fixture_dump()).unwrap();

    let opts = ScanOptions {
        cancel: Some(Arc::new(AtomicBool::new(true))),
        ..ScanOptions::default()
    };
    assert!(matches!(
        run_scan(&dump, &out, &opts),
        Err(owlex::Error::Cancelled)
    ));
    assert!(!out.exists());
}
