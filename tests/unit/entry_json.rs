//! JSONL entry record conformance: one object per line, required `word`,
//! empty fields omitted, canonical reserialization.

use owlex::{Entry, Extractor, Morphology};

fn extract(title: &str, section: &str) -> Entry {
    let ex = Extractor::new("English", "en");
    ex.extract(title, section).0
}

#[test]
fn word_is_the_only_required_field() {
    let entry = extract("bare", "nothing recognizable here");
    let value: serde_json::Value = serde_json::to_value(&entry).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj["word"], "bare");
    assert!(!obj.contains_key("pos"));
    assert!(!obj.contains_key("labels"));
    assert!(!obj.contains_key("syllables"));
    assert!(!obj.contains_key("morphology"));
    assert!(obj.keys().all(|k| !k.starts_with("is_")));
}

#[test]
fn label_object_uses_the_four_category_keys() {
    let entry = extract(
        "x",
        "{{lb|en|slang|archaic|law|US}}",
    );
    let value = serde_json::to_value(&entry).unwrap();
    let labels = value["labels"].as_object().unwrap();
    assert_eq!(labels["register"][0], "slang");
    assert_eq!(labels["temporal"][0], "archaic");
    assert_eq!(labels["domain"][0], "law");
    assert_eq!(labels["region"][0], "en-us");
    for key in labels.keys() {
        assert!(matches!(
            key.as_str(),
            "register" | "temporal" | "domain" | "region"
        ));
    }
}

#[test]
fn absent_and_empty_are_equivalent_for_readers() {
    let explicit: Entry = serde_json::from_str(
        r#"{"word":"w","pos":[],"sources":["wikt"]}"#,
    )
    .unwrap();
    let omitted: Entry = serde_json::from_str(r#"{"word":"w","sources":["wikt"]}"#).unwrap();
    assert_eq!(explicit, omitted);
}

#[test]
fn morphology_shapes_match_their_kinds() {
    let entry = extract(
        "friendship",
        "===Etymology===\n{{suffix|en|friend|ship}}\n===Noun===\n{{en-noun}}",
    );
    assert_eq!(
        entry.morphology,
        Some(Morphology::Suffixed {
            base: Some("friend".to_string()),
            suffixes: vec!["-ship".to_string()],
        })
    );
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["morphology"]["kind"], "suffixed");
}

#[test]
fn reparse_then_reserialize_is_canonical() {
    let entry = extract(
        "hand-work",
        "===Noun===\n{{en-noun}}\n{{lb|en|rare|British}}\n\
         {{hyphenation|en|hand|work}}\n\
         [[Category:English 2-syllable words]]",
    );
    let line = serde_json::to_string(&entry).unwrap();
    assert!(!line.contains('\n'));
    let back: Entry = serde_json::from_str(&line).unwrap();
    assert_eq!(back, entry);
    assert_eq!(serde_json::to_string(&back).unwrap(), line);
}

#[test]
fn flags_follow_label_state() {
    let entry = extract(
        "old word",
        "===Noun===\n{{en-noun}}\n{{lb|en|archaic|vulgar|British}}",
    );
    assert!(entry.is_phrase);
    assert!(entry.is_archaic);
    assert!(entry.is_vulgar);
    assert!(entry.is_regional);
    assert!(!entry.is_rare);
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["is_archaic"], true);
    assert!(value.get("is_rare").is_none());
}
