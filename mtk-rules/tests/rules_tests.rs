//! Rule set loading and batch execution tests

mod helpers;

use helpers::{TrackTags, ALBUM_CLEAN};
use mtk_rules::{Condition, Operand, Operation, Rule, Rules, RulesError};
use std::fs;
use tempfile::TempDir;

const TEST_RULES: &str = include_str!("fixtures/test_rules.json");

fn test_rules() -> Rules {
    Rules::new(TEST_RULES).unwrap()
}

#[test]
fn test_load_rules_list() {
    let rules = test_rules();

    assert_eq!(rules.len(), 2);
    assert!(rules.rules().iter().all(|rule| rule.name().is_some()));
}

#[test]
fn test_blank_blob_yields_empty_set() {
    assert!(Rules::new("").unwrap().is_empty());
    assert!(Rules::new("  \n ").unwrap().is_empty());
    assert!(Rules::new("[]").unwrap().is_empty());
}

#[test]
fn test_malformed_blob_is_an_error() {
    let result = Rules::new("[{ \"subject\": \"Album\", ");
    assert!(matches!(result, Err(RulesError::Parse(_))));

    let result = Rules::new(r#"{ "subject": "Album", "condition": "Equals" }"#);
    assert!(matches!(result, Err(RulesError::Parse(_))));
}

#[test]
fn test_get_by_name_ignores_case() {
    let rules = test_rules();

    let rule = rules.get_by_name("RemoveDiscFromAlbum").unwrap();
    assert_eq!(rule.condition(), Condition::ContainsRegex);

    assert!(rules.get_by_name("removediscfromalbum").is_some());
    assert!(rules.get_by_name("REPLACEVARIOUSARTISTS").is_some());
    assert!(rules.get_by_name("NoSuchRule").is_none());
}

#[test]
fn test_get_by_name_skips_chained_rules() {
    let rules = Rules::from_rules(vec![Rule::new(
        "Artists",
        Condition::NotEmpty,
        Operand::default(),
        Operation::None,
    )
    .with_chain(
        mtk_rules::Chain::And,
        Rule::new("Album", Condition::NotEmpty, Operand::default(), Operation::None)
            .with_name("Inner"),
    )]);

    assert!(rules.get_by_name("Inner").is_none());
}

#[test]
fn test_run_rule_by_name() {
    let rules = test_rules();
    let mut tags = TrackTags::sample();

    let rule = rules.get_by_name("RemoveDiscFromAlbum").unwrap();
    assert!(rule.run(&mut tags));
    assert_eq!(tags.album, ALBUM_CLEAN);

    let rule = rules.get_by_name("ReplaceVariousArtists").unwrap();
    assert!(rule.run(&mut tags));
    assert_eq!(tags.artists[0], "The Solos");
}

#[test]
fn test_each_default_rule_applies() {
    let rules = test_rules();
    let mut tags = TrackTags::sample();

    for (index, rule) in rules.rules().iter().enumerate() {
        assert!(rule.run(&mut tags), "rule {} did not apply", index);
    }

    assert_eq!(tags.album, ALBUM_CLEAN);
    assert_eq!(tags.artists[0], "The Solos");
}

#[test]
fn test_run_all_applies_every_rule() {
    let rules = test_rules();
    let mut tags = TrackTags::sample();

    assert!(rules.run_all(&mut tags));
    assert_eq!(tags.album, ALBUM_CLEAN);
    assert_eq!(tags.artists, vec!["The Solos".to_string()]);

    // Everything is normalized now
    assert!(!rules.run_all(&mut tags));
}

#[test]
fn test_run_all_continues_after_non_matching_rule() {
    let rules = test_rules();
    let mut tags = TrackTags {
        album: "Den Bosh".into(),
        ..TrackTags::sample()
    };

    assert!(rules.run_all(&mut tags));
    assert_eq!(tags.album, "Den Bosh");
    assert_eq!(tags.artists[0], "The Solos");
}

#[test]
fn test_run_all_on_empty_set() {
    let rules = Rules::default();
    let mut tags = TrackTags::sample();

    assert!(!rules.run_all(&mut tags));
    assert_eq!(tags, TrackTags::sample());
}

#[test]
fn test_push_appends_after_existing_rules() {
    let mut rules = test_rules();
    let mut tags = TrackTags::sample();
    rules.run_all(&mut tags);

    rules.push(
        Rule::new("Album", Condition::Equals, Operand::literal(ALBUM_CLEAN), Operation::Replace)
            .with_replacement(Operand::literal("What It Is!"))
            .with_name("ShortenAlbum"),
    );

    assert_eq!(rules.len(), 3);
    assert!(rules.run_all(&mut tags));
    assert_eq!(tags.album, "What It Is!");
}

#[test]
fn test_validate_rule_set() {
    assert!(test_rules().validate().is_ok());

    let rules =
        Rules::new(r#"[{ "name": "Fuzzy", "subject": "Album", "condition": "Matches" }]"#)
            .unwrap();
    match rules.validate() {
        Err(RulesError::Unimplemented { rule, .. }) => assert_eq!(rule, "Fuzzy"),
        other => panic!("expected Unimplemented, got {:?}", other),
    }
}

#[test]
fn test_to_json_reloads_to_same_rules() {
    let rules = test_rules();
    let json = rules.to_json().unwrap();

    assert!(json.contains("RemoveDiscFromAlbum"));
    assert_eq!(Rules::new(&json).unwrap(), rules);
}

#[test]
fn test_to_json_refuses_rule_it_cannot_describe() {
    let rules = Rules::from_rules(vec![Rule::new(
        "Artists",
        Condition::Equals,
        Operand::literal("Various Artists"),
        Operation::Replace,
    )
    .with_replacement(Operand::field("Performers"))
    .with_name("ArtistFromPerformer")]);

    // The rule itself works on the record
    let mut tags = TrackTags::sample();
    assert!(rules.run_all(&mut tags));
    assert_eq!(tags.artists[0], "The Solos");

    match rules.to_json() {
        Err(RulesError::InvalidRule { rule, .. }) => assert_eq!(rule, "ArtistFromPerformer"),
        other => panic!("expected InvalidRule, got {:?}", other),
    }
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rules.json");
    fs::write(&path, TEST_RULES).unwrap();

    let rules = Rules::load(&path).unwrap();
    assert_eq!(rules.len(), 2);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = Rules::load(&temp_dir.path().join("missing.json"));

    assert!(matches!(result, Err(RulesError::Io(_))));
}

#[test]
fn test_shared_across_threads() {
    let rules = std::sync::Arc::new(test_rules());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let rules = rules.clone();
            std::thread::spawn(move || {
                let mut tags = TrackTags::sample();
                rules.run_all(&mut tags);
                tags
            })
        })
        .collect();

    for handle in handles {
        let tags = handle.join().unwrap();
        assert_eq!(tags.album, ALBUM_CLEAN);
        assert_eq!(tags.artists[0], "The Solos");
    }
}
