//! Email tokenization tests
//!
//! Exercise the tokenizer load path over a small word-level tokenizer
//! written to disk, pinning the truncation behavior the email pipeline
//! relies on: inputs within the limit pass through untouched, longer
//! inputs keep their left-to-right prefix, and repeated encodes of the
//! same input are identical.

use phishguard_classifiers::email::load_tokenizer;
use std::path::PathBuf;
use tempfile::TempDir;

/// Whitespace-split vocabulary of ten words plus the unknown token.
fn write_tokenizer(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("tokenizer.json");
    std::fs::write(
        &path,
        r#"{
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": {
                    "[UNK]": 0,
                    "account": 1, "suspended": 2, "click": 3, "here": 4,
                    "to": 5, "verify": 6, "your": 7, "password": 8,
                    "now": 9, "immediately": 10
                },
                "unk_token": "[UNK]"
            }
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn test_short_input_is_not_truncated() {
    let dir = TempDir::new().unwrap();
    let tokenizer = load_tokenizer(&write_tokenizer(&dir), 8).unwrap();

    let encoding = tokenizer.encode("account suspended click here", true).unwrap();
    assert_eq!(encoding.get_ids(), &[1, 2, 3, 4]);
}

#[test]
fn test_long_input_keeps_the_prefix() {
    let dir = TempDir::new().unwrap();
    let path = write_tokenizer(&dir);
    let body = "account suspended click here to verify your password now immediately";

    let full = load_tokenizer(&path, 64).unwrap().encode(body, true).unwrap();
    assert_eq!(full.get_ids().len(), 10);

    let truncated = load_tokenizer(&path, 4).unwrap().encode(body, true).unwrap();
    assert_eq!(truncated.get_ids(), &full.get_ids()[..4]);
}

#[test]
fn test_truncated_encoding_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let tokenizer = load_tokenizer(&write_tokenizer(&dir), 3).unwrap();
    let body = "verify your password now immediately";

    let first = tokenizer.encode(body, true).unwrap();
    assert_eq!(first.get_ids().len(), 3);
    for _ in 0..5 {
        let again = tokenizer.encode(body, true).unwrap();
        assert_eq!(again.get_ids(), first.get_ids());
    }
}

#[test]
fn test_unknown_words_map_to_the_unknown_token() {
    let dir = TempDir::new().unwrap();
    let tokenizer = load_tokenizer(&write_tokenizer(&dir), 8).unwrap();

    let encoding = tokenizer.encode("verify quarterly projections", true).unwrap();
    assert_eq!(encoding.get_ids(), &[6, 0, 0]);
}

#[test]
fn test_missing_tokenizer_file_is_a_load_error() {
    let err = load_tokenizer(std::path::Path::new("/nonexistent/tokenizer.json"), 512).unwrap_err();
    assert!(err.to_string().contains("email tokenizer"), "{err}");
}
