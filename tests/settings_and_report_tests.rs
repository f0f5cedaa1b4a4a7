use treecopy::config::{CopySettings, DEFAULT_MAX_OUTPUT_BYTES};
use treecopy::reporting::{format_size, render_tree};
use treecopy::trie::SizeTrie;

#[test]
fn test_defaults() {
    let settings = CopySettings::default();
    assert_eq!(settings.max_output_bytes, DEFAULT_MAX_OUTPUT_BYTES);
    assert_eq!(settings.max_output_bytes, 1_000_000);
    assert!(settings.skip_likely_binary);
    assert!(settings.ignore_names.contains(&"node_modules".to_string()));
}

#[test]
fn test_settings_json_uses_camel_case_keys() {
    let settings = CopySettings::from_json(
        r#"{ "ignoreNames": ["vendor", "*.log"], "maxOutputBytes": 42, "skipLikelyBinary": false }"#,
    )
    .unwrap();

    assert_eq!(settings.ignore_names, vec!["vendor", "*.log"]);
    assert_eq!(settings.max_output_bytes, 42);
    assert!(!settings.skip_likely_binary);
}

#[test]
fn test_missing_settings_keys_take_defaults() {
    let settings = CopySettings::from_json(r#"{ "maxOutputBytes": 5 }"#).unwrap();

    assert_eq!(settings.max_output_bytes, 5);
    assert!(settings.skip_likely_binary);
    assert_eq!(settings.ignore_names, CopySettings::default().ignore_names);
}

#[test]
fn test_malformed_settings_are_a_config_error() {
    let result = CopySettings::from_json("{ not json");
    assert!(matches!(
        result,
        Err(treecopy::errors::CopyError::ConfigError(_))
    ));
}

#[tokio::test]
async fn test_load_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    tokio::fs::write(&path, r#"{ "ignoreNames": [] }"#)
        .await
        .unwrap();

    let settings = CopySettings::load(&path).await.unwrap();
    assert!(settings.ignore_names.is_empty());
}

#[test]
fn test_extra_ignores_are_appended_once() {
    let settings = CopySettings::from_json(r#"{ "ignoreNames": ["a"] }"#)
        .unwrap()
        .with_extra_ignores(&["b".to_string(), "a".to_string()]);

    assert_eq!(settings.ignore_names, vec!["a", "b"]);
}

#[test]
fn test_size_tree_sums_directories() {
    let mut trie = SizeTrie::new();
    trie.insert("main.rs", 100);
    trie.insert("src/lib.rs", 2048);
    trie.insert("src/util/mod.rs", 50);

    assert_eq!(trie.root().total_bytes(), 2198);
    assert_eq!(
        render_tree(trie.root(), ""),
        vec![
            "┣━━ main.rs (100 B)",
            "┗━━📂 src (2.0 KB)",
            "     ┣━━ lib.rs (2.0 KB)",
            "     ┗━━📂 util (50 B)",
            "          ┗━━ mod.rs (50 B)",
        ]
    );
}

#[test]
fn test_format_size() {
    assert_eq!(format_size(999), "999 B");
    assert_eq!(format_size(1536), "1.5 KB");
    assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
}
