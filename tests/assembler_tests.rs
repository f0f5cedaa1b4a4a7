use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;
use tokio::fs;
use tracing_test::traced_test;
use treecopy::assembler::assemble;
use treecopy::cancel::NeverCancel;
use treecopy::config::CopySettings;
use treecopy::errors::CopyError;
use treecopy::walker::FileRecord;

async fn write_record(root: &Path, relative_path: &str, content: &[u8]) -> FileRecord {
    let path = relative_path
        .split('/')
        .fold(root.to_path_buf(), |p, c| p.join(c));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.unwrap();
    }
    fs::write(&path, content).await.unwrap();
    FileRecord {
        path,
        relative_path: relative_path.to_string(),
    }
}

#[tokio::test]
async fn test_blocks_have_header_and_language_fence() {
    let dir = tempdir().unwrap();
    let records = vec![
        write_record(dir.path(), "src/main.rs", b"fn main() {}").await,
        write_record(dir.path(), "notes.unknownext", b"plain").await,
    ];

    let document = assemble(&records, &CopySettings::default(), &NeverCancel, |_| {})
        .await
        .unwrap();

    let expected = "\n--- file: src/main.rs ---\n```rust\nfn main() {}\n```\n\
                    \n--- file: notes.unknownext ---\n```\nplain\n```\n";
    assert_eq!(document.text, expected);
    assert_eq!(document.total_bytes, expected.len() as u64);
    assert_eq!(document.files_included, 2);
    assert!(!document.cancelled);
}

#[tokio::test]
async fn test_extension_lookup_ignores_case() {
    let dir = tempdir().unwrap();
    let records = vec![write_record(dir.path(), "Config.YML", b"a: 1").await];

    let document = assemble(&records, &CopySettings::default(), &NeverCancel, |_| {})
        .await
        .unwrap();

    assert!(document.text.contains("```yaml\na: 1\n```"));
}

#[tokio::test]
#[traced_test]
async fn test_binary_files_are_skipped_and_not_counted() {
    let dir = tempdir().unwrap();
    let records = vec![
        write_record(dir.path(), "logo.png", &[0x89, b'P', 0, 0, 1]).await,
        write_record(dir.path(), "readme.md", b"# hi").await,
    ];

    let document = assemble(&records, &CopySettings::default(), &NeverCancel, |_| {})
        .await
        .unwrap();

    assert!(!document.text.contains("logo.png"));
    assert!(document.text.contains("--- file: readme.md ---"));
    assert_eq!(document.binary_skipped, 1);
    assert_eq!(document.total_bytes, document.text.len() as u64);
    assert!(logs_contain("Skipping likely binary file logo.png"));
}

#[tokio::test]
async fn test_binary_files_are_kept_when_skipping_is_off() {
    let dir = tempdir().unwrap();
    let records = vec![write_record(dir.path(), "data.txt", b"a\0b").await];
    let settings = CopySettings {
        skip_likely_binary: false,
        ..CopySettings::default()
    };

    let document = assemble(&records, &settings, &NeverCancel, |_| {})
        .await
        .unwrap();

    assert_eq!(document.files_included, 1);
    assert!(document.text.contains("a\0b"));
}

#[tokio::test]
async fn test_invalid_utf8_is_a_decode_error() {
    let dir = tempdir().unwrap();
    let records = vec![write_record(dir.path(), "latin1.txt", &[b'c', b'a', b'f', 0xE9]).await];

    let result = assemble(&records, &CopySettings::default(), &NeverCancel, |_| {}).await;

    assert!(
        matches!(result, Err(CopyError::DecodeError(_))),
        "Expected DecodeError, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_missing_file_aborts_assembly() {
    let dir = tempdir().unwrap();
    let records = vec![FileRecord {
        path: dir.path().join("vanished.txt"),
        relative_path: "vanished.txt".to_string(),
    }];

    let result = assemble(&records, &CopySettings::default(), &NeverCancel, |_| {}).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cancellation_keeps_blocks_assembled_so_far() {
    let dir = tempdir().unwrap();
    let records = vec![
        write_record(dir.path(), "one.txt", b"1").await,
        write_record(dir.path(), "two.txt", b"2").await,
        write_record(dir.path(), "three.txt", b"3").await,
    ];

    let checks = AtomicUsize::new(0);
    let cancel = || checks.fetch_add(1, Ordering::SeqCst) >= 1;

    let document = assemble(&records, &CopySettings::default(), &cancel, |_| {})
        .await
        .unwrap();

    assert!(document.cancelled);
    assert_eq!(document.files_included, 1);
    assert_eq!(document.text, "\n--- file: one.txt ---\n```\n1\n```\n");
}

#[tokio::test]
async fn test_progress_is_reported_every_25_records() {
    let dir = tempdir().unwrap();
    let mut records = Vec::new();
    for i in 0..60 {
        records.push(write_record(dir.path(), &format!("f{:02}.txt", i), b"x").await);
    }

    let mut messages = Vec::new();
    assemble(&records, &CopySettings::default(), &NeverCancel, |m| {
        messages.push(m.to_string())
    })
    .await
    .unwrap();

    assert_eq!(
        messages,
        vec!["processed 25/60", "processed 50/60", "processed 60/60"]
    );
}

#[tokio::test]
async fn test_block_sizes_follow_document_order() {
    let dir = tempdir().unwrap();
    let records = vec![
        write_record(dir.path(), "b.txt", b"bb").await,
        write_record(dir.path(), "a.txt", b"a").await,
    ];

    let document = assemble(&records, &CopySettings::default(), &NeverCancel, |_| {})
        .await
        .unwrap();

    let names: Vec<&str> = document
        .block_sizes
        .iter()
        .map(|(p, _)| p.as_str())
        .collect();
    assert_eq!(names, vec!["b.txt", "a.txt"]);
    let sum: usize = document.block_sizes.iter().map(|(_, n)| n).sum();
    assert_eq!(sum as u64, document.total_bytes);
}
