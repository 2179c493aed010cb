//! Integration tests for sample data preparation.
//!
//! Tests cover:
//! - Reading and splitting a dump file
//! - Writing statements as text and JSON
//! - Copying the media tree

use magento_installer::core::sample::{
    copy_media, prepare_statements, write_statements, write_statements_json,
};
use magento_installer::utils::fs::copy_tree;
use magento_installer::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ========== STATEMENT TESTS ==========

#[test]
fn test_prepare_statements_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let dump = temp_dir.path().join("magento_sample_data.sql");
    fs::write(
        &dump,
        "# sample\nCREATE TABLE t (v TEXT);\nINSERT INTO t VALUES ('a;b');\n",
    )
    .unwrap();

    let report = prepare_statements(&dump, ';').unwrap();

    assert_eq!(
        report.statements,
        vec!["\nCREATE TABLE t (v TEXT)", "\nINSERT INTO t VALUES ('a;b')"]
    );
}

#[test]
fn test_prepare_statements_missing_dump() {
    let result = prepare_statements(&PathBuf::from("/nonexistent/dump.sql"), ';');
    assert!(result.is_err());
}

#[test]
fn test_prepare_statements_rejects_non_utf8_dump() {
    let temp_dir = TempDir::new().unwrap();
    let dump = temp_dir.path().join("latin1.sql");
    fs::write(&dump, b"INSERT INTO t VALUES ('caf\xe9');\n").unwrap();

    match prepare_statements(&dump, ';') {
        Err(Error::Other(msg)) => {
            assert!(msg.contains("latin1.sql"));
            assert!(msg.contains("UTF-8"));
            assert!(msg.contains("offset 26"));
        }
        other => panic!("expected encoding error, got {:?}", other),
    }
}

#[test]
fn test_write_statements_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("nested").join("out.sql");
    let statements = vec!["SELECT 1".to_string(), "\nSELECT 'a;b'".to_string()];

    write_statements(&statements, ';', &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "SELECT 1;\nSELECT 'a;b';\n");
}

#[test]
fn test_write_statements_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.json");
    let statements = vec!["SELECT 1".to_string(), "SELECT 2".to_string()];

    write_statements_json(&statements, &output).unwrap();

    let loaded: Vec<String> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(loaded, statements);
}

// ========== MEDIA COPY TESTS ==========

#[test]
fn test_copy_media_tree() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("sample").join("media");
    let nested = source.join("catalog").join("product").join("a");
    fs::create_dir_all(&nested).unwrap();
    fs::create_dir_all(source.join("empty")).unwrap();
    fs::write(source.join("logo.png"), "png").unwrap();
    fs::write(nested.join("shirt.jpg"), "jpeg").unwrap();

    let dest = temp_dir.path().join("magento").join("media");
    let stats = copy_media(&source, &dest).unwrap();

    assert_eq!(stats.files, 2);
    assert_eq!(stats.directories, 4);
    assert_eq!(stats.bytes, 7);
    assert_eq!(fs::read_to_string(dest.join("logo.png")).unwrap(), "png");
    assert_eq!(
        fs::read_to_string(dest.join("catalog/product/a/shirt.jpg")).unwrap(),
        "jpeg"
    );
    assert!(dest.join("empty").is_dir());
}

#[test]
fn test_copy_tree_into_existing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    let dest = temp_dir.path().join("dest");
    fs::create_dir_all(source.join("sub")).unwrap();
    fs::create_dir_all(dest.join("sub")).unwrap();
    fs::write(source.join("sub").join("file.txt"), "new").unwrap();
    fs::write(dest.join("sub").join("file.txt"), "old").unwrap();

    let mut visited = Vec::new();
    let stats = copy_tree(&source, &dest, |p| visited.push(p.to_path_buf())).unwrap();

    assert_eq!(stats.files, 1);
    assert_eq!(visited.len(), 2);
    assert_eq!(fs::read_to_string(dest.join("sub/file.txt")).unwrap(), "new");
}

#[test]
fn test_copy_tree_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let result = copy_tree(
        &temp_dir.path().join("missing"),
        &temp_dir.path().join("dest"),
        |_| {},
    );
    assert!(result.is_err());
}
