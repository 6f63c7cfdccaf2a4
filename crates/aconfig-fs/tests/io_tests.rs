use aconfig_fs::{Error, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Flags.java");

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("com/example/flags/Flags.java");

    io::write_text(&path, "class Flags {}").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "class Flags {}");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Keys.java");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Flags.java");

    io::write_atomic(&path, b"content").unwrap();

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Flags.java".to_string()]);
}

#[test]
fn test_read_text_missing_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = io::read_text(&temp.path().join("absent.aconfig")).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err.to_string().contains("absent.aconfig"));
}

#[test]
fn test_read_optional_text_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let read = io::read_optional_text(&temp.path().join("absent.textproto")).unwrap();
    assert!(read.is_none());
}

#[test]
fn test_read_text_directory_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = io::read_text(temp.path()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_write_text_is_visible_through_assert_fs() {
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("out/Keys.java");

    io::write_text(file.path(), "public class Keys {}\n").unwrap();

    file.assert(predicate::path::is_file());
    file.assert(predicate::str::contains("class Keys"));
}
