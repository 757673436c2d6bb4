//! Error handling integration tests.
//!
//! These tests check that each failure stage is reported with the right
//! variant and exit status.

use std::path::Path;

use videoinfo::{InspectError, MediaFile};

#[test]
fn open_nonexistent_file() {
    let result = MediaFile::open("this_file_does_not_exist.mp4");
    let error = result.expect_err("opening a missing file should fail");

    assert!(
        matches!(error, InspectError::Open { .. }),
        "Expected an open failure, got: {error:?}",
    );
    assert_eq!(error.exit_code(), 2);

    let error_message = error.to_string();
    assert!(
        error_message.contains("Failed to open media file"),
        "Error message should mention file open failure: {error_message}",
    );
    assert!(
        error_message.contains("this_file_does_not_exist.mp4"),
        "Error message should name the path: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let error = MediaFile::open(&invalid_file_path).expect_err("Expected error for invalid media file");
    assert!(
        matches!(error, InspectError::Open { .. }),
        "Unrecognised content should fail to open, got: {error:?}",
    );
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn open_empty_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let empty_file_path = temporary_directory.path().join("empty.mkv");
    std::fs::write(&empty_file_path, b"").expect("Failed to write empty file");

    assert!(MediaFile::open(&empty_file_path).is_err());
}

#[test]
fn open_directory() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let result = MediaFile::open(temporary_directory.path());
    assert!(result.is_err(), "A directory is not a media file");
}

#[test]
fn path_with_interior_nul_is_an_open_failure() {
    let result = MediaFile::open(Path::new("bad\0name.mp4"));
    let error = result.expect_err("NUL in path should fail");
    assert!(matches!(error, InspectError::Open { .. }), "{error:?}");
}
