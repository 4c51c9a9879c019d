mod common;

use anyhow::Result;
use common::TestWorkspace;
use driftcheck::commands::{generate, verify};
use driftcheck::errors::ManifestParseError;
use driftcheck::fingerprint::hash::hash_bytes;
use driftcheck::reconcile::{Mismatch, MismatchKind};

#[test]
fn test_generate_writes_sorted_manifest() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_file("b.txt", "bye")?;
    ws.write_list(&["b.txt", "a.txt"])?;

    let outcome = generate::execute(&ws.context()?)?;

    assert_eq!(outcome.records, 2);
    assert!(outcome.missing.is_empty());
    assert!(outcome.backup.is_none());
    assert_eq!(
        ws.manifest()?,
        format!(
            "a.txt\t{}\t2\nb.txt\t{}\t3",
            hash_bytes(b"hi"),
            hash_bytes(b"bye")
        )
    );
    Ok(())
}

#[test]
fn test_verify_unchanged_is_clean() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_file("b.txt", "bye")?;
    ws.write_list(&["a.txt", "b.txt"])?;
    let ctx = ws.context()?;

    generate::execute(&ctx)?;
    let result = verify::execute(&ctx)?;

    assert!(result.is_clean());
    assert_eq!(result.error_count(), 0);
    Ok(())
}

#[test]
fn test_deleted_file_reported_once() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_file("b.txt", "bye")?;
    ws.write_list(&["a.txt", "b.txt"])?;
    let ctx = ws.context()?;

    generate::execute(&ctx)?;
    ws.remove_file("b.txt")?;
    let result = verify::check(&ctx)?;

    assert_eq!(result.missing_on_disk, vec!["b.txt"]);
    assert!(result.unexpected_on_disk.is_empty());
    assert!(result.mismatches.is_empty());
    assert_eq!(result.error_count(), 1);
    Ok(())
}

#[test]
fn test_same_size_edit_is_checksum_only() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt"])?;
    let ctx = ws.context()?;

    generate::execute(&ctx)?;
    ws.write_file("a.txt", "ho")?;
    let result = verify::check(&ctx)?;

    assert_eq!(
        result.mismatches,
        vec![Mismatch {
            path: "a.txt".to_string(),
            kinds: vec![MismatchKind::Checksum],
        }]
    );
    assert_eq!(result.error_count(), 1);
    Ok(())
}

#[test]
fn test_content_and_size_change_counts_once() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt"])?;
    let ctx = ws.context()?;

    generate::execute(&ctx)?;
    ws.write_file("a.txt", "hello there")?;
    let result = verify::check(&ctx)?;

    assert_eq!(result.mismatches.len(), 1);
    assert_eq!(
        result.mismatches[0].kinds,
        vec![MismatchKind::Checksum, MismatchKind::Size]
    );
    assert_eq!(result.error_count(), 1);
    Ok(())
}

#[test]
fn test_new_listed_file_is_unexpected() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt"])?;
    let ctx = ws.context()?;

    generate::execute(&ctx)?;
    ws.write_file("c.txt", "fresh")?;
    ws.write_list(&["a.txt", "c.txt"])?;
    let result = verify::check(&ctx)?;

    assert_eq!(result.unexpected_on_disk, vec!["c.txt"]);
    assert_eq!(result.error_count(), 1);
    Ok(())
}

#[test]
fn test_missing_at_generation_is_left_out() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt", "ghost.txt"])?;
    let ctx = ws.context()?;

    let outcome = generate::execute(&ctx)?;
    assert_eq!(outcome.missing, vec!["ghost.txt"]);
    assert!(!ws.manifest()?.contains("ghost.txt"));

    // Absent from both the manifest and the disk: nothing to report.
    assert!(verify::check(&ctx)?.is_clean());
    Ok(())
}

#[test]
fn test_duplicate_list_entries_collapse() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt", "  a.txt  ", "", "a.txt"])?;
    let ctx = ws.context()?;

    generate::execute(&ctx)?;
    assert!(verify::check(&ctx)?.is_clean());
    Ok(())
}

#[test]
fn test_regenerate_rotates_previous_manifest() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt"])?;
    let ctx = ws.context()?;

    generate::execute(&ctx)?;
    let first = ws.manifest()?;
    ws.write_file("a.txt", "changed")?;
    let outcome = generate::execute(&ctx)?;

    let backup = outcome.backup.expect("previous manifest should be kept");
    assert_eq!(std::fs::read_to_string(&backup)?, first);
    assert_eq!(ws.backups()?, vec![backup]);
    assert_ne!(ws.manifest()?, first);
    assert!(verify::check(&ctx)?.is_clean());
    Ok(())
}

#[test]
fn test_verify_without_manifest_fails() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_list(&["a.txt"])?;

    let err = verify::check(&ws.context()?).unwrap_err();
    assert!(err.to_string().contains("Manifest not found"));
    Ok(())
}

#[test]
fn test_generate_without_file_list_fails() -> Result<()> {
    let ws = TestWorkspace::new()?;

    let err = generate::execute(&ws.context()?).unwrap_err();
    assert!(err.to_string().contains("Failed to read file list"));
    assert!(!ws.manifest_path().exists());
    Ok(())
}

#[test]
fn test_malformed_manifest_is_fatal() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt"])?;
    std::fs::write(ws.manifest_path(), "a.txt\tonly-two-fields\n")?;

    let err = verify::check(&ws.context()?).unwrap_err();
    let parse = err
        .downcast_ref::<ManifestParseError>()
        .expect("parse error should be preserved");
    assert_eq!(parse.line_number, 1);
    Ok(())
}

#[test]
fn test_handwritten_manifest_with_trailing_newline() -> Result<()> {
    let ws = TestWorkspace::new()?;
    ws.write_file("a.txt", "hi")?;
    ws.write_list(&["a.txt"])?;
    std::fs::write(
        ws.manifest_path(),
        format!("a.txt\t{}\t2\n\n", hash_bytes(b"hi")),
    )?;

    assert!(verify::check(&ws.context()?)?.is_clean());
    Ok(())
}
