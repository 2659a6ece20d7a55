// system-tests/tests/suites/artifacts.rs
// ============================================================================
// Module: Artifact Reporter Tests
// Description: Offline coverage for summary writing and overwrite protection.
// Purpose: Ensure every test leaves a deterministic summary behind.
// Dependencies: serde_json, tempfile, helpers
// ============================================================================

use std::error::Error;
use std::fs;

use helpers::artifacts::SUMMARY_JSON;
use helpers::artifacts::SUMMARY_MD;
use helpers::artifacts::TestArtifacts;
use helpers::artifacts::TestReporter;
use serde_json::Value;
use tempfile::TempDir;

use crate::helpers;

#[test]
fn reporter_writes_canonical_summary() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let artifacts = TestArtifacts::under(dir.path(), "sample", false)?;
    let root = artifacts.root().to_path_buf();
    let mut reporter = TestReporter::with_artifacts("sample", artifacts);
    reporter.finish("pass", vec!["note".to_string()], vec![SUMMARY_JSON.to_string()])?;

    let raw = fs::read_to_string(root.join(SUMMARY_JSON))?;
    let summary: Value = serde_json::from_str(&raw)?;
    if summary["status"] != "pass" || summary["test_name"] != "sample" {
        return Err(format!("unexpected summary: {raw}").into());
    }
    if raw.contains('\n') || !raw.starts_with("{\"artifacts\"") {
        return Err(format!("summary is not canonical: {raw}").into());
    }
    let markdown = fs::read_to_string(root.join(SUMMARY_MD))?;
    if !markdown.contains("- Status: pass") || !markdown.contains("- note") {
        return Err(format!("unexpected markdown: {markdown}").into());
    }
    Ok(())
}

#[test]
fn dropped_reporter_still_writes_summary() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let artifacts = TestArtifacts::under(dir.path(), "dropped", false)?;
    let root = artifacts.root().to_path_buf();
    drop(TestReporter::with_artifacts("dropped", artifacts));

    let summary: Value = serde_json::from_str(&fs::read_to_string(root.join(SUMMARY_JSON))?)?;
    if summary["status"] != "unknown" {
        return Err(format!("expected unknown status, got {}", summary["status"]).into());
    }
    Ok(())
}

#[test]
fn finished_artifacts_are_not_overwritten_by_default() -> Result<(), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let mut reporter =
        TestReporter::with_artifacts("repeat", TestArtifacts::under(dir.path(), "repeat", false)?);
    reporter.finish("pass", Vec::new(), Vec::new())?;

    if TestArtifacts::under(dir.path(), "repeat", false).is_ok() {
        return Err("expected existing artifacts to be protected".into());
    }
    TestArtifacts::under(dir.path(), "repeat", true)?;
    Ok(())
}
