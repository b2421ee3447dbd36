//! Integration tests for the profilepdf CLI
//!
//! Runs the built binary for validation, rendering and navigation URL
//! handling, including the failure exits.

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

const JANE: [&str; 8] = [
    "--name",
    "Jane Doe",
    "--email",
    "jane@x.com",
    "--phone",
    "(555) 123-4567",
    "--position",
    "Engineer",
];

/// Test helper to get the CLI binary path
fn get_cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop(); // Remove "deps" directory
    }
    path.push("profilepdf");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

/// Test helper to create a temporary directory
fn setup_temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

/// Test helper to run CLI command and return output
fn run_cli_command(args: &[&str]) -> Result<Output> {
    let output = Command::new(get_cli_path()).args(args).output()?;
    Ok(output)
}

/// Runs the CLI with `dir` as the working directory
fn run_cli_command_in(dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(get_cli_path())
        .current_dir(dir)
        .args(args)
        .output()?;
    Ok(output)
}

fn with_jane<'a>(command: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![command];
    args.extend_from_slice(&JANE);
    args.extend_from_slice(extra);
    args
}

/// Test helper to check if PDF file exists and has content
fn assert_pdf_exists_and_valid(path: &Path) {
    assert!(path.exists(), "PDF file should exist: {}", path.display());
    let metadata = fs::metadata(path).expect("Failed to read file metadata");
    assert!(
        metadata.len() > 100,
        "PDF file should have content (> 100 bytes)"
    );

    let content = fs::read(path).expect("Failed to read PDF file");
    assert!(
        content.starts_with(b"%PDF-"),
        "File should start with PDF header"
    );
}

#[test]
fn test_cli_validate_valid_record() {
    let output = run_cli_command(&with_jane("validate", &[])).expect("CLI should run");

    assert!(output.status.success(), "Valid record should pass");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Record is valid"));
}

#[test]
fn test_cli_validate_reports_each_error() {
    let output = run_cli_command(&["validate", "--name", "A", "--email", "bad", "--phone", "123"])
        .expect("CLI should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("email: Please enter a valid email address"));
    assert!(stderr.contains("phone: Please enter a valid phone number (minimum 10 digits)"));
    assert!(!stderr.contains("name:"));
}

#[test]
fn test_cli_validate_empty_record() {
    let output = run_cli_command(&["validate"]).expect("CLI should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("name: Name is required"));
    assert!(stderr.contains("email: Email is required"));
    assert!(stderr.contains("phone: Phone number is required"));
}

#[test]
fn test_cli_validate_from_json() {
    let output = run_cli_command(&[
        "validate",
        "--data",
        r#"{"name":"A","email":"a@b.co","phone":"1234567890"}"#,
    ])
    .expect("CLI should run");
    assert!(output.status.success());

    let output = run_cli_command(&["validate", "--data", "{not json"]).expect("CLI should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid --data record"));
}

#[test]
fn test_cli_data_conflicts_with_field_flags() {
    let output = run_cli_command(&["validate", "--name", "A", "--data", "{}"])
        .expect("CLI should run");
    assert!(!output.status.success());
}

#[test]
fn test_cli_render_to_output_path() {
    let temp_dir = setup_temp_dir();
    let output_path = temp_dir.path().join("jane.pdf");

    let output = run_cli_command(&with_jane("render", &["-o", output_path.to_str().unwrap()]))
        .expect("CLI should run");

    assert!(output.status.success(), "Command should succeed");
    assert_pdf_exists_and_valid(&output_path);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PDF saved to"));
}

#[test]
fn test_cli_render_uses_suggested_file_name() {
    let temp_dir = setup_temp_dir();

    let output =
        run_cli_command_in(temp_dir.path(), &with_jane("render", &[])).expect("CLI should run");

    assert!(output.status.success());
    assert_pdf_exists_and_valid(&temp_dir.path().join("Jane_Doe_profile.pdf"));
}

#[test]
fn test_cli_render_default_name_stays_in_working_dir() {
    let root = setup_temp_dir();
    let work = root.path().join("work");
    fs::create_dir(&work).unwrap();

    let output = run_cli_command_in(
        &work,
        &[
            "render",
            "--name",
            "../escaped",
            "--email",
            "jane@x.com",
            "--phone",
            "5551234567",
        ],
    )
    .expect("CLI should run");

    assert!(output.status.success());
    assert_pdf_exists_and_valid(&work.join("_._escaped_profile.pdf"));
    assert!(!root.path().join("escaped_profile.pdf").exists());
}

#[test]
fn test_cli_render_refuses_invalid_record() {
    let temp_dir = setup_temp_dir();

    let output = run_cli_command_in(temp_dir.path(), &["render", "--name", "Jane"])
        .expect("CLI should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("Jane_profile.pdf").exists());
}

#[test]
fn test_cli_render_dry_run() {
    let temp_dir = setup_temp_dir();

    let output = run_cli_command_in(
        temp_dir.path(),
        &with_jane("render", &["--dry-run", "--date-format", "%Y"]),
    )
    .expect("CLI should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("User Profile"));
    assert!(stdout.contains("Jane Doe"));
    assert!(stdout.contains("No description provided"));
    assert!(stdout.contains("Generated on: "));
    assert!(stdout.lines().all(|line| line.starts_with("p1 ")));
    assert!(!temp_dir.path().join("Jane_Doe_profile.pdf").exists());
}

#[test]
fn test_cli_render_rejects_bad_date_format() {
    let output = run_cli_command(&with_jane("render", &["--dry-run", "--date-format", "%Q"]))
        .expect("CLI should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid date format"));
}

#[test]
fn test_cli_encode_then_decode() {
    let output = run_cli_command(&with_jane("encode", &[])).expect("CLI should run");
    assert!(output.status.success());

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert!(url.starts_with("/preview?data="));

    let output = run_cli_command(&["decode", &url]).expect("CLI should run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": "(555) 123-4567",
            "position": "Engineer",
            "description": ""
        })
    );
}

#[test]
fn test_cli_decode_malformed_input() {
    let output = run_cli_command(&["decode", "/preview?data=%7Bbroken"]).expect("CLI should run");
    assert!(!output.status.success());

    let output = run_cli_command(&["decode", "/preview"]).expect("CLI should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not decode record"));
}

#[test]
fn test_cli_help_lists_commands() {
    let output = run_cli_command(&["--help"]).expect("CLI should run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["validate", "render", "encode", "decode"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}

#[test]
fn test_cli_unknown_command() {
    let output = run_cli_command(&["merge"]).expect("CLI should run");
    assert!(!output.status.success());
}
