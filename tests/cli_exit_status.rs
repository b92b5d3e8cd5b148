//! CLI integration tests for process exit status
//!
//! These run the compiled binary against temporary project trees. Background
//! removal is never reached, so no model file is needed.

#![cfg(feature = "cli")]

use hoverloon_images::ImageIOService;
use image::DynamicImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hoverloon-images"))
}

#[test]
fn test_missing_input_directory_exits_non_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let output = Command::new(cli_binary())
        .arg("--project-root")
        .arg(temp_dir.path())
        .output()
        .expect("Failed to execute CLI");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please create"), "stdout: {stdout}");
    assert!(stdout.contains("image1.png"));
    assert!(stdout.contains("image2.png"));
    assert!(!stdout.contains("Image processing complete!"));

    // Output directory is prepared before the input check
    assert!(temp_dir
        .path()
        .join("public/images/projects/hoverloon")
        .is_dir());
}

#[test]
fn test_missing_files_still_exit_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::create_dir_all(temp_dir.path().join("temp_images")).unwrap();

    let output = Command::new(cli_binary())
        .arg("--project-root")
        .arg(temp_dir.path())
        .arg("--strict")
        .output()
        .expect("Failed to execute CLI");

    // Missing inputs are not failures, even under --strict
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗"), "stdout: {stdout}");
    assert!(stdout.contains("image1.png not found"));
    assert!(stdout.contains("image2.png not found"));
    assert!(stdout.contains("Image processing complete!"));
}

#[test]
fn test_enhancement_only_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_dir = temp_dir.path().join("temp_images");
    std::fs::create_dir_all(&input_dir).unwrap();
    std::fs::write(
        input_dir.join("image1.png"),
        ImageIOService::encode_png(&DynamicImage::new_rgb8(16, 9)).unwrap(),
    )
    .unwrap();

    let output = Command::new(cli_binary())
        .arg("--project-root")
        .arg(temp_dir.path())
        .output()
        .expect("Failed to execute CLI");

    assert_eq!(output.status.code(), Some(0));

    let out_dir = temp_dir.path().join("public/images/projects/hoverloon");
    assert!(out_dir.join("hoverloon-main.png").is_file());
    assert!(!out_dir.join("hoverloon-3d.png").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Enhanced image saved to"), "stdout: {stdout}");
    assert!(stdout.contains("KB)"));
    assert!(stdout.contains("image2.png not found"));
}

#[test]
fn test_strict_mode_reports_failed_operation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_dir = temp_dir.path().join("temp_images");
    std::fs::create_dir_all(&input_dir).unwrap();
    std::fs::write(input_dir.join("image1.png"), b"corrupt").unwrap();

    let lenient = Command::new(cli_binary())
        .arg("--project-root")
        .arg(temp_dir.path())
        .output()
        .expect("Failed to execute CLI");
    assert_eq!(lenient.status.code(), Some(0));

    let strict = Command::new(cli_binary())
        .arg("--project-root")
        .arg(temp_dir.path())
        .arg("--strict")
        .output()
        .expect("Failed to execute CLI");
    assert_eq!(strict.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&strict.stdout);
    assert!(stdout.contains("✗ Error enhancing image"), "stdout: {stdout}");
}
