//! Exit status of the binary for help and usage errors. None of these reach
//! the browser, so they run without Chrome installed.

#![cfg(feature = "cdp")]

use assert_cmd::Command;
use predicates::str::{contains, starts_with};
use std::path::Path;

fn postshot(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postshot"));
    cmd.current_dir(dir)
        .env_remove("POSTSHOT_DELAY_MS")
        .env_remove("CHROME");
    cmd
}

fn html_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tmp dir");
    std::fs::write(dir.path().join("input.html"), "<p>hi</p>").expect("write html");
    dir
}

#[test]
fn no_arguments_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    postshot(dir.path())
        .assert()
        .success()
        .stdout(contains("--carousel"));
}

#[test]
fn help_flags_print_usage() {
    let dir = tempfile::tempdir().unwrap();
    for flag in ["-h", "--help"] {
        postshot(dir.path())
            .arg(flag)
            .assert()
            .success()
            .stdout(contains("Preset formats"));
    }
}

#[test]
fn unknown_format_exits_1_without_output() {
    let dir = html_dir();
    postshot(dir.path())
        .args(["input.html", "out.png", "--format=bogus"])
        .assert()
        .code(1)
        .stdout(contains("Unknown format 'bogus'. Available: carousel, feed, square, reels, story"));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn non_integer_dimensions_exit_1_without_output() {
    let dir = html_dir();
    postshot(dir.path())
        .args(["input.html", "output.png", "abc", "def"])
        .assert()
        .code(1)
        .stdout(contains("Width and height must be integers."));
    assert!(!dir.path().join("output.png").exists());
}

#[test]
fn carousel_without_slides_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    postshot(dir.path())
        .args(["--carousel", "slides/"])
        .assert()
        .code(1)
        .stdout(starts_with("Usage:"));
    assert!(!dir.path().join("slides").exists());
}

#[test]
fn options_before_job_arguments_are_accepted() {
    let dir = html_dir();
    postshot(dir.path())
        .args(["--delay-ms", "10", "input.html", "o.png", "--format=nope"])
        .assert()
        .code(1)
        .stdout(contains("Unknown format 'nope'"));
}

#[test]
fn usage_text_ends_with_single_newline() {
    let dir = tempfile::tempdir().unwrap();
    let assert = postshot(dir.path()).arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(out.ends_with('\n'));
    assert!(!out.ends_with("\n\n"), "trailing blank line in usage output");
}
