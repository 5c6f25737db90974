//! Tests for CLI argument parsing against the built binary.

use std::process::Command;

fn forum_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_forum"));
    cmd.env_remove("FORUM_SERVER_URL")
        .env_remove("FORUM_EMAIL")
        .env_remove("FORUM_PASSWORD")
        .env_remove("FORUM_CLIENT_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let output = forum_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in ["posts", "discussions", "search", "comments", "--server-url"] {
        assert!(stdout.contains(expected), "missing {} in:\n{}", expected, stdout);
    }
}

#[test]
fn test_password_env_value_is_hidden() {
    let output = forum_cmd()
        .env("FORUM_PASSWORD", "hunter2-secret")
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("hunter2-secret"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = forum_cmd()
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("frobnicate"));
}

#[test]
fn test_invalid_section_is_rejected() {
    let output = forum_cmd()
        .args(["section", "bookmarks"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_invalid_server_url_exits_with_error() {
    let output = forum_cmd()
        .args(["--config", "/nonexistent/config.toml"])
        .args(["--server-url", "ftp://example.com", "whoami"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid --server-url"), "stderr: {}", stderr);
}

#[test]
fn test_whoami_signed_out_needs_no_server() {
    let output = forum_cmd()
        .args(["--config", "/nonexistent/config.toml", "whoami"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Not signed in"), "stdout: {}", stdout);
}
