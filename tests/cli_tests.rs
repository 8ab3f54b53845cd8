//! End-to-end tests for the `timer` binary.
//!
//! These tests run the compiled binary and verify:
//! - Help output and exit codes
//! - Parse error reporting
//! - Zero-duration and short countdowns
//! - Cancellation by SIGINT, during the countdown and during alerts

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a command for the binary with default log filtering.
fn timer() -> Command {
    let mut cmd = Command::cargo_bin("timer").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_exits_zero() {
    timer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("1h30m"));
}

#[test]
fn test_short_help_exits_zero() {
    timer()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("時計形式").not());
}

#[test]
fn test_long_help_shows_description() {
    timer()
        .args(["5m", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("時計形式"));
}

#[test]
fn test_help_wins_over_other_arguments() {
    timer().args(["5m", "--help"]).assert().success();
    timer().args(["abc", "--help"]).assert().success();
    timer().args(["--bogus", "--help"]).assert().success();
    timer().args(["-5", "--quiet", "-h"]).assert().success();
}

#[test]
fn test_help_does_not_start_timer() {
    timer()
        .args(["1h", "--help"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("タイマーを開始しました").not());
}

#[test]
fn test_version() {
    timer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Usage Errors
// ============================================================================

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    timer()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_flag_fails() {
    timer().args(["5", "--bogus"]).assert().failure();
}

// ============================================================================
// Parse Errors
// ============================================================================

#[test]
fn test_parse_error_echoes_input() {
    timer()
        .arg("abc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'abc'"))
        .stderr(predicate::str::contains("1h30m"));
}

#[test]
fn test_negative_duration_fails() {
    timer()
        .arg("-5")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'-5'"));
}

#[test]
fn test_empty_expression_fails() {
    timer()
        .arg("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("''"));
}

#[test]
fn test_whitespace_expression_echoes_input() {
    timer()
        .arg("   ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'   '"));
}

#[test]
fn test_out_of_range_clock_fails() {
    timer()
        .arg("1:75")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'1:75'"));
}

// ============================================================================
// Countdown
// ============================================================================

#[test]
fn test_zero_duration_completes_immediately() {
    timer()
        .args(["0", "--no-notify", "--no-bell"])
        .timeout(std::time::Duration::from_secs(5))
        .assert()
        .success()
        .stdout(predicate::str::contains("タイマーを開始しました: 00:00"))
        .stdout(predicate::str::contains("時間になりました"))
        .stdout(predicate::str::contains("残り時間").not());
}

#[test]
fn test_zero_clock_and_units() {
    timer()
        .args(["0:00", "--no-notify", "--no-bell", "--quiet"])
        .assert()
        .success();
    timer()
        .args(["0m", "--no-notify", "--no-bell", "--quiet"])
        .assert()
        .success();
}

#[test]
fn test_short_countdown_prints_each_tick() {
    timer()
        .args(["2s", "--no-notify", "--no-bell", "-m", "Tea is ready"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("残り時間: 00:02"))
        .stdout(predicate::str::contains("残り時間: 00:01"))
        .stdout(predicate::str::contains("残り時間: 00:00"))
        .stdout(predicate::str::contains("* Tea is ready"));
}

#[test]
fn test_quiet_suppresses_progress() {
    timer()
        .args(["1", "--quiet", "--no-notify", "--no-bell"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("残り時間").not())
        .stdout(predicate::str::contains("時間になりました"));
}

#[test]
fn test_bell_is_written_on_completion() {
    timer()
        .args(["0", "--quiet", "--no-notify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x07"));
}

#[test]
fn test_multiple_words_are_joined() {
    timer()
        .args(["0m", "0s", "--quiet", "--no-notify", "--no-bell"])
        .assert()
        .success();
}

#[test]
fn test_completions() {
    timer()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timer"));
}

// ============================================================================
// Cancellation
// ============================================================================

#[cfg(unix)]
#[test]
fn test_sigint_cancels_with_non_zero_exit() {
    use std::process::{Command as StdCommand, Stdio};
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    let binary = assert_cmd::cargo::cargo_bin("timer");
    let child = StdCommand::new(binary)
        .args(["1h", "--no-notify", "--no-bell"])
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    sleep(Duration::from_millis(1500));

    let killed = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let started = Instant::now();
    let output = child.wait_with_output().unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("キャンセル"));
}

/// A desktop notifier that hangs well past the alert timeout.
#[cfg(all(unix, not(target_os = "macos")))]
fn hanging_notifier() -> tempfile::TempDir {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("notify-send");
    std::fs::write(&script, "#!/bin/sh\nsleep 10\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    dir
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn test_sigint_during_alerts_exits_promptly() {
    use std::process::{Command as StdCommand, Stdio};
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    let notifier = hanging_notifier();
    let path = format!(
        "{}:{}",
        notifier.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let binary = assert_cmd::cargo::cargo_bin("timer");
    let child = StdCommand::new(binary)
        .args(["1", "--no-bell", "--quiet"])
        .env("PATH", path)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // The countdown is over and the notifier is hanging by now
    sleep(Duration::from_millis(1800));

    let killed = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let started = Instant::now();
    let output = child.wait_with_output().unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));

    assert_eq!(output.status.code(), Some(130));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("時間になりました"));
}
