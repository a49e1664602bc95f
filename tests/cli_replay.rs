//! End-to-end tests running the `dbgcon` binary against transcripts.
//!
//! Every run points its config and log file at a scratch directory so the
//! user's own configuration never leaks into the results.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const TRANSCRIPT: &str = concat!(
    "{\"type\":\"output\",\"category\":\"stdout\",\"output\":\"tick\\n\",\"source\":{\"uri\":\"/app/clock.js\",\"line\":3}}\n",
    "{\"type\":\"output\",\"category\":\"stdout\",\"output\":\"tick\\n\",\"source\":{\"uri\":\"/app/clock.js\",\"line\":3}}\n",
    "this line is not json\n",
    "{\"type\":\"evaluate\",\"session\":null,\"expression\":\"now\"}\n",
);

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dbgcon_cli_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dbgcon"));
    cmd.arg("--config")
        .arg(dir.join("missing.toml"))
        .arg("--log-file")
        .arg(dir.join("dbgcon.log"))
        .env_remove("DBGCON_COLLAPSE_IDENTICAL_LINES")
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn binary");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(input.as_bytes())
        .expect("write transcript");
    child.wait_with_output().expect("wait for binary")
}

#[test]
fn replays_file_argument() {
    let dir = scratch_dir("file");
    let transcript = dir.join("session.jsonl");
    std::fs::write(&transcript, TRANSCRIPT).expect("write transcript");

    let output = command(&dir)
        .arg(&transcript)
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "tick\ntick\nnow\nNo active debug session\n"
    );
    assert!(dir.join("dbgcon.log").exists(), "log file should be created");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reports_skipped_lines_on_stderr() {
    let dir = scratch_dir("stderr");

    let output = run_with_stdin(command(&dir), TRANSCRIPT);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn flags_disable_collapse_and_show_sources() {
    let dir = scratch_dir("flags");
    let mut cmd = command(&dir);
    cmd.arg("--no-collapse").arg("--sources");

    let output = run_with_stdin(cmd, TRANSCRIPT);

    // The source name follows the text, line terminator included
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "tick\n clock.js\ntick\n clock.js\nnow\nNo active debug session\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_config_file_fails() {
    let dir = scratch_dir("bad_config");
    let config = dir.join("bad.toml");
    std::fs::write(&config, "unknown_key = 1\n").expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_dbgcon"))
        .arg("--config")
        .arg(&config)
        .arg("--log-file")
        .arg(dir.join("dbgcon.log"))
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
