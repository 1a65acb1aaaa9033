use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn padcalc(config: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_padcalc"))
        .arg("--config")
        .arg(config)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn padcalc");

    if let Some(mut input) = child.stdin.take() {
        input.write_all(stdin.as_bytes()).unwrap();
    }
    child.wait_with_output().expect("Failed to wait for padcalc")
}

fn missing_config(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("config.toml")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_text_loop_is_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = "7 * 8\nsqrt -4\n2 pow 3\nquit\n1 + 1\n";
    let output = padcalc(&missing_config(&dir), &[], input);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "= 56\n\
         Error: cannot calculate square root of a negative number\n\
         = 8\n"
    );
}

#[test]
fn test_keys_from_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let output = padcalc(&missing_config(&dir), &["keys", "7", "×", "8", "="], "");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "7\n7 * \n7 * 8\n56\n");
}

#[test]
fn test_keys_from_stdin_skip_unknown_labels() {
    let dir = tempfile::tempdir().unwrap();
    let output = padcalc(&missing_config(&dir), &["keys"], "1 ÷ bogus\n0 =\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1\n1 / \n1 / 0\nError: Division by zero\n");
}

#[test]
fn test_eval_prints_display() {
    let dir = tempfile::tempdir().unwrap();
    let output = padcalc(&missing_config(&dir), &["eval", "2 ** 10 / 4"], "");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "256\n");
}

#[test]
fn test_eval_failure_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = padcalc(&missing_config(&dir), &["eval", "1 / 0"], "");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot divide by zero"));
}

#[test]
fn test_eval_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = padcalc(&missing_config(&dir), &["eval", "--json", "sqrt(16)"], "");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["value"], 4.0);
    assert_eq!(json["display"], "4");
}

#[test]
fn test_config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "precision = 3\n").unwrap();

    let output = padcalc(&config, &["eval", "1 / 3"], "");
    assert_eq!(stdout(&output), "0.333\n");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "precision = \"high\"\n").unwrap();

    let output = padcalc(&config, &["eval", "1"], "");
    assert!(!output.status.success());
}
