//! Integration tests for quickprom CLI

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

const VECTOR_RESPONSE: &str = r#"{
  "status": "success",
  "data": {
    "resultType": "vector",
    "result": [
      {"metric": {"__name__": "up", "job": "api", "instance": "a:9090"}, "value": [1700000000.004, "1"]},
      {"metric": {"__name__": "up", "job": "api", "instance": "b:9090"}, "value": [1700000000.004, "0"]}
    ]
  }
}"#;

const MATRIX_RESPONSE: &str = r#"{
  "status": "success",
  "data": {
    "resultType": "matrix",
    "result": [
      {"metric": {"job": "api", "instance": "a"}, "values": [[1700000040, "1.5"], [1700000100, "2"]]},
      {"metric": {"job": "api", "instance": "b"}, "values": [[1700000070, "3.25"]]}
    ]
  }
}"#;

fn quickprom_command(args: &[&str]) -> Command {
    let mut cmd_args = vec!["run", "-p", "quickprom", "--"];
    cmd_args.extend(args);

    let mut cmd = Command::new("cargo");
    cmd.args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .env_remove("QUICKPROM_JSON")
        .env_remove("QUICKPROM_RANGE_TABLE")
        .env_remove("QUICKPROM_UTC")
        .env_remove("QUICKPROM_COLOR")
        .env_remove("QUICKPROM_LOG");
    cmd
}

fn run_quickprom(args: &[&str]) -> (String, String, bool) {
    let output = quickprom_command(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn response_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(body.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().to_string()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_quickprom(&["--help"]);

    assert!(success);
    assert!(stdout.contains("quickprom"));
    assert!(stdout.contains("--json"));
    assert!(stdout.contains("--range-table"));
    assert!(stdout.contains("--utc"));
    assert!(stdout.contains("--color"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_quickprom(&["--version"]);

    assert!(success);
    assert!(stdout.contains("quickprom"));
}

#[test]
fn test_instant_vector_output() {
    let file = response_file(VECTOR_RESPONSE);
    let (stdout, _, success) = run_quickprom(&[&path_of(&file), "--utc"]);

    assert!(success);
    assert!(stdout.starts_with("Instant vector:\n"));
    assert!(stdout.contains("  At: 2023-11-14 22:13:20.004 +00:00\n"));
    assert!(stdout.contains("All have labels: __name__: up, job: api\n"));
    assert!(stdout.contains("instance\tvalue\na:9090\t1\nb:9090\t0\n"));
}

#[test]
fn test_range_vector_list_output() {
    let file = response_file(MATRIX_RESPONSE);
    let (stdout, _, success) = run_quickprom(&[&path_of(&file), "--utc"]);

    assert!(success);
    assert!(stdout.starts_with("Range vector:\n"));
    assert!(stdout.contains("  All on date: 2023-11-14\n"));
    assert!(stdout.contains("instance: a:\n  22:14:00: 1.50\n  22:15:00: 2.00\n"));
    assert!(stdout.contains("instance: b:\n  22:14:30: 3.25\n"));
}

#[test]
fn test_range_vector_table_output() {
    let file = response_file(MATRIX_RESPONSE);
    let (stdout, _, success) = run_quickprom(&[&path_of(&file), "--utc", "--range-table"]);

    assert!(success);
    assert!(stdout.contains("instance\t22:14:00\t22:14:30\t22:15:00\n"));
    assert!(stdout.contains("a\t1.50\t\t2.00\n"));
    assert!(stdout.contains("b\t\t3.25\t\n"));
}

#[test]
fn test_range_table_from_env() {
    let file = response_file(MATRIX_RESPONSE);
    let output = quickprom_command(&[&path_of(&file), "--utc"])
        .env("QUICKPROM_RANGE_TABLE", "1")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("instance\t22:14:00\t22:14:30\t22:15:00\n"));
}

#[test]
fn test_falsey_env_is_ignored() {
    let file = response_file(MATRIX_RESPONSE);
    let output = quickprom_command(&[&path_of(&file), "--utc"])
        .env("QUICKPROM_RANGE_TABLE", "false")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("instance: a:\n"));
}

#[test]
fn test_json_output() {
    let file = response_file(MATRIX_RESPONSE);
    let (stdout, _, success) = run_quickprom(&[&path_of(&file), "--json"]);

    assert!(success);
    assert!(stdout.starts_with("{\n  \"resultType\": \"matrix\",\n  \"result\": ["));

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["resultType"], "matrix");
    assert_eq!(parsed["result"][0]["metric"]["instance"], "a");
    assert_eq!(parsed["result"][0]["values"][0][1], "1.5");
    assert_eq!(parsed["result"][1]["values"][0][1], "3.25");
}

#[test]
fn test_json_output_renders_again() {
    let file = response_file(VECTOR_RESPONSE);
    let (json, _, success) = run_quickprom(&[&path_of(&file), "--json"]);
    assert!(success);

    let again = response_file(&json);
    let (stdout, _, success) = run_quickprom(&[&path_of(&again), "--utc"]);

    assert!(success);
    assert!(stdout.contains("instance\tvalue\na:9090\t1\nb:9090\t0\n"));
}

#[test]
fn test_stdin_input() {
    let mut child = quickprom_command(&["-", "--utc"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(VECTOR_RESPONSE.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Instant vector:\n"));
}

#[test]
fn test_color_always_draws_borders() {
    let file = response_file(VECTOR_RESPONSE);
    let (stdout, _, success) = run_quickprom(&[&path_of(&file), "--utc", "--color", "always"]);

    assert!(success);
    assert!(stdout.contains("\x1b[1mInstant vector:\x1b[0m"));
    assert!(stdout.contains('┌'));
    assert!(stdout.contains('└'));
}

#[test]
fn test_empty_result() {
    let file = response_file(r#"{"status": "success", "data": {"resultType": "vector", "result": []}}"#);
    let (stdout, _, success) = run_quickprom(&[&path_of(&file)]);

    assert!(success);
    assert_eq!(stdout, "(empty result)\n");
}

#[test]
fn test_scalar_output() {
    let file = response_file(
        r#"{"status": "success", "data": {"resultType": "scalar", "result": [1700000000, "42"]}}"#,
    );
    let (stdout, _, success) = run_quickprom(&[&path_of(&file), "--utc"]);

    assert!(success);
    assert_eq!(
        stdout,
        "Scalar:\n  At: 2023-11-14 22:13:20.000 +00:00\n\nvalue\n42\n"
    );
}

#[test]
fn test_query_error_fails() {
    let file = response_file(
        r#"{"status": "error", "errorType": "bad_data", "error": "parse error at char 4"}"#,
    );
    let (stdout, stderr, success) = run_quickprom(&[&path_of(&file)]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("query failed (bad_data): parse error at char 4"));
}

#[test]
fn test_unsupported_result_type_fails() {
    let file = response_file(
        r#"{"status": "success", "data": {"resultType": "string", "result": [1700000000, "hi"]}}"#,
    );
    let (_, stderr, success) = run_quickprom(&[&path_of(&file)]);

    assert!(!success);
    assert!(stderr.contains("no renderer available for result type 'string'"));
}

#[test]
fn test_missing_file_fails() {
    let (_, stderr, success) = run_quickprom(&["does-not-exist.json"]);

    assert!(!success);
    assert!(stderr.contains("Error: cannot open 'does-not-exist.json'"));
}

#[test]
fn test_invalid_json_fails() {
    let file = response_file("not json");
    let (_, stderr, success) = run_quickprom(&[&path_of(&file)]);

    assert!(!success);
    assert!(stderr.contains("Error: cannot read query response from"));
}

#[test]
fn test_backend_warnings_are_logged() {
    let file = response_file(
        r#"{"status": "success", "warnings": ["partial data"], "data": {"resultType": "vector", "result": []}}"#,
    );
    let (stdout, stderr, success) = run_quickprom(&[&path_of(&file)]);

    assert!(success);
    assert_eq!(stdout, "(empty result)\n");
    assert!(stderr.contains("partial data"));
}
