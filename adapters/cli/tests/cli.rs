use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

const OVERRIDES: &str = "5 6\n######\n#@E $#\n# N  #\n#X   #\n######\n";
const BOX: &str = "5 5\n#####\n#   #\n# $ #\n# @ #\n#####\n";

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_maze-robot"));
    let _ = command.env_remove("RUST_LOG");
    command
}

fn run_with_stdin(mut command: Command, input: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary starts");
    let mut stdin = child.stdin.take().expect("stdin is piped");
    // The binary may exit before reading, e.g. on a bad config.
    let _ = stdin.write_all(input.as_bytes());
    drop(stdin);
    child.wait_with_output().expect("binary finishes")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

fn write_file(directory: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = directory.join(name);
    fs::write(&path, contents).expect("file is written");
    path
}

#[test]
fn prints_path_for_reachable_goal() {
    let output = run_with_stdin(binary(), OVERRIDES);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "SOUTH\nEAST\nNORTH\nEAST\nEAST\n");
}

#[test]
fn prints_loop_and_exits_cleanly() {
    let output = run_with_stdin(binary(), BOX);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "LOOP\n");
}

#[test]
fn reads_layout_file_with_short_rows_and_crlf() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        directory.path(),
        "layout.txt",
        "\r\n5 6\r\n######\r\n#@E $\r\n# N\r\n#X\r\n",
    );

    let mut command = binary();
    let _ = command.arg(&path);
    let output = run_with_stdin(command, "");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "SOUTH\nEAST\nNORTH\nEAST\nEAST\n");
}

#[test]
fn json_format_prints_report() {
    let mut command = binary();
    let _ = command.args(["--format", "json"]);
    let output = run_with_stdin(command, "3 7\n#######\n#@BX $#\n#######\n");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(
        value["outcome"]["success"]["path"],
        serde_json::json!(["EAST", "EAST", "EAST", "EAST"])
    );
    assert_eq!(
        value["destroyed_walls"],
        serde_json::json!([{ "column": 3, "row": 1 }])
    );
    assert_eq!(value["steps"], 4);
}

#[test]
fn verify_accepts_emitted_path() {
    let mut command = binary();
    let _ = command.arg("--verify");
    let output = run_with_stdin(
        command,
        "5 5\n#####\n#@1 #\n## 1#\n#  $#\n#####\n",
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "EAST\nSOUTH\n");
}

#[test]
fn config_selects_format_and_flags_override_it() {
    let directory = tempfile::tempdir().expect("temp dir");
    let config = write_file(
        directory.path(),
        "maze-robot.toml",
        "version = 1\n[output]\nformat = \"json\"\nverify = true\n",
    );

    let mut command = binary();
    let _ = command.arg("--config").arg(&config);
    let output = run_with_stdin(command, BOX);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(value["outcome"]["loop"]["reason"], "cycle_detected");

    let mut command = binary();
    let _ = command
        .arg("--config")
        .arg(&config)
        .args(["--format", "text"]);
    let output = run_with_stdin(command, BOX);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "LOOP\n");
}

#[test]
fn rejects_unsupported_config_version() {
    let directory = tempfile::tempdir().expect("temp dir");
    let config = write_file(directory.path(), "maze-robot.toml", "version = 7\n");

    let mut command = binary();
    let _ = command.arg("--config").arg(&config);
    let output = run_with_stdin(command, BOX);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported config version 7"));
}

#[test]
fn rejects_grid_without_start() {
    let output = run_with_stdin(binary(), "1 3\n  $\n");

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("grid has no start cell"));
}

#[test]
fn diagnostics_stay_off_stdout() {
    let mut command = binary();
    let _ = command.env("RUST_LOG", "trace");
    let output = run_with_stdin(command, OVERRIDES);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "SOUTH\nEAST\nNORTH\nEAST\nEAST\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("simulation finished"));
}
