// CLI tests: drive the built `rsv` binary against JSON fixtures and check
// exit codes and output on both formats.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn rsv_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rsv"))
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_str()
        .unwrap()
        .to_string()
}

fn run_rsv(args: &[&str]) -> Output {
    Command::new(rsv_binary())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run rsv")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("non-UTF8 output")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn valid_program_exits_zero() {
    let output = run_rsv(&[&fixture("valid.json")]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "program 'recolectores': ok");
}

#[test]
fn invalid_program_exits_one_with_diagnostic() {
    let output = run_rsv(&[&fixture("overlap.json")]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output).trim(),
        "error[E0104]: invalid area declaration: area 'A' shares points with area 'B'"
    );
}

#[test]
fn malformed_document_exits_two() {
    let output = run_rsv(&[&fixture("malformed.json")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("internal error: malformed AST document"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn missing_file_exits_two() {
    let output = run_rsv(&["/no/such/program.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("cannot read /no/such/program.json"));
}

#[test]
fn json_format_reports_verdict_and_provenance() {
    let output = run_rsv(&["--format", "json", &fixture("bad_call.json")]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout is not JSON");
    assert_eq!(report["program"], "llamadas");
    assert_eq!(report["verdict"]["error"], true);
    assert_eq!(report["verdict"]["code"], "E0505");
    assert_eq!(report["verdict"]["category"], "invalid procedure call");
    assert_eq!(
        report["verdict"]["context"],
        "argument 1 in call to procedure 'P' must be a variable, \
         in declaration of robot type 't'"
    );
    assert_eq!(
        report["provenance"]["validator_version"],
        env!("CARGO_PKG_VERSION")
    );
    assert_eq!(
        report["provenance"]["ast_hash"].as_str().map(str::len),
        Some(64)
    );
}

#[test]
fn ast_hash_ignores_document_layout() {
    // The wrapped and re-indented document hashes like the original.
    let original = run_rsv(&["--format", "json", &fixture("overlap.json")]);
    let text = std::fs::read_to_string(fixture("overlap.json")).unwrap();
    let reformatted = format!(r#"{{ "type": "PROGRAM", "value": {} }}"#, text.replace('\n', " "));

    let dir = std::env::temp_dir().join(format!("rsv-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("overlap_wrapped.json");
    std::fs::write(&path, reformatted).unwrap();
    let wrapped = run_rsv(&["--format", "json", path.to_str().unwrap()]);
    let _ = std::fs::remove_dir_all(&dir);

    let a: serde_json::Value = serde_json::from_str(&stdout(&original)).unwrap();
    let b: serde_json::Value = serde_json::from_str(&stdout(&wrapped)).unwrap();
    assert_eq!(a["provenance"]["ast_hash"], b["provenance"]["ast_hash"]);
}

#[test]
fn verbose_logs_each_pass() {
    let output = run_rsv(&["--verbose", &fixture("valid.json")]);
    assert_eq!(output.status.code(), Some(0));
    let log = stderr(&output);
    for pass in ["geometry", "instances", "inits", "procedures", "robot_types"] {
        assert!(
            log.contains(&format!("{} complete", pass)),
            "missing timing line for {}:\n{}",
            pass,
            log
        );
    }
}
