use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn gauntlet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gauntlet"))
        .args(args)
        .output()
        .expect("run gauntlet binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_script(project: &Path, rel: &str, body: &str) {
    let path = project.join(rel);
    fs::create_dir_all(path.parent().expect("script parent")).expect("mkdir");
    fs::write(&path, body).expect("write script");
}

#[test]
fn full_mode_without_url_is_a_usage_error_with_no_checks_executed() {
    let tmp = tempdir().expect("tempdir");
    let output = gauntlet(&["full", &tmp.path().display().to_string()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("requires --url"));
    assert!(
        !stdout_of(&output).contains("Running:"),
        "no check may start before usage validation"
    );
}

#[test]
fn missing_project_path_is_a_usage_error() {
    let output = gauntlet(&["core", "/definitely/not/a/project"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("project path does not exist"));
}

#[test]
fn malformed_config_is_rejected_before_any_check_runs() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join(".gauntlet.toml"), "timeout_secs = \"soon\"").expect("write");
    let output = gauntlet(&["core", &tmp.path().display().to_string()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains(".gauntlet.toml"));
}

#[test]
fn core_run_on_a_bare_project_soft_skips_everything_and_passes() {
    let tmp = tempdir().expect("tempdir");
    let output = gauntlet(&[
        "core",
        &tmp.path().display().to_string(),
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let report: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("json format emits pure JSON");
    assert_eq!(report["mode"], "core");
    assert_eq!(report["overall_passed"], true);
    assert_eq!(report["counts"]["total"], 5);
    assert_eq!(report["counts"]["skipped"], 5);
    // No URL: the performance tier contributes no rows, skipped or otherwise.
    let results = report["results"].as_array().expect("results array");
    assert!(results.iter().all(|r| r["category"] != "Performance"));
}

#[test]
fn config_extension_failure_aborts_and_exits_one() {
    let tmp = tempdir().expect("tempdir");
    write_script(tmp.path(), "checks/audit.sh", "echo 'GPL dependency' >&2\nexit 1\n");
    fs::write(
        tmp.path().join(".gauntlet.toml"),
        r#"
[[check]]
name = "License Audit"
category = "Security"
program = "sh"
script = "checks/audit.sh"
required = true
"#,
    )
    .expect("write config");

    let output = gauntlet(&[
        "core",
        &tmp.path().display().to_string(),
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_str(&stdout_of(&output)).expect("json");
    assert_eq!(report["status"], "aborted_on_required_failure");
    let results = report["results"].as_array().expect("results array");
    // Compiled-in security scan soft-skips, then the required extension fails.
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "Security Scan");
    assert_eq!(results[0]["outcome"], "skipped");
    assert_eq!(results[1]["name"], "License Audit");
    assert_eq!(results[1]["outcome"], "failed");
    assert!(
        results[1]["failure_detail"]
            .as_str()
            .unwrap_or_default()
            .contains("GPL dependency")
    );
}

#[test]
fn no_stop_on_fail_keeps_the_core_run_going() {
    let tmp = tempdir().expect("tempdir");
    write_script(tmp.path(), "checks/audit.sh", "exit 1\n");
    fs::write(
        tmp.path().join(".gauntlet.toml"),
        r#"
[[check]]
name = "License Audit"
category = "Security"
program = "sh"
script = "checks/audit.sh"
required = true
"#,
    )
    .expect("write config");

    let output = gauntlet(&[
        "core",
        &tmp.path().display().to_string(),
        "--no-stop-on-fail",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_str(&stdout_of(&output)).expect("json");
    assert_eq!(report["status"], "completed_all_checks");
    assert_eq!(report["counts"]["total"], 6);
}

#[test]
fn full_mode_text_report_renders_every_tier() {
    let tmp = tempdir().expect("tempdir");
    let output = gauntlet(&[
        "full",
        &tmp.path().display().to_string(),
        "--url",
        "http://localhost:3000",
    ]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout_of(&output);
    assert!(text.contains("FULL VERIFICATION REPORT"));
    assert!(text.contains("Lint Check"));
    assert!(text.contains("Type Coverage"));
}

#[test]
fn list_shows_both_catalogs() {
    let core = gauntlet(&["list", "--format", "json"]);
    assert_eq!(core.status.code(), Some(0));
    let core_value: serde_json::Value = serde_json::from_str(&stdout_of(&core)).expect("json");
    assert_eq!(core_value["mode"], "core");
    assert_eq!(core_value["timeout_secs"], 300);
    assert_eq!(core_value["categories"].as_array().map(Vec::len), Some(6));

    let full = gauntlet(&["list", "--mode", "full", "--format", "json"]);
    let full_value: serde_json::Value = serde_json::from_str(&stdout_of(&full)).expect("json");
    assert_eq!(full_value["timeout_secs"], 600);
    assert_eq!(full_value["categories"].as_array().map(Vec::len), Some(7));

    let text = gauntlet(&["list", "--mode", "full"]);
    assert!(stdout_of(&text).contains("Lighthouse Audit"));
    assert!(stdout_of(&text).contains("(requires URL)"));
}

#[test]
fn unknown_mode_and_format_are_usage_errors() {
    let bad_mode = gauntlet(&["list", "--mode", "paranoid"]);
    assert_eq!(bad_mode.status.code(), Some(2));

    let tmp = tempdir().expect("tempdir");
    let bad_format = gauntlet(&["core", &tmp.path().display().to_string(), "--format", "yaml"]);
    assert_eq!(bad_format.status.code(), Some(2));
}
