// ABOUTME: Integration tests for the command line application
// ABOUTME: Runs the built binary against fixture templates and data files

use serde_json::{json, Value};
use std::process::{Command, Output};

mod common;
use common::{fixture_path, load_fixture, TestEnvironment};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_json-templates"))
        .args(args)
        .args(["--no-color"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_cli_help_command() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bind"));
    assert!(stdout.contains("list"));
}

#[test]
fn test_cli_version_command() {
    let output = run_cli(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_bind_to_stdout() {
    let template = fixture_path("template.json");
    let data = fixture_path("source.json");

    let output = run_cli(&["bind", template.to_str().unwrap(), data.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result, load_fixture("expected.json"));
}

#[tokio::test]
async fn test_cli_bind_yaml_data_to_file() {
    let env = TestEnvironment::new();
    let template = env
        .write_json(
            "template.json",
            &json!({
                "template": { "greeting": "Hi {name}, you have {count} items", "count": "{=count}" }
            }),
        )
        .await;
    let data = env.write_file("data.yaml", "name: Sam\ncount: 3\n").await;
    let out = env.path().join("out.json");

    let output = run_cli(&[
        "bind",
        template.to_str().unwrap(),
        data.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--compact",
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        env.read_json("out.json").await,
        json!({ "greeting": "Hi Sam, you have 3 items", "count": 3 })
    );
}

#[tokio::test]
async fn test_cli_bind_named_template() {
    let env = TestEnvironment::new();
    let data = env
        .write_json("item.json", &json!({ "Name": "solo", "Rating": 9, "subObject": { "x": 4 } }))
        .await;
    let template = fixture_path("template.json");

    let output = run_cli(&[
        "bind",
        template.to_str().unwrap(),
        data.to_str().unwrap(),
        "--name",
        "itemTemplate",
    ]);

    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result, json!({ "num": 9, "metadata": { "title": "solo (4)" } }));
}

#[tokio::test]
async fn test_cli_bind_failure_exits_with_error() {
    let env = TestEnvironment::new();
    let template = env
        .write_json("template.json", &json!({ "template": { "a": "{missing}" } }))
        .await;
    let data = env.write_json("data.json", &json!({})).await;

    let output = run_cli(&["bind", template.to_str().unwrap(), data.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing"));
}

#[tokio::test]
async fn test_cli_rejects_document_without_root() {
    let env = TestEnvironment::new();
    let template = env.write_json("template.json", &json!({ "row": {} })).await;

    let output = run_cli(&["list", template.to_str().unwrap()]);

    assert!(!output.status.success());
}

#[test]
fn test_cli_list_templates() {
    let template = fixture_path("template.json");

    let output = run_cli(&["list", template.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["template (root)", "itemTemplate"]);
}
