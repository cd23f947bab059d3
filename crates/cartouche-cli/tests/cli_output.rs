//! End-to-end tests running the built `cartouche` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cartouche"))
        .args(args)
        .env("CARTOUCHE_LOG_LEVEL", "off")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn cartouche")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_input(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn detect_prints_resolved_id() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "chart.mmd", "graph TD\n  A --> B\n");

    let output = run_cli(&["detect", "--input", &input]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "flowchart-v2\n");
}

#[test]
fn detect_honours_renderer_override() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "chart.mmd", "flowchart LR\n  A --> B\n");

    let output = run_cli(&["detect", "-i", &input, "--renderer", "flowchart=elk"]);
    assert_eq!(stdout_of(&output), "flowchart-elk\n");

    let output = run_cli(&["detect", "-i", &input, "--renderer", "flowchart=dagre-d3"]);
    assert_eq!(stdout_of(&output), "flowchart\n");
}

#[test]
fn detect_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "classes.mmd", "classDiagram\n  A <|-- B\n");
    let config = write_input(
        dir.path(),
        "config.json",
        r#"{"class": {"defaultRenderer": "dagre-d3"}}"#,
    );

    let output = run_cli(&["detect", "-i", &input, "--config", &config]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "class\n");
}

#[test]
fn detect_fails_for_unknown_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "pie.mmd", "pie title Pets\n");

    let output = run_cli(&["detect", "-i", &input]);
    assert!(!output.status.success());
    assert!(stdout_of(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not detect"));
}

#[test]
fn render_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "states.mmd", "stateDiagram-v2\n  [*] --> Idle\n");
    let target = dir.path().join("out.txt");

    let output = run_cli(&[
        "render",
        "-i",
        &input,
        "-o",
        &target.to_string_lossy(),
    ]);
    assert!(output.status.success());

    let rendered = fs::read_to_string(&target).unwrap();
    assert!(rendered.starts_with("stateDiagram TD (dagre-wrapper)"));
    assert!(rendered.contains("[*] --> Idle"));
}

#[test]
fn render_json_carries_diagram_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "chart.mmd", "graph LR; A-->B\n");

    let output = run_cli(&["render", "-i", &input, "--json", "-r", "flowchart=elk"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["diagramType"], "flowchart-elk");
    assert!(json["styles"].as_str().unwrap().contains(".flowchart-link"));
}

#[test]
fn render_reports_parse_error_location() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "broken.mmd", "graph TD\n  A -->\n");

    let output = run_cli(&["render", "-i", &input]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));
}

#[test]
fn types_lists_every_registration() {
    let output = run_cli(&["types", "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let ids: Vec<&str> = json["diagram_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        [
            "flowchart-elk",
            "flowchart-v2",
            "flowchart",
            "stateDiagram",
            "state",
            "classDiagram",
            "class"
        ]
    );
}
