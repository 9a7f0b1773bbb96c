use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn corkboard_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_corkboard"))
}

fn run(tmp: &TempDir, args: &[&str]) -> Output {
    corkboard_cmd()
        .current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn list_json(tmp: &TempDir) -> Vec<serde_json::Value> {
    let output = run(tmp, &["list", "--json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    parsed.as_array().unwrap().clone()
}

fn add_note(tmp: &TempDir, x: &str, y: &str) -> String {
    let output = run(tmp, &["add", x, y, "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    note["id"].as_str().unwrap().to_string()
}

#[test]
fn test_init_creates_board_directory() {
    let tmp = TempDir::new().unwrap();

    let output = run(&tmp, &["init"]);

    assert!(output.status.success());
    assert!(tmp.path().join(".corkboard").exists());
    assert!(tmp.path().join(".corkboard/config.yaml").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);

    let output = run(&tmp, &["init"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Already initialized"));
}

#[test]
fn test_add_without_init_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(&tmp, &["add", "10", "10"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not in a corkboard project"));
}

#[test]
fn test_create_and_front_workflow() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);
    let output = run(&tmp, &["defaults", "--width=150", "--height=150"]);
    assert!(output.status.success());

    let first = add_note(&tmp, "100", "200");
    let second = add_note(&tmp, "300", "50");

    let notes = list_json(&tmp);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["id"], first.as_str());
    assert_eq!(notes[0]["initialX"], 100.0);
    assert_eq!(notes[0]["initialY"], 200.0);
    assert_eq!(notes[0]["initWidth"], 150.0);
    assert_eq!(notes[0]["zIndex"], 1);
    assert_eq!(notes[1]["zIndex"], 2);

    let output = run(&tmp, &["front", &first]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("z=3"));

    // Listed bottom to top
    let notes = list_json(&tmp);
    assert_eq!(notes[0]["id"], second.as_str());
    assert_eq!(notes[0]["zIndex"], 2);
    assert_eq!(notes[1]["id"], first.as_str());
    assert_eq!(notes[1]["zIndex"], 3);
}

#[test]
fn test_move_and_resize_persist() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init", "--backend=sqlite"]);
    assert!(tmp.path().join(".corkboard/board.db").exists());

    let id = add_note(&tmp, "0", "0");

    let output = run(&tmp, &["move", &id, "-40", "75"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = run(&tmp, &["resize", &id[..8], "80", "400"]);
    assert!(output.status.success());

    let notes = list_json(&tmp);
    assert_eq!(notes[0]["initialX"], -40.0);
    assert_eq!(notes[0]["initialY"], 75.0);
    assert_eq!(notes[0]["initWidth"], 150.0);
    assert_eq!(notes[0]["initHeight"], 400.0);
}

#[test]
fn test_color_and_delete() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);
    let id = add_note(&tmp, "5", "5");

    let output = run(&tmp, &["color", &id, "aqua"]);
    assert!(output.status.success());
    let output = run(&tmp, &["get", &id, "--json"]);
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["color"], "#84e4c2");

    let output = run(&tmp, &["color", &id, "magenta"]);
    assert!(!output.status.success());

    let output = run(&tmp, &["delete", &id]);
    assert!(output.status.success());
    assert!(list_json(&tmp).is_empty());

    // Deleting again is a no-op, not an error
    let output = run(&tmp, &["delete", &id]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nothing deleted"));
    assert!(list_json(&tmp).is_empty());
}

#[test]
fn test_delete_with_ambiguous_prefix_fails() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);
    fs::write(
        tmp.path().join(".corkboard/notes.json"),
        r#"[{"id":"ab1","initialX":0,"initialY":0,"zIndex":1},
            {"id":"ab2","initialX":9,"initialY":9,"zIndex":2}]"#,
    )
    .unwrap();

    let output = run(&tmp, &["delete", "ab"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ambiguous note id"));
    assert_eq!(list_json(&tmp).len(), 2);
}

#[test]
fn test_out_of_range_defaults_rejected() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);

    let output = run(&tmp, &["defaults", "--width=300", "--height=900"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Value cannot be greater than 700"));

    // Nothing was changed, not even the valid width
    let output = run(&tmp, &["defaults"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Default width:  240"));

    let output = run(&tmp, &["add", "1", "1", "--width=100"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Value cannot be less than 150"));
    assert!(list_json(&tmp).is_empty());
}

#[test]
fn test_corrupt_store_reads_as_empty_board() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);
    fs::write(tmp.path().join(".corkboard/notes.json"), "{{ definitely not json").unwrap();

    let output = run(&tmp, &["list"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No notes found."));

    // The next write replaces the corrupt data
    add_note(&tmp, "1", "2");
    assert_eq!(list_json(&tmp).len(), 1);
}

#[test]
fn test_legacy_board_hydrates() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);
    fs::write(
        tmp.path().join(".corkboard/notes.json"),
        r#"[{"id":"1718000000123","initialX":12,"initialY":34,"zIndex":7}]"#,
    )
    .unwrap();

    let output = run(&tmp, &["get", "1718", "--json"]);
    assert!(output.status.success());
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["initWidth"], 240.0);

    // New notes stack above the legacy counter
    add_note(&tmp, "0", "0");
    let notes = list_json(&tmp);
    assert_eq!(notes[1]["zIndex"], 8);
}

#[test]
fn test_replay_events() {
    let tmp = TempDir::new().unwrap();
    run(&tmp, &["init"]);
    let script = tmp.path().join("events.json");
    fs::write(
        &script,
        r#"[
            {"type":"double_click","target":{"kind":"background"},"at":{"x":10,"y":10}},
            {"type":"double_click","target":{"kind":"background"},"at":{"x":400,"y":10}},
            {"type":"pointer_move","at":{"x":999,"y":999}},
            {"type":"pointer_up"}
        ]"#,
    )
    .unwrap();

    let output = run(&tmp, &["replay", script.to_str().unwrap(), "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let actions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let actions = actions.as_array().unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0]["action"], "created");
    assert_eq!(actions[1]["z_index"], 2);

    let notes = list_json(&tmp);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["initialX"], 10.0);
}
