use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Drive the compiled binary over stdin and collect its stdout.
fn run_session(home: &Path, workspace: &Path, store: &Path, script: &str) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_codex-vcs"))
        .arg("--workspace")
        .arg(workspace)
        .arg("--store")
        .arg(store)
        .env("HOME", home)
        .env("CODEX_VCS_REMOTE_HOST", "github.com")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn codex-vcs");

    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(script.as_bytes())
        .expect("Failed to write script");

    let output = child.wait_with_output().expect("Failed to wait for codex-vcs");
    assert!(
        output.status.success(),
        "codex-vcs exited with {:?}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout was not utf-8")
}

fn file_json(id: &str, name: &str, content: &str) -> String {
    format!(
        r#"file {{"id":"{id}","name":"{name}","language":"javascript","content":"{content}"}}"#
    )
}

#[test]
fn stage_commit_edit_commit_walkthrough() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");
    let store = temp.path().join("users.json");

    let script = [
        "signup alice@example.com Alice".to_string(),
        "init".to_string(),
        file_json("1", "main.js", "A"),
        "status".to_string(),
        "stage 1".to_string(),
        "commit init".to_string(),
        "status".to_string(),
        file_json("1", "main.js", "B"),
        "status".to_string(),
        "stage 1".to_string(),
        "commit update".to_string(),
        "log".to_string(),
        "diff 1".to_string(),
    ]
    .join("\n")
        + "\n";

    let out = run_session(temp.path(), &workspace, &store, &script);
    println!("session output:\n{}", out);

    assert!(out.contains(r#""type":"created""#));
    assert!(out.contains(r#""type":"modified""#));
    assert!(out.contains(r#""changesCount":1"#));
    assert!(out.contains(r#""message":"update""#));
    // After the second commit the diff shows no pending edit.
    assert!(out.contains(r#""original":"B","modified":"B""#));
    assert!(!out.contains("error"));

    // The session persisted to the workspace.
    let session = fs::read_to_string(workspace.join("session.json")).unwrap();
    assert!(session.contains(r#""isInitialized": true"#));

    // Auto-sync uploaded the signed-in user's record.
    let users = fs::read_to_string(&store).unwrap();
    assert!(users.contains("alice@example.com"));
}

#[test]
fn push_then_pull_replicates_across_workspaces() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("users.json");
    let workspace_a = temp.path().join("a");
    let workspace_b = temp.path().join("b");

    let push_script = [
        "signup alice@example.com Alice".to_string(),
        "init".to_string(),
        file_json("1", "main.js", "shared"),
        "stage 1".to_string(),
        "commit init".to_string(),
        "remote alice/playground".to_string(),
        "push".to_string(),
    ]
    .join("\n")
        + "\n";

    let out = run_session(temp.path(), &workspace_a, &store, &push_script);
    assert!(out.contains("ok https://github.com/alice/playground.git"));
    assert!(!out.contains("error"));

    let pull_script = [
        "login alice@example.com".to_string(),
        "init".to_string(),
        "remote alice/playground".to_string(),
        "pull".to_string(),
        "log".to_string(),
        "status".to_string(),
    ]
    .join("\n")
        + "\n";

    let out = run_session(temp.path(), &workspace_b, &store, &pull_script);
    println!("pull output:\n{}", out);
    assert!(out.contains("ok updated"));
    assert!(out.contains(r#""message":"init""#));

    let session = fs::read_to_string(workspace_b.join("session.json")).unwrap();
    assert!(session.contains("shared"));
}

#[test]
fn push_without_remote_is_reported_and_non_fatal() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");
    let store = temp.path().join("users.json");

    let script = concat!(
        "signup alice@example.com Alice\n",
        "init\n",
        "push\n",
        "log\n",
    );

    let out = run_session(temp.path(), &workspace, &store, script);
    assert!(out.contains("error no remote configured"));
    // The loop kept serving commands after the failure.
    assert!(out.ends_with("\n"));
}
