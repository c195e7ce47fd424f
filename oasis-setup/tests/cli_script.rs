//! Grey-box tests that spawn the real `oasis-setup` binary and drive it with
//! `OASIS_SETUP_SCRIPT` instead of a tty.

use std::{fs, path::Path};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_script(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join("answers.txt");
    fs::write(&path, lines.iter().map(|l| format!("{l}\n")).collect::<String>())
        .unwrap();
    path
}

#[test]
fn help_lists_flags() {
    let mut cmd = cargo_bin_cmd!("oasis-setup");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config-dir"))
        .stdout(predicate::str::contains("--only"));
}

#[test]
fn scripted_main_only_run_saves_defaults() {
    let root = TempDir::new().unwrap();
    let config_dir = root.path().join("config");
    let script = write_script(
        root.path(),
        &["# api server", "y", "enter", "type:127.0.0.1:9100/metrics"],
    );
    let trace = root.path().join("trace.jsonl");

    let mut cmd = cargo_bin_cmd!("oasis-setup");
    cmd.arg("--config-dir")
        .arg(&config_dir)
        .arg("--only")
        .arg("main")
        .env("OASIS_SETUP_SCRIPT", &script)
        .env("OASIS_SETUP_TRACE", &trace)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Welcome to the Oasis API Server setup script!",
        ))
        .stdout(predicate::str::contains("Saved"))
        .stdout(predicate::str::contains("Setup completed!"));

    assert_eq!(
        fs::read_to_string(config_dir.join("user_config_main.ini")).unwrap(),
        "[api_server]\nport = 8080\nmetrics_url = 127.0.0.1:9100/metrics\n\n"
    );
    assert_eq!(fs::read_to_string(&trace).unwrap().lines().count(), 3);
}

#[test]
fn scripted_interrupt_exits_cleanly() {
    let root = TempDir::new().unwrap();
    let config_dir = root.path().join("config");
    let script = write_script(
        root.path(),
        &[
            // main: decline, leaving the blank skeleton
            "n",
            // nodes: start, then interrupt at the socket path
            "y",
            "type:validator",
            "ctrl-c",
        ],
    );

    let mut cmd = cargo_bin_cmd!("oasis-setup");
    cmd.arg("--config-dir")
        .arg(&config_dir)
        .env("OASIS_SETUP_SCRIPT", &script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup process stopped."))
        .stdout(predicate::str::contains("Setup completed!").not());

    assert_eq!(
        fs::read_to_string(config_dir.join("user_config_main.ini")).unwrap(),
        "[api_server]\nport =\nmetrics_url =\n\n"
    );
    assert!(!config_dir.join("user_config_nodes.ini").exists());
}

#[test]
fn bad_script_token_fails() {
    let root = TempDir::new().unwrap();
    let script = write_script(root.path(), &["perhaps"]);

    let mut cmd = cargo_bin_cmd!("oasis-setup");
    cmd.arg("--config-dir")
        .arg(root.path().join("config"))
        .env("OASIS_SETUP_SCRIPT", &script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized token"));
}
