//! End-to-end runs of the setup sequence against a throwaway config dir,
//! driven by scripted answers.

use std::{collections::HashMap, fs, path::Path};

use oasis_setup::{
    ConfigStore, Domain, ExporterNodeConfig, NodeConfig, RunReport, ScriptedPrompter, SetupError,
    records::read_records, run_setup,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn script(lines: &[&str]) -> ScriptedPrompter {
    ScriptedPrompter::parse(&lines.join("\n"), "test").expect("valid script")
}

fn read(dir: &Path, domain: Domain) -> Option<String> {
    fs::read_to_string(domain.path_in(dir)).ok()
}

#[test]
fn full_run_writes_every_domain() {
    let dir = tempdir().unwrap();
    let mut prompter = script(&[
        // main
        "y",
        "enter",
        "type:127.0.0.1:9100/metrics",
        // nodes
        "y",
        "type:validator",
        "type:unix:/serverdir/nodes/internal.sock",
        "type:http://127.0.0.1:3000",
        "n",
        // sentries
        "y",
        "type:sentry-1",
        "type:10.0.0.5:9009",
        "type:/serverdir/node/tls_identity.pem",
        "n",
        // prometheus
        "y",
        "type:validator",
        "type:http://127.0.0.1:3000",
        "n",
        // exporter
        "y",
        "type:validator",
        "type:127.0.0.1:9100/metrics",
        "n",
    ]);

    let report = run_setup(dir.path(), &Domain::ALL, &mut prompter).unwrap();

    assert!(report.is_completed());
    assert_eq!(report.saved().len(), Domain::ALL.len());
    assert_eq!(prompter.remaining(), 0);

    assert_eq!(
        read(dir.path(), Domain::Main).unwrap(),
        "[api_server]\nport = 8080\nmetrics_url = 127.0.0.1:9100/metrics\n\n"
    );
    assert_eq!(
        read(dir.path(), Domain::Sentries).unwrap(),
        "\
[node_0]
node_name = sentry-1
ext_url = 10.0.0.5:9009
tls_path = /serverdir/node/tls_identity.pem

"
    );
    assert_eq!(
        read(dir.path(), Domain::Exporter).unwrap(),
        "[node_0]\nnode_name = validator\nmetrics_url = 127.0.0.1:9100/metrics\n\n"
    );

    let transcript = prompter.transcript();
    assert_eq!(
        transcript.first().map(String::as_str),
        Some("Welcome to the Oasis API Server setup script!")
    );
    assert_eq!(
        transcript.last().map(String::as_str),
        Some("Setup completed!")
    );
}

#[test]
fn declining_replace_leaves_file_bytes_alone() {
    let dir = tempdir().unwrap();
    let path = Domain::Nodes.path_in(dir.path());
    // Hand-edited layout the renderer would not reproduce.
    let original = "# managed by ops\n[node_3]\nnode_name=keep\nisocket_path : unix:/x.sock\n";
    fs::write(&path, original).unwrap();

    let mut prompter = script(&["n"]);
    let report =
        run_setup(dir.path(), &[Domain::Nodes], &mut prompter).unwrap();

    assert!(report.saved().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn declining_fresh_domain_writes_empty_file() {
    let dir = tempdir().unwrap();
    let mut prompter = script(&["n"]);
    run_setup(dir.path(), &[Domain::Exporter], &mut prompter).unwrap();

    let contents = read(dir.path(), Domain::Exporter).unwrap();
    assert_eq!(contents, "");
    assert!(ConfigStore::parse(&contents).unwrap().is_empty());
}

#[test]
fn interrupt_keeps_finished_domains_and_skips_current() {
    let dir = tempdir().unwrap();
    let sentry_path = Domain::Sentries.path_in(dir.path());
    let prior_sentries = "[node_0]\nnode_name = old\next_url = e\ntls_path = t\n\n";
    fs::write(&sentry_path, prior_sentries).unwrap();

    let mut prompter = script(&[
        // main
        "y",
        "type:9000",
        "type:m",
        // nodes
        "y",
        "type:a",
        "type:unix:/a.sock",
        "type:http://a:3000",
        "n",
        // sentries: replace, then bail halfway through a record
        "y",
        "type:new-sentry",
        "ctrl-c",
    ]);

    let report = run_setup(dir.path(), &Domain::ALL, &mut prompter).unwrap();

    assert_eq!(
        report,
        RunReport::Stopped {
            saved: vec![
                Domain::Main.path_in(dir.path()),
                Domain::Nodes.path_in(dir.path()),
            ],
            interrupted: Domain::Sentries,
        }
    );
    assert!(read(dir.path(), Domain::Main).unwrap().contains("port = 9000"));
    assert!(read(dir.path(), Domain::Nodes).unwrap().contains("node_name = a"));
    assert_eq!(fs::read_to_string(&sentry_path).unwrap(), prior_sentries);
    assert_eq!(read(dir.path(), Domain::Prometheus), None);
    assert_eq!(
        prompter.transcript().last().map(String::as_str),
        Some("Setup process stopped.")
    );
}

#[test]
fn interrupt_in_first_domain_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut prompter = script(&["y", "ctrl-c"]);
    let report = run_setup(dir.path(), &Domain::ALL, &mut prompter).unwrap();

    assert!(!report.is_completed());
    assert!(report.saved().is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn rerun_replaces_list_and_round_trips_by_name() {
    let dir = tempdir().unwrap();
    let path = Domain::Nodes.path_in(dir.path());

    let mut first = script(&[
        "y",
        "type:alpha",
        "type:unix:/alpha.sock",
        "type:http://alpha:3000",
        "y",
        "type:beta",
        "type:unix:/beta.sock",
        "type:http://beta:3000",
        "n",
    ]);
    run_setup(dir.path(), &[Domain::Nodes], &mut first).unwrap();

    let mut second = script(&[
        "y",
        "type:gamma",
        "type:unix:/gamma.sock",
        "enter",
        "y",
        "type:gamma",
        "type:alpha",
        "type:unix:/alpha2.sock",
        "type:http://alpha:3000",
        "n",
    ]);
    run_setup(dir.path(), &[Domain::Nodes], &mut second).unwrap();
    assert!(
        second
            .transcript()
            .iter()
            .any(|line| line == "Node name must be unique.")
    );

    let store = ConfigStore::load(&path).unwrap();
    let names: Vec<&str> = store.section_names().collect();
    assert_eq!(names, vec!["node_0", "node_1"]);

    let by_name: HashMap<String, NodeConfig> = read_records(&store)
        .into_iter()
        .map(|n: NodeConfig| (n.node_name.clone(), n))
        .collect();
    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name["gamma"].prometheus_url, "");
    assert_eq!(by_name["alpha"].isocket_path, "unix:/alpha2.sock");
}

#[test]
fn padded_names_stay_distinct_after_reload() {
    let dir = tempdir().unwrap();
    let mut prompter = script(&[
        "y",
        "type:alpha",
        "type:u1",
        "y",
        "type:alpha ",
        "type:beta",
        "type:u2",
        "n",
    ]);
    run_setup(dir.path(), &[Domain::Exporter], &mut prompter).unwrap();
    assert_eq!(prompter.remaining(), 0);

    let store = ConfigStore::load(&Domain::Exporter.path_in(dir.path()))
        .unwrap();
    let exporters: Vec<ExporterNodeConfig> = read_records(&store);
    let by_name: HashMap<&str, &str> = exporters
        .iter()
        .map(|e| (e.node_name.as_str(), e.metrics_url.as_str()))
        .collect();
    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name["alpha"], "u1");
    assert_eq!(by_name["beta"], "u2");
}

#[test]
fn malformed_existing_file_aborts_before_prompting() {
    let dir = tempdir().unwrap();
    fs::write(Domain::Main.path_in(dir.path()), "port = 8080\n").unwrap();

    let mut prompter = script(&[]);
    let err = run_setup(dir.path(), &[Domain::Main], &mut prompter)
        .expect_err("orphan entry should fail");

    assert!(matches!(err, SetupError::Store(_)));
    assert!(err.to_string().contains("user_config_main.ini:1"));
}

#[test]
fn exhausted_script_is_an_error_not_a_stop() {
    let dir = tempdir().unwrap();
    let mut prompter = script(&["y"]);
    let err = run_setup(dir.path(), &[Domain::Main], &mut prompter)
        .expect_err("script runs dry");
    assert!(matches!(err, SetupError::ScriptExhausted { .. }));
    assert_eq!(read(dir.path(), Domain::Main), None);
}
