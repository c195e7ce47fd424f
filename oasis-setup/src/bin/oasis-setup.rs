//! `oasis-setup`: walks an operator through the Oasis API Server config files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dialoguer::console::Term;
use oasis_setup::{
    DEFAULT_CONFIG_DIR, Domain, InterruptFlag, RunReport, prompter_from_env,
    run_setup,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "oasis-setup",
    about = "Interactive setup for Oasis API Server config files"
)]
struct Cli {
    /// Directory holding the API server's .ini files
    #[arg(long, env = "OASIS_SETUP_CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,
    /// Only configure these domains (repeatable; default: all, in order)
    #[arg(long = "only", value_enum)]
    only: Vec<DomainArg>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DomainArg {
    Main,
    Nodes,
    Sentries,
    Prometheus,
    Exporter,
}

impl From<DomainArg> for Domain {
    fn from(val: DomainArg) -> Self {
        match val {
            DomainArg::Main => Domain::Main,
            DomainArg::Nodes => Domain::Nodes,
            DomainArg::Sentries => Domain::Sentries,
            DomainArg::Prometheus => Domain::Prometheus,
            DomainArg::Exporter => Domain::Exporter,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr and default to warn so they stay out of the prompts.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let selected: Vec<Domain> = cli.only.into_iter().map(Domain::from).collect();
    let domains: Vec<Domain> = Domain::ALL
        .into_iter()
        .filter(|d| selected.is_empty() || selected.contains(d))
        .collect();

    let interrupt = InterruptFlag::new();
    let handler_flag = interrupt.clone();
    ctrlc::set_handler(move || {
        handler_flag.raise();
        let _ = Term::stderr().show_cursor();
    })
    .context("failed to install Ctrl-C handler")?;

    let mut prompter = prompter_from_env(interrupt)?;
    let report = run_setup(&cli.config_dir, &domains, prompter.as_mut())
        .with_context(|| {
            format!("setup failed in {}", cli.config_dir.display())
        })?;

    if let RunReport::Stopped { interrupted, .. } = &report {
        tracing::debug!(%interrupted, "run stopped early");
    }
    Ok(())
}
