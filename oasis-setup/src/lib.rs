//! Setup wizard for the Oasis API Server.
//!
//! This crate walks an operator through the INI files the API server reads
//! (`config/user_config_main.ini`, the node, sentry, Prometheus and Node
//! Exporter lists), prompting for each record and writing the files back.
//! The `oasis-setup` binary wires a terminal or scripted [`Prompter`] into
//! [`run_setup`].

pub mod collector;
pub mod domains;
pub mod driver;
pub mod error;
pub mod prompt;
pub mod records;
pub mod runner;
pub mod store;

pub use domains::{DEFAULT_CONFIG_DIR, Domain};
pub use driver::SetupOutcome;
pub use error::{SetupError, StoreError};
pub use prompt::{
    InterruptFlag, Prompter, ScriptAnswer, ScriptedPrompter, TermPrompter,
    prompter_from_env,
};
pub use records::{
    ApiServerConfig, ExporterNodeConfig, NamedRecord, NodeConfig,
    PrometheusNodeConfig, Record, SentryConfig,
};
pub use runner::{RunReport, run_setup};
pub use store::ConfigStore;
