//! The config domains the wizard walks through, in run order.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    driver::{ListPrompts, SetupOutcome, setup_api_server, setup_list},
    error::SetupError,
    prompt::Prompter,
    records::{
        ExporterNodeConfig, NodeConfig, PrometheusNodeConfig, SentryConfig,
    },
    store::ConfigStore,
};

/// Directory the API server reads its config files from.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// One config file and the flow that fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// API server port and metrics URL.
    Main,
    /// Nodes queried over their internal socket.
    Nodes,
    /// Sentry endpoints.
    Sentries,
    /// Prometheus endpoints per node.
    Prometheus,
    /// Node Exporter endpoints per node.
    Exporter,
}

const NODES: ListPrompts = ListPrompts {
    title: "==== Nodes",
    intro: "To retrieve data from nodes, the API needs to know where to find \
            the nodes! The list of nodes the API will connect to will now be \
            set up. This includes validators, sentries, and any full nodes \
            that can be used as a data source to retrieve data from the \
            network's perspective. Node names must be unique! The list of \
            API nodes must also include their Prometheus endpoints.",
    replace: "The list of nodes is already set up. Do you wish to replace \
              this list with a new one?",
    set_up: "Do you wish to set up the list of nodes?",
    add_another: "Do you want to add another node?",
};

const SENTRIES: ListPrompts = ListPrompts {
    title: "==== Sentry",
    intro: "To retrieve data from Sentry, the API needs to know the sentry \
            endpoints! The list of endpoints the API will connect to will \
            now be set up. Node names must be unique!",
    replace: "The list of sentry endpoints is already set up. Do you wish to \
              replace this list with a new one?",
    set_up: "Do you wish to set up the list of sentry endpoints?",
    add_another: "Do you want to add another sentry endpoint?",
};

const PROMETHEUS: ListPrompts = ListPrompts {
    title: "==== Prometheus",
    intro: "To retrieve data from Prometheus, the API needs to know where to \
            find the Prometheus endpoints! The list of endpoints the API will \
            connect to will now be set up. Node names must be equivalent to \
            those set before hand!",
    replace: "The list of Prometheus endpoints is already set up. Do you wish \
              to replace this list with a new one?",
    set_up: "Do you wish to set up the list of Prometheus endpoints?",
    add_another: "Do you want to add another Prometheus endpoint?",
};

const EXPORTER: ListPrompts = ListPrompts {
    title: "==== Node Exporter",
    intro: "To retrieve data from the Node Exporter, the API needs to know \
            where to find the Node Exporter endpoints! The list of endpoints \
            the API will connect to will now be set up. Node names must be \
            equivalent to those set before hand!",
    replace: "The list of Node Exporter endpoints is already set up. Do you \
              wish to replace this list with a new one?",
    set_up: "Do you wish to set up the list of Node Exporter endpoints?",
    add_another: "Do you want to add another Node Exporter endpoint?",
};

impl Domain {
    /// Every domain in the order a full run visits them.
    pub const ALL: [Domain; 5] = [
        Domain::Main,
        Domain::Nodes,
        Domain::Sentries,
        Domain::Prometheus,
        Domain::Exporter,
    ];

    /// File name under the config directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Domain::Main => "user_config_main.ini",
            Domain::Nodes => "user_config_nodes.ini",
            Domain::Sentries => "user_config_sentry.ini",
            Domain::Prometheus => "prometheus_config_main.ini",
            Domain::Exporter => "node_exporter_nodes.ini",
        }
    }

    /// Full path of this domain's file under `config_dir`.
    pub fn path_in(self, config_dir: &Path) -> PathBuf {
        config_dir.join(self.file_name())
    }

    /// Name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Domain::Main => "main",
            Domain::Nodes => "nodes",
            Domain::Sentries => "sentries",
            Domain::Prometheus => "prometheus",
            Domain::Exporter => "exporter",
        }
    }

    /// Run this domain's flow against `store`.
    pub fn configure(
        self,
        store: &mut ConfigStore,
        prompter: &mut dyn Prompter,
    ) -> Result<SetupOutcome, SetupError> {
        match self {
            Domain::Main => {
                let outcome = setup_api_server(store, prompter)?;
                prompter.say("");
                prompter.say("Setup finished.");
                Ok(outcome)
            }
            Domain::Nodes => setup_list::<NodeConfig>(store, prompter, &NODES),
            Domain::Sentries => {
                setup_list::<SentryConfig>(store, prompter, &SENTRIES)
            }
            Domain::Prometheus => {
                setup_list::<PrometheusNodeConfig>(store, prompter, &PROMETHEUS)
            }
            Domain::Exporter => {
                setup_list::<ExporterNodeConfig>(store, prompter, &EXPORTER)
            }
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
