//! Record schemas for each config domain.
//!
//! Every record is a fixed tuple of string fields. [`Record::FIELDS`] fixes
//! both the prompt order and the order keys are written to a section.

use crate::store::{ConfigStore, Section};

/// Section holding the API server singleton.
pub const API_SERVER_SECTION: &str = "api_server";

/// Prefix of the positional sections holding list records.
pub const LIST_SECTION_PREFIX: &str = "node_";

/// Port written when the operator leaves the API server port blank.
pub const DEFAULT_API_PORT: &str = "8080";

/// One prompted field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Key written to the INI section.
    pub key: &'static str,
    /// Question shown to the operator.
    pub question: &'static str,
    /// Lines printed before the question, if any.
    pub preamble: &'static [&'static str],
    /// Value used when the answer is blank.
    pub default: Option<&'static str>,
}

impl Field {
    const fn plain(key: &'static str, question: &'static str) -> Self {
        Self {
            key,
            question,
            preamble: &[],
            default: None,
        }
    }
}

const NODE_NAME: Field = Field::plain("node_name", "Unique node name:");

/// A fixed-schema config record.
pub trait Record: Sized {
    /// Fields in prompt and persistence order.
    const FIELDS: &'static [Field];

    /// Build a record from values given in [`Record::FIELDS`] order.
    fn from_values(values: Vec<String>) -> Self;

    /// Values in [`Record::FIELDS`] order.
    fn values(&self) -> Vec<&str>;

    /// Read a record back; absent keys become empty strings.
    fn from_section(section: &Section) -> Self {
        Self::from_values(
            Self::FIELDS
                .iter()
                .map(|f| section.get(f.key).cloned().unwrap_or_default())
                .collect(),
        )
    }
}

/// A list record keyed by a `node_name` that must be unique within its file.
pub trait NamedRecord: Record {
    /// Name identifying the record within its list.
    fn node_name(&self) -> &str;
}

/// Replace every section of `store` with `records`, one `node_<i>` each.
pub fn write_records<R: Record>(store: &mut ConfigStore, records: &[R]) {
    store.clear();
    for (idx, record) in records.iter().enumerate() {
        let name = format!("{LIST_SECTION_PREFIX}{idx}");
        store.add_section(&name);
        for (field, value) in R::FIELDS.iter().zip(record.values()) {
            store.set(&name, field.key, value);
        }
    }
}

/// Read every section of `store` as a record, in file order.
pub fn read_records<R: Record>(store: &ConfigStore) -> Vec<R> {
    store
        .sections()
        .map(|(_, section)| R::from_section(section))
        .collect()
}

fn take(values: &mut std::vec::IntoIter<String>) -> String {
    values.next().unwrap_or_default()
}

/// API server singleton (`user_config_main.ini`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiServerConfig {
    /// Port the API server listens on.
    pub port: String,
    /// Node Exporter metrics endpoint.
    pub metrics_url: String,
}

impl Record for ApiServerConfig {
    const FIELDS: &'static [Field] = &[
        Field {
            key: "port",
            question: "Please insert the port you would like the API Server to use (default: 8080):",
            preamble: &[
                "You will now be asked to input the port that will be used by the API Server.",
                "If you will be running the API Server using Docker, you must leave this port as the default.",
            ],
            default: Some(DEFAULT_API_PORT),
        },
        Field {
            key: "metrics_url",
            question: "Node Exporter's localhost url is needed which was exposed during the Node Exporter setup (typically 127.0.0.1:9100/metrics):",
            preamble: &[
                "==== Node Exporter",
                "To retrieve data from the Node Exporter, the API needs to know where to find the Node Exporter endpoint!",
            ],
            default: None,
        },
    ];

    fn from_values(values: Vec<String>) -> Self {
        let mut it = values.into_iter();
        Self {
            port: take(&mut it),
            metrics_url: take(&mut it),
        }
    }

    fn values(&self) -> Vec<&str> {
        vec![self.port.as_str(), self.metrics_url.as_str()]
    }
}

/// Oasis node reachable over its internal socket (`user_config_nodes.ini`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeConfig {
    /// Name unique within the list.
    pub node_name: String,
    /// Path of the node's internal gRPC socket.
    pub isocket_path: String,
    /// Prometheus endpoint of the node.
    pub prometheus_url: String,
}

impl Record for NodeConfig {
    const FIELDS: &'static [Field] = &[
        NODE_NAME,
        Field::plain(
            "isocket_path",
            "Node's internal socket file path which was setup during the node's installation (typically unix:/serverdir/nodes/internal.sock):",
        ),
        Field {
            key: "prometheus_url",
            question: "Prometheus Node's localhost url (typically http://127.0.0.1:3000):",
            preamble: &[
                "==== Prometheus",
                "To retrieve data from Prometheus, the API server needs to have the Prometheus endpoints!",
            ],
            default: None,
        },
    ];

    fn from_values(values: Vec<String>) -> Self {
        let mut it = values.into_iter();
        Self {
            node_name: take(&mut it),
            isocket_path: take(&mut it),
            prometheus_url: take(&mut it),
        }
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.node_name.as_str(),
            self.isocket_path.as_str(),
            self.prometheus_url.as_str(),
        ]
    }
}

impl NamedRecord for NodeConfig {
    fn node_name(&self) -> &str {
        &self.node_name
    }
}

/// Sentry endpoint with its TLS identity (`user_config_sentry.ini`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentryConfig {
    /// Name unique within the list.
    pub node_name: String,
    /// External address of the sentry.
    pub ext_url: String,
    /// TLS identity certificate of the sentry.
    pub tls_path: String,
}

impl Record for SentryConfig {
    const FIELDS: &'static [Field] = &[
        NODE_NAME,
        Field::plain(
            "ext_url",
            "Sentry Node's external url (typically <IP ADDRESS>:9009):",
        ),
        Field::plain(
            "tls_path",
            "Sentry Node's tls_identity_cert.pem file location (typically /serverdir/node/tls_identity.pem):",
        ),
    ];

    fn from_values(values: Vec<String>) -> Self {
        let mut it = values.into_iter();
        Self {
            node_name: take(&mut it),
            ext_url: take(&mut it),
            tls_path: take(&mut it),
        }
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.node_name.as_str(),
            self.ext_url.as_str(),
            self.tls_path.as_str(),
        ]
    }
}

impl NamedRecord for SentryConfig {
    fn node_name(&self) -> &str {
        &self.node_name
    }
}

/// Prometheus endpoint of a node (`prometheus_config_main.ini`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrometheusNodeConfig {
    /// Name unique within the list.
    pub node_name: String,
    /// Prometheus endpoint of the node.
    pub prometheus_url: String,
}

impl Record for PrometheusNodeConfig {
    const FIELDS: &'static [Field] = &[
        NODE_NAME,
        Field::plain(
            "prometheus_url",
            "Prometheus Node's localhost url (typically http://127.0.0.1:3000):",
        ),
    ];

    fn from_values(values: Vec<String>) -> Self {
        let mut it = values.into_iter();
        Self {
            node_name: take(&mut it),
            prometheus_url: take(&mut it),
        }
    }

    fn values(&self) -> Vec<&str> {
        vec![self.node_name.as_str(), self.prometheus_url.as_str()]
    }
}

impl NamedRecord for PrometheusNodeConfig {
    fn node_name(&self) -> &str {
        &self.node_name
    }
}

/// Node Exporter metrics endpoint (`node_exporter_nodes.ini`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExporterNodeConfig {
    /// Name unique within the list.
    pub node_name: String,
    /// Node Exporter metrics endpoint.
    pub metrics_url: String,
}

impl Record for ExporterNodeConfig {
    const FIELDS: &'static [Field] = &[
        NODE_NAME,
        Field::plain(
            "metrics_url",
            "Node Exporter's localhost url is needed which was exposed during the Node Exporter setup (typically 127.0.0.1:9100/metrics):",
        ),
    ];

    fn from_values(values: Vec<String>) -> Self {
        let mut it = values.into_iter();
        Self {
            node_name: take(&mut it),
            metrics_url: take(&mut it),
        }
    }

    fn values(&self) -> Vec<&str> {
        vec![self.node_name.as_str(), self.metrics_url.as_str()]
    }
}

impl NamedRecord for ExporterNodeConfig {
    fn node_name(&self) -> &str {
        &self.node_name
    }
}
