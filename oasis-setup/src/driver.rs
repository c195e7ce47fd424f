//! Per-domain setup flows: the "already set up? replace? collect" gating
//! around the collector, and serialization into the store.

use tracing::info;

use crate::{
    collector::{collect_records, prompt_record},
    error::SetupError,
    prompt::Prompter,
    records::{
        API_SERVER_SECTION, ApiServerConfig, NamedRecord, Record, write_records,
    },
    store::ConfigStore,
};

/// What a driver did to its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Existing config kept; the store was not modified.
    Kept,
    /// Operator declined setting up an unconfigured domain.
    Declined,
    /// Store replaced with `records` freshly collected records.
    Configured {
        /// Records written into the store.
        records: usize,
    },
}

impl SetupOutcome {
    /// Whether the store may differ from the file it was loaded from.
    pub fn needs_write(self) -> bool {
        !matches!(self, SetupOutcome::Kept)
    }
}

/// Operator-facing wording of a list domain.
#[derive(Debug, Clone, Copy)]
pub struct ListPrompts {
    /// Heading line.
    pub title: &'static str,
    /// Explanation printed under the heading.
    pub intro: &'static str,
    /// Question when the file already has records.
    pub replace: &'static str,
    /// Question when the file is empty.
    pub set_up: &'static str,
    /// Asked after every accepted record.
    pub add_another: &'static str,
}

/// Run the list flow for records of type `R`.
pub fn setup_list<R: NamedRecord>(
    store: &mut ConfigStore,
    prompter: &mut dyn Prompter,
    prompts: &ListPrompts,
) -> Result<SetupOutcome, SetupError> {
    prompter.say(prompts.title);
    prompter.say(prompts.intro);

    let already_set_up = !store.is_empty();
    if already_set_up {
        if !prompter.confirm(prompts.replace)? {
            return Ok(SetupOutcome::Kept);
        }
    } else if !prompter.confirm(prompts.set_up)? {
        return Ok(SetupOutcome::Declined);
    }

    let records: Vec<R> = collect_records(prompter, prompts.add_another)?;
    write_records(store, &records);
    info!(
        domain = prompts.title,
        records = records.len(),
        "collected records"
    );
    Ok(SetupOutcome::Configured {
        records: records.len(),
    })
}

/// Whether `api_server` exists with at least one non-empty value.
pub fn api_server_is_set_up(store: &ConfigStore) -> bool {
    store
        .section(API_SERVER_SECTION)
        .is_some_and(|section| section.values().any(|v| !v.is_empty()))
}

/// Run the API server singleton flow.
///
/// When the operator declines on a fresh store the section is still left in
/// place with blank values so the server finds the keys it expects.
pub fn setup_api_server(
    store: &mut ConfigStore,
    prompter: &mut dyn Prompter,
) -> Result<SetupOutcome, SetupError> {
    prompter.say("==== API Server");
    prompter.say(
        "The API Server makes it possible to query Oasis Nodes and retrieve \
         certain data about the node and the blockchain. The Node Exporter \
         will also be setup during this process to able to query system data.",
    );

    let already_set_up = api_server_is_set_up(store);
    if already_set_up
        && !prompter.confirm(
            "API Server is already set up. Do you wish to clear the current config?",
        )?
    {
        return Ok(SetupOutcome::Kept);
    }

    store.reset_section(API_SERVER_SECTION);
    for field in ApiServerConfig::FIELDS {
        store.set(API_SERVER_SECTION, field.key, "");
    }

    if !already_set_up
        && !prompter.confirm("Do you wish to set up the API Server?")?
    {
        return Ok(SetupOutcome::Declined);
    }

    let api: ApiServerConfig = prompt_record(prompter)?;
    for (field, value) in ApiServerConfig::FIELDS.iter().zip(api.values()) {
        store.set(API_SERVER_SECTION, field.key, value);
    }
    info!(port = %api.port, "configured api server");
    Ok(SetupOutcome::Configured { records: 1 })
}
