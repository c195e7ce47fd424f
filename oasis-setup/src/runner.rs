//! The full setup run: every selected domain, loaded, configured, and saved
//! one after another.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    domains::Domain, error::SetupError, prompt::Prompter, store::ConfigStore,
};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Every selected domain finished.
    Completed {
        /// Files written, in run order.
        saved: Vec<PathBuf>,
    },
    /// The operator interrupted `interrupted`; files in `saved` were written
    /// before that and stay as written.
    Stopped {
        /// Files written, in run order.
        saved: Vec<PathBuf>,
        /// Domain that was in progress.
        interrupted: Domain,
    },
}

impl RunReport {
    /// Files written before the run ended.
    pub fn saved(&self) -> &[PathBuf] {
        match self {
            RunReport::Completed { saved } | RunReport::Stopped { saved, .. } => {
                saved
            }
        }
    }

    /// Whether every selected domain ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunReport::Completed { .. })
    }
}

/// Run `domains` in order against files under `config_dir`.
///
/// A domain's file is written only after its flow returns normally, so an
/// interrupt never leaves a half-configured file behind. An interrupt ends
/// the run with [`RunReport::Stopped`]; any other failure is returned as an
/// error.
pub fn run_setup(
    config_dir: &Path,
    domains: &[Domain],
    prompter: &mut dyn Prompter,
) -> Result<RunReport, SetupError> {
    prompter.say("Welcome to the Oasis API Server setup script!");

    let mut saved = Vec::new();
    for &domain in domains {
        let path = domain.path_in(config_dir);
        let mut store = ConfigStore::load(&path)?;
        debug!(%domain, path = %path.display(), "configuring domain");

        let outcome = match domain.configure(&mut store, prompter) {
            Ok(outcome) => outcome,
            Err(SetupError::Interrupted) => {
                warn!(%domain, "setup interrupted; discarding pending changes");
                prompter.say("Setup process stopped.");
                return Ok(RunReport::Stopped {
                    saved,
                    interrupted: domain,
                });
            }
            Err(err) => return Err(err),
        };

        if outcome.needs_write() {
            store.write(&path)?;
            info!(%domain, path = %path.display(), ?outcome, "saved config");
            prompter.say(&format!("Saved {}", path.display()));
            saved.push(path);
        } else {
            prompter.say(&format!("Kept {} unchanged", path.display()));
        }
        prompter.say("");
    }

    prompter.say("Setup completed!");
    Ok(RunReport::Completed { saved })
}
