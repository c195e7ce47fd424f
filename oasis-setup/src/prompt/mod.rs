//! Operator input for the setup drivers.
//!
//! Drivers never touch the terminal directly; they talk to a [`Prompter`] so a
//! run can be replayed from a script without a tty.

mod script;

pub use script::{ScriptAnswer, ScriptedPrompter};

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use dialoguer::{Confirm, Input, console::Term};
use tracing::debug;

use crate::error::SetupError;

/// Env var naming a script file that replaces the terminal prompts.
pub const SCRIPT_ENV: &str = "OASIS_SETUP_SCRIPT";
/// Env var naming a file where scripted runs record every prompt.
pub const TRACE_ENV: &str = "OASIS_SETUP_TRACE";

/// Source of operator answers.
pub trait Prompter {
    /// Ask for free-form text. Blank answers are returned as-is.
    fn input(&mut self, question: &str) -> Result<String, SetupError>;

    /// Ask a yes/no question whose default is yes.
    fn confirm(&mut self, question: &str) -> Result<bool, SetupError>;

    /// Show an informational line.
    fn say(&mut self, message: &str);
}

/// Flag raised by the Ctrl-C handler and polled at every prompt boundary.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    /// A lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the run as interrupted.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether Ctrl-C was pressed.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Interactive prompts on stderr via dialoguer.
#[derive(Debug)]
pub struct TermPrompter {
    term: Term,
    interrupt: InterruptFlag,
}

impl TermPrompter {
    /// Prompt on stderr, giving up once `interrupt` is raised.
    pub fn new(interrupt: InterruptFlag) -> Self {
        Self {
            term: Term::stderr(),
            interrupt,
        }
    }

    fn check_interrupt(&self) -> Result<(), SetupError> {
        if self.interrupt.is_raised() {
            Err(SetupError::Interrupted)
        } else {
            Ok(())
        }
    }
}

impl Prompter for TermPrompter {
    fn input(&mut self, question: &str) -> Result<String, SetupError> {
        self.check_interrupt()?;
        let answer: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        self.check_interrupt()?;
        Ok(answer)
    }

    fn confirm(&mut self, question: &str) -> Result<bool, SetupError> {
        self.check_interrupt()?;
        let answer = Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact_on(&self.term)?;
        self.check_interrupt()?;
        Ok(answer)
    }

    fn say(&mut self, message: &str) {
        // Same stream as the prompts, so redirecting stdout drops neither.
        if let Err(err) = self.term.write_line(message) {
            debug!(error = %err, "failed to write message to terminal");
        }
    }
}

/// Pick the prompter for this process: a script when [`SCRIPT_ENV`] is set,
/// the terminal otherwise.
pub fn prompter_from_env(
    interrupt: InterruptFlag,
) -> Result<Box<dyn Prompter>, SetupError> {
    if let Ok(path) = std::env::var(SCRIPT_ENV) {
        let trace = std::env::var(TRACE_ENV).ok().map(PathBuf::from);
        debug!(script = %path, "using scripted prompter");
        let prompter =
            ScriptedPrompter::from_path(PathBuf::from(path), trace)?;
        Ok(Box::new(prompter))
    } else {
        Ok(Box::new(TermPrompter::new(interrupt)))
    }
}
