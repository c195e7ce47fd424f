//! Error types for the config store and the setup run.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures reading or writing an INI config file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("failed to read config file {}", .path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The file or its directory could not be written.
    #[error("failed to write config file {}", .path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: {message}", .path.display())]
    /// The file is not valid INI.
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line of the offending text.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
}

/// Everything that can stop a setup run.
///
/// `Interrupted` is the only variant the runner recovers from; every other
/// variant bubbles up to the binary.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The operator pressed Ctrl-C.
    #[error("setup interrupted by the operator")]
    Interrupted,
    /// Loading or saving a config file failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The terminal prompt itself failed.
    #[error("terminal prompt failed")]
    Prompt(#[source] dialoguer::Error),
    #[error("invalid setup script {origin}:{line}: {message}")]
    /// The answer script has a line that is not a known token.
    Script {
        /// Script path or label.
        origin: String,
        /// 1-based line in the script.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
    #[error("setup script ran out of answers at prompt: {question}")]
    /// The script ended while a prompt was still waiting.
    ScriptExhausted {
        /// Prompt left unanswered.
        question: String,
    },
    #[error("setup script answer `{token}` does not fit prompt: {question}")]
    /// A scripted answer does not suit the prompt kind.
    ScriptMismatch {
        /// Token as written in the script.
        token: String,
        /// Prompt it was replayed against.
        question: String,
    },
    #[error("failed to access setup script file {}", .path.display())]
    /// The script or trace file could not be opened.
    ScriptIo {
        /// Script or trace path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
}

impl From<dialoguer::Error> for SetupError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            // console reports Ctrl-C during a raw-mode read this way
            dialoguer::Error::IO(ref io_err)
                if io_err.kind() == io::ErrorKind::Interrupted =>
            {
                SetupError::Interrupted
            }
            other => SetupError::Prompt(other),
        }
    }
}

impl SetupError {
    /// Whether the run stopped because the operator cancelled it.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, SetupError::Interrupted)
    }
}
