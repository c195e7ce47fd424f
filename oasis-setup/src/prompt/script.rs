use std::{
    collections::VecDeque,
    fs::File,
    io::Write,
    path::PathBuf,
};

use serde::Serialize;

use super::Prompter;
use crate::error::SetupError;

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAnswer {
    /// Free-form text for an input prompt.
    Text(String),
    /// Bare Enter: blank text, or the default (yes) of a confirmation.
    Enter,
    /// Affirmative confirmation.
    Yes,
    /// Negative confirmation.
    No,
    /// Behave as if the operator pressed Ctrl-C at this prompt.
    Interrupt,
}

impl ScriptAnswer {
    fn token(&self) -> String {
        match self {
            ScriptAnswer::Text(text) => format!("type:{text}"),
            ScriptAnswer::Enter => "enter".into(),
            ScriptAnswer::Yes => "yes".into(),
            ScriptAnswer::No => "no".into(),
            ScriptAnswer::Interrupt => "ctrl-c".into(),
        }
    }
}

#[derive(Serialize)]
struct TraceEntry<'a> {
    kind: &'a str,
    question: &'a str,
    answer: &'a str,
}

/// Prompter replaying answers from a line-oriented script:
///   type:<text>|enter|y|yes|n|no|ctrl-c
/// Lines beginning with # are ignored. Blank lines are skipped.
/// Running out of answers fails fast instead of blocking.
#[derive(Debug)]
pub struct ScriptedPrompter {
    answers: VecDeque<ScriptAnswer>,
    transcript: Vec<String>,
    trace: Option<File>,
}

impl ScriptedPrompter {
    /// Replay `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = ScriptAnswer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            transcript: Vec::new(),
            trace: None,
        }
    }

    /// Parse script text; `origin` names the script in error messages.
    pub fn parse(contents: &str, origin: &str) -> Result<Self, SetupError> {
        let mut answers = Vec::new();
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let answer = match line {
                "enter" => ScriptAnswer::Enter,
                "y" | "yes" => ScriptAnswer::Yes,
                "n" | "no" => ScriptAnswer::No,
                "ctrl-c" => ScriptAnswer::Interrupt,
                _ => match raw.trim_start().strip_prefix("type:") {
                    Some(text) => ScriptAnswer::Text(text.to_string()),
                    None => {
                        return Err(SetupError::Script {
                            origin: origin.to_string(),
                            line: idx + 1,
                            message: format!("unrecognized token `{line}`"),
                        });
                    }
                },
            };
            answers.push(answer);
        }
        Ok(Self::new(answers))
    }

    /// Read a script file, optionally tracing answers to `trace_path`.
    pub fn from_path(
        path: PathBuf,
        trace_path: Option<PathBuf>,
    ) -> Result<Self, SetupError> {
        let contents = std::fs::read_to_string(&path).map_err(|source| {
            SetupError::ScriptIo {
                path: path.clone(),
                source,
            }
        })?;
        let mut prompter =
            Self::parse(&contents, &path.display().to_string())?;
        if let Some(trace_path) = trace_path {
            let file = File::create(&trace_path).map_err(|source| {
                SetupError::ScriptIo {
                    path: trace_path,
                    source,
                }
            })?;
            prompter.trace = Some(file);
        }
        Ok(prompter)
    }

    /// Every question asked and message shown so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(
        &mut self,
        question: &str,
    ) -> Result<ScriptAnswer, SetupError> {
        self.transcript.push(format!("? {question}"));
        self.answers
            .pop_front()
            .ok_or_else(|| SetupError::ScriptExhausted {
                question: question.to_string(),
            })
    }

    fn record(&mut self, kind: &str, question: &str, answer: &str) {
        println!("{question} {answer}");
        if let Some(trace) = self.trace.as_mut() {
            let entry = TraceEntry {
                kind,
                question,
                answer,
            };
            if let Ok(line) = serde_json::to_string(&entry) {
                let _ = writeln!(trace, "{line}");
            }
        }
    }

    fn mismatch(answer: &ScriptAnswer, question: &str) -> SetupError {
        SetupError::ScriptMismatch {
            token: answer.token(),
            question: question.to_string(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, question: &str) -> Result<String, SetupError> {
        let answer = match self.next_answer(question)? {
            ScriptAnswer::Text(text) => text,
            ScriptAnswer::Enter => String::new(),
            ScriptAnswer::Interrupt => {
                self.record("input", question, "^C");
                return Err(SetupError::Interrupted);
            }
            other => return Err(Self::mismatch(&other, question)),
        };
        self.record("input", question, &answer);
        Ok(answer)
    }

    fn confirm(&mut self, question: &str) -> Result<bool, SetupError> {
        let answer = match self.next_answer(question)? {
            ScriptAnswer::Yes | ScriptAnswer::Enter => true,
            ScriptAnswer::No => false,
            ScriptAnswer::Interrupt => {
                self.record("confirm", question, "^C");
                return Err(SetupError::Interrupted);
            }
            other => return Err(Self::mismatch(&other, question)),
        };
        self.record("confirm", question, if answer { "yes" } else { "no" });
        Ok(answer)
    }

    fn say(&mut self, message: &str) {
        println!("{message}");
        self.transcript.push(message.to_string());
    }
}
