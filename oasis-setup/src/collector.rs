//! Prompting for records field by field.

use tracing::debug;

use crate::{
    error::SetupError,
    prompt::Prompter,
    records::{Field, NamedRecord, Record},
};

/// Shown when the operator repeats a node name already in the list.
pub const DUPLICATE_NAME_MESSAGE: &str = "Node name must be unique.";

/// Ask a single field, printing its preamble and applying its default to an
/// empty answer.
///
/// Answers are trimmed here, since the store trims values on load and the
/// name check has to see what will be read back.
pub fn prompt_field(
    prompter: &mut dyn Prompter,
    field: &Field,
) -> Result<String, SetupError> {
    for line in field.preamble {
        prompter.say(line);
    }
    let answer = prompter.input(field.question)?.trim().to_string();
    match field.default {
        Some(default) if answer.is_empty() => Ok(default.to_string()),
        _ => Ok(answer),
    }
}

/// Ask every field of `R` in schema order.
pub fn prompt_record<R: Record>(
    prompter: &mut dyn Prompter,
) -> Result<R, SetupError> {
    let mut values = Vec::with_capacity(R::FIELDS.len());
    for field in R::FIELDS {
        values.push(prompt_field(prompter, field)?);
    }
    Ok(R::from_values(values))
}

/// Ask every field of `R`, re-asking the leading name field until it differs
/// from every name in `taken`.
pub fn prompt_unique_record<R: NamedRecord>(
    prompter: &mut dyn Prompter,
    taken: &[R],
) -> Result<R, SetupError> {
    let Some((name_field, rest)) = R::FIELDS.split_first() else {
        return Ok(R::from_values(Vec::new()));
    };

    let name = loop {
        let candidate = prompt_field(prompter, name_field)?;
        if taken.iter().any(|r| r.node_name() == candidate) {
            debug!(node_name = %candidate, "rejected duplicate node name");
            prompter.say(DUPLICATE_NAME_MESSAGE);
        } else {
            break candidate;
        }
    };

    let mut values = Vec::with_capacity(R::FIELDS.len());
    values.push(name);
    for field in rest {
        values.push(prompt_field(prompter, field)?);
    }
    Ok(R::from_values(values))
}

/// Collect records until the operator declines `add_another`.
///
/// At least one record is requested. Records are only returned once the loop
/// ends normally, so an interrupt discards everything entered in this call.
pub fn collect_records<R: NamedRecord>(
    prompter: &mut dyn Prompter,
    add_another: &str,
) -> Result<Vec<R>, SetupError> {
    let mut records: Vec<R> = Vec::new();
    loop {
        let record = prompt_unique_record(prompter, &records)?;
        debug!(node_name = %record.node_name(), "accepted record");
        records.push(record);
        prompter.say("Successfully added node.");

        if !prompter.confirm(add_another)? {
            break;
        }
    }
    Ok(records)
}
