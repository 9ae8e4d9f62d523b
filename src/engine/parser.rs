use crate::error::{LockerError, Result};
use crate::locker::types::Statement;

/// Separator inside the activity name and description fields.
pub const DELIMITER: &str = "--";

/// One checkpoint event recovered from a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgressFact {
    pub module_id: String,
    pub module_name: String,
    pub checkpoints_completed: i64,
    pub total_checkpoints: i64,
}

/// Parse one statement.
///
/// * empty description: the module is not tagged yet, `Ok(None)`
/// * empty name with a description present: `MalformedRecord`
/// * either field not exactly two `--` parts: `Ok(None)`
///
/// Non-numeric checkpoint counts coerce to zero.
pub fn parse_statement(statement: &Statement) -> Result<Option<ProgressFact>> {
    let definition = &statement.target.definition;
    let module_info = definition.description.en_us.as_str();
    if module_info.is_empty() {
        return Ok(None);
    }
    let checkpoint_info = definition.name.en_us.as_str();
    if checkpoint_info.is_empty() {
        return Err(LockerError::MalformedRecord(format!(
            "activity {:?} has description {:?} but no name",
            statement.target.id, module_info
        )));
    }

    let (Some((module_id, module_name)), Some((completed, total))) =
        (split_pair(module_info), split_pair(checkpoint_info))
    else {
        tracing::debug!(
            description = module_info,
            name = checkpoint_info,
            "skipping statement with non-standard activity fields"
        );
        return Ok(None);
    };

    Ok(Some(ProgressFact {
        module_id: module_id.to_string(),
        module_name: module_name.to_string(),
        checkpoints_completed: coerce_int(completed),
        total_checkpoints: coerce_int(total),
    }))
}

/// Parse a page of statements for a single learner.
pub fn parse_progress(statements: &[Statement]) -> Result<Vec<ProgressFact>> {
    let mut facts = Vec::with_capacity(statements.len());
    for statement in statements {
        if let Some(fact) = parse_statement(statement)? {
            facts.push(fact);
        }
    }
    Ok(facts)
}

/// Parse a statement whose actor identifies the learner: returns the
/// username alongside the fact, if any.
pub fn parse_attributed(statement: &Statement) -> Result<(String, Option<ProgressFact>)> {
    let username = username_from_mbox(&statement.actor.mbox)?;
    let fact = parse_statement(statement)?;
    Ok((username.to_string(), fact))
}

/// `mailto:alice@example.com` -> `alice`
pub fn username_from_mbox(mbox: &str) -> Result<&str> {
    let malformed = |what: &str| {
        LockerError::MalformedRecord(format!("actor mbox {:?} has no {}", mbox, what))
    };
    let (_, address) = mbox.split_once(':').ok_or_else(|| malformed("scheme"))?;
    let (local, _) = address.split_once('@').ok_or_else(|| malformed("domain"))?;
    Ok(local)
}

/// Exactly two parts or nothing.
fn split_pair(field: &str) -> Option<(&str, &str)> {
    let mut parts = field.split(DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

fn coerce_int(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}
