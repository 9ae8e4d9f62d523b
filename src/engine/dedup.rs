use super::parser::ProgressFact;
use std::collections::HashSet;

/// Drop exact duplicates, keeping the first occurrence of each fact.
pub fn remove_duplicates(facts: Vec<ProgressFact>) -> Vec<ProgressFact> {
    let mut seen = HashSet::with_capacity(facts.len());
    facts
        .into_iter()
        .filter(|fact| seen.insert(fact.clone()))
        .collect()
}
