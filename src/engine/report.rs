use super::aggregate::{summarize, ProgressSummary};
use super::dedup::remove_duplicates;
use super::gap_fill::fill_blanks;
use super::parser::{parse_attributed, parse_progress, ProgressFact};
use crate::catalog::ModuleCatalog;
use crate::error::Result;
use crate::locker::types::Statement;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Dedup, aggregate and gap-fill one learner's facts.
pub fn finish(facts: Vec<ProgressFact>, catalog: &ModuleCatalog) -> Vec<ProgressSummary> {
    let facts = remove_duplicates(facts);
    fill_blanks(summarize(&facts), catalog)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearnerReport {
    pub username: String,
    pub progress: Vec<ProgressSummary>,
}

/// Every learner seen in the store, keyed by username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MentorReport {
    pub learners: BTreeMap<String, LearnerReport>,
}

impl MentorReport {
    pub fn get(&self, username: &str) -> Option<&LearnerReport> {
        self.learners.get(username)
    }

    pub fn len(&self) -> usize {
        self.learners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.learners.is_empty()
    }
}

/// Facts gathered across pages for a single learner.
#[derive(Debug, Default)]
pub struct ProgressAccumulator {
    facts: Vec<ProgressFact>,
}

impl ProgressAccumulator {
    pub fn absorb(mut self, statements: &[Statement]) -> Result<Self> {
        self.facts.extend(parse_progress(statements)?);
        Ok(self)
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn finish(self, catalog: &ModuleCatalog) -> Vec<ProgressSummary> {
        finish(self.facts, catalog)
    }
}

/// Facts gathered across pages, split by learner. Users are tracked even
/// when none of their statements carry progress.
#[derive(Debug, Default)]
pub struct MentorAccumulator {
    users: BTreeSet<String>,
    facts: BTreeMap<String, Vec<ProgressFact>>,
}

impl MentorAccumulator {
    pub fn absorb(mut self, statements: &[Statement]) -> Result<Self> {
        for statement in statements {
            let (username, fact) = parse_attributed(statement)?;
            if let Some(fact) = fact {
                self.facts.entry(username.clone()).or_default().push(fact);
            }
            self.users.insert(username);
        }
        Ok(self)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn finish(mut self, catalog: &ModuleCatalog) -> MentorReport {
        for user in &self.users {
            self.facts.entry(user.clone()).or_default();
        }
        let learners = self
            .facts
            .into_iter()
            .map(|(username, facts)| {
                let report = LearnerReport {
                    username: username.clone(),
                    progress: finish(facts, catalog),
                };
                (username, report)
            })
            .collect();
        MentorReport { learners }
    }
}
