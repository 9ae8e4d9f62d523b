use super::parser::ProgressFact;
use serde::Serialize;
use std::collections::HashMap;

/// Per-module progress for one learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    #[serde(rename = "moduleID")]
    pub module_id: String,
    #[serde(rename = "moduleName")]
    pub module_name: String,
    #[serde(rename = "checkpointsCompleted")]
    pub checkpoints_completed: i64,
    #[serde(rename = "totalCheckpoints")]
    pub total_checkpoints: i64,
}

/// Collapse deduplicated facts into one summary per module.
///
/// The store logs one statement per checkpoint crossed, so the number of
/// distinct facts for a module is its completed count. Name and total come
/// from the last fact seen for the module. Modules keep first-seen order.
pub fn summarize(facts: &[ProgressFact]) -> Vec<ProgressSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<ProgressSummary> = Vec::new();

    for fact in facts {
        match index.get(fact.module_id.as_str()) {
            Some(&i) => {
                let summary = &mut summaries[i];
                summary.checkpoints_completed += 1;
                summary.module_name.clone_from(&fact.module_name);
                summary.total_checkpoints = fact.total_checkpoints;
            }
            None => {
                index.insert(&fact.module_id, summaries.len());
                summaries.push(ProgressSummary {
                    module_id: fact.module_id.clone(),
                    module_name: fact.module_name.clone(),
                    checkpoints_completed: 1,
                    total_checkpoints: fact.total_checkpoints,
                });
            }
        }
    }

    summaries
}
