pub mod aggregate;
pub mod dedup;
pub mod gap_fill;
pub mod parser;
pub mod report;

pub use aggregate::ProgressSummary;
pub use parser::ProgressFact;
pub use report::{LearnerReport, MentorAccumulator, MentorReport, ProgressAccumulator};
